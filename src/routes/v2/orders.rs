use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::orders::CreateOrderRequest,
    dto::v2::V2OrderDto,
    error::AppResult,
    middleware::auth::AuthUser,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_orders).post(place_order))
}

#[utoipa::path(
    get,
    path = "/api/v2/orders",
    responses(
        (status = 200, description = "Own orders, newest first", body = [V2OrderDto]),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<V2OrderDto>>> {
    let orders = order_service::list_orders(&state, &user).await?;
    Ok(Json(orders.into_iter().map(V2OrderDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v2/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Placed order", body = V2OrderDto),
        (status = 404, description = "A referenced product does not exist"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<V2OrderDto>> {
    let order = order_service::place_order(&state, &user, payload).await?;
    Ok(Json(V2OrderDto::from(order)))
}
