use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderDto, OrderList, UpdateOrderRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(place_order))
        .route("/all", get(list_all_orders))
        .route("/{id}", put(update_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = ApiResponse<OrderDto>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "A referenced product does not exist"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    let record = order_service::place_order(&state, &user, payload).await?;
    Ok(Json(ApiResponse::success(
        "Order placed",
        OrderDto::from(record),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Own orders, newest first", body = ApiResponse<OrderList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let records = order_service::list_orders(&state, &user).await?;
    let total = records.len() as i64;
    let items = records.into_iter().map(OrderDto::from).collect();
    Ok(Json(ApiResponse::paginated(
        "Orders",
        OrderList { items },
        1,
        total,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/orders/all",
    responses(
        (status = 200, description = "All orders with their owners", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let records = order_service::list_all_orders(&state, &user).await?;
    let total = records.len() as i64;
    let items = records.into_iter().map(OrderDto::from).collect();
    Ok(Json(ApiResponse::paginated(
        "Orders",
        OrderList { items },
        1,
        total,
        total,
    )))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID"),
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<OrderDto>),
        (status = 400, description = "Invalid or illegal status change"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    let record = order_service::update_order(&state, &user, id, payload).await?;
    Ok(Json(ApiResponse::success(
        "Order updated",
        OrderDto::from(record),
        Some(Meta::empty()),
    )))
}
