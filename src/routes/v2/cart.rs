use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, UpdateQuantityRequest},
    dto::v2::{V2CartDto, V2CartItemDto, V2OkDto, V2RemoveCartRequest, V2UpdateCartRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_cart)
                .post(add_to_cart)
                .put(update_cart)
                .delete(remove_from_cart),
        )
        .route("/all", delete(clear_cart))
}

fn parse_item_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid item id".to_string()))
}

#[utoipa::path(
    get,
    path = "/api/v2/cart",
    responses(
        (status = 200, description = "Cart contents", body = V2CartDto),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn get_cart(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<V2CartDto>> {
    let (entries, total_cents) = cart_service::get_cart(&state, &user).await?;
    let items = entries
        .into_iter()
        .map(|(item, product)| V2CartItemDto::from_entity(item, product))
        .collect();
    Ok(Json(V2CartDto { items, total_cents }))
}

#[utoipa::path(
    post,
    path = "/api/v2/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Resulting cart row", body = V2CartItemDto),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<V2CartItemDto>> {
    let (item, product) = cart_service::add_to_cart(&state, &user, payload).await?;
    Ok(Json(V2CartItemDto::from_entity(item, product)))
}

#[utoipa::path(
    put,
    path = "/api/v2/cart",
    request_body = V2UpdateCartRequest,
    responses(
        (status = 200, description = "Quantity updated or row removed", body = V2OkDto),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn update_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<V2UpdateCartRequest>,
) -> AppResult<Json<V2OkDto>> {
    let item_id = parse_item_id(&payload.item_id)?;
    cart_service::update_quantity(
        &state,
        &user,
        item_id,
        UpdateQuantityRequest {
            quantity: payload.quantity,
        },
    )
    .await?;
    Ok(Json(V2OkDto { ok: true }))
}

#[utoipa::path(
    delete,
    path = "/api/v2/cart",
    request_body = V2RemoveCartRequest,
    responses(
        (status = 200, description = "Row removed", body = V2OkDto),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<V2RemoveCartRequest>,
) -> AppResult<Json<V2OkDto>> {
    let item_id = parse_item_id(&payload.item_id)?;
    cart_service::remove_item(&state, &user, item_id).await?;
    Ok(Json(V2OkDto { ok: true }))
}

#[utoipa::path(
    delete,
    path = "/api/v2/cart/all",
    responses(
        (status = 200, description = "Cart emptied", body = V2OkDto),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn clear_cart(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<V2OkDto>> {
    cart_service::clear_cart(&state, &user).await?;
    Ok(Json(V2OkDto { ok: true }))
}
