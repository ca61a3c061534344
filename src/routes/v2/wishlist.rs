use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::v2::{V2OkDto, V2ToggleRequest, V2WishlistItemDto},
    dto::wishlist::ToggleResultDto,
    error::AppResult,
    middleware::auth::AuthUser,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist))
        .route("/toggle", post(toggle))
        .route("/{product_id}", delete(remove))
}

#[utoipa::path(
    get,
    path = "/api/v2/wishlist",
    responses(
        (status = 200, description = "Wished products, newest first", body = [V2WishlistItemDto]),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<V2WishlistItemDto>>> {
    let entries = wishlist_service::list_wishlist(&state, &user).await?;
    Ok(Json(
        entries.into_iter().map(V2WishlistItemDto::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v2/wishlist/toggle",
    request_body = V2ToggleRequest,
    responses(
        (status = 200, description = "State after the toggle", body = ToggleResultDto),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn toggle(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<V2ToggleRequest>,
) -> AppResult<Json<ToggleResultDto>> {
    let wished = wishlist_service::toggle(&state, &user, payload.product_id).await?;
    Ok(Json(ToggleResultDto { wished }))
}

#[utoipa::path(
    delete,
    path = "/api/v2/wishlist/{productId}",
    params(("productId" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Removed if present", body = V2OkDto),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<V2OkDto>> {
    wishlist_service::remove(&state, &user, product_id).await?;
    Ok(Json(V2OkDto { ok: true }))
}
