use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::wishlist::{ToggleResultDto, ToggleWishlistRequest, WishlistItemDto, WishlistList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
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
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Wishlist with products", body = ApiResponse<WishlistList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<WishlistList>>> {
    let entries = wishlist_service::list_wishlist(&state, &user).await?;
    let total = entries.len() as i64;
    let items = entries.into_iter().map(WishlistItemDto::from).collect();
    Ok(Json(ApiResponse::paginated(
        "Wishlist",
        WishlistList { items },
        1,
        total,
        total,
    )))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/toggle",
    request_body = ToggleWishlistRequest,
    responses(
        (status = 200, description = "Toggled; `wished` reports the state after the call", body = ApiResponse<ToggleResultDto>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn toggle(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ToggleWishlistRequest>,
) -> AppResult<Json<ApiResponse<ToggleResultDto>>> {
    let wished = wishlist_service::toggle(&state, &user, payload.product_id).await?;
    let message = if wished {
        "Added to wishlist"
    } else {
        "Removed from wishlist"
    };
    Ok(Json(ApiResponse::success(
        message,
        ToggleResultDto { wished },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{productId}",
    params(
        ("productId" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Removed; no-op when the product was not wished"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    wishlist_service::remove(&state, &user, product_id).await?;
    Ok(Json(ApiResponse::success(
        "Removed from wishlist",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
