use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::reviews::CreateReviewRequest,
    dto::v2::{V2ReviewDto, V2ReviewRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{product_id}", get(list_reviews).post(create_review))
}

#[utoipa::path(
    get,
    path = "/api/v2/reviews/{productId}",
    params(("productId" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Reviews, newest first", body = [V2ReviewDto]),
    ),
    tag = "Mobile v2"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<V2ReviewDto>>> {
    let reviews = review_service::list_reviews(&state, product_id).await?;
    let items = reviews
        .into_iter()
        .map(|(review, user)| V2ReviewDto::from_entity(review, user))
        .collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/v2/reviews/{productId}",
    params(("productId" = Uuid, Path, description = "Product id")),
    request_body = V2ReviewRequest,
    responses(
        (status = 200, description = "Created review", body = V2ReviewDto),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<V2ReviewRequest>,
) -> AppResult<Json<V2ReviewDto>> {
    let (review, author) = review_service::create_review(
        &state,
        &user,
        CreateReviewRequest {
            product_id,
            rating: payload.rating,
            comment: payload.comment,
            photos: None,
        },
    )
    .await?;
    Ok(Json(V2ReviewDto::from_entity(review, author)))
}
