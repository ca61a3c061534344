use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewDto, ReviewList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    // GET takes a product id, DELETE a review id; one pattern serves both.
    Router::new()
        .route("/", post(create_review))
        .route("/{id}", get(list_reviews).delete(delete_review))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{productId}",
    params(
        ("productId" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Reviews for a product, newest first", body = ApiResponse<ReviewList>),
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let reviews = review_service::list_reviews(&state, product_id).await?;
    let total = reviews.len() as i64;
    let items = reviews
        .into_iter()
        .map(|(review, author)| ReviewDto::from_entity(review, author))
        .collect();
    Ok(Json(ApiResponse::paginated(
        "Reviews",
        ReviewList { items },
        1,
        total,
        total,
    )))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created", body = ApiResponse<ReviewDto>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<ApiResponse<ReviewDto>>> {
    let (review, author) = review_service::create_review(&state, &user, payload).await?;
    Ok(Json(ApiResponse::success(
        "Review created",
        ReviewDto::from_entity(review, author),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID"),
    ),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    review_service::delete_review(&state, &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
