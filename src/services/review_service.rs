use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::reviews::CreateReviewRequest,
    entity::products::Entity as Products,
    entity::reviews::{ActiveModel, Column, Entity as Reviews, Model as ReviewModel},
    entity::users::{Column as UserColumn, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::encode_photos,
    state::AppState,
};

pub async fn list_reviews(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<Vec<(ReviewModel, Option<UserModel>)>> {
    let reviews = Reviews::find()
        .filter(Column::ProductId.eq(product_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let users = load_authors(state, reviews.iter().map(|r| r.user_id)).await?;

    Ok(reviews
        .into_iter()
        .map(|review| {
            let author = users.get(&review.user_id).cloned();
            (review, author)
        })
        .collect())
}

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    payload: CreateReviewRequest,
) -> AppResult<(ReviewModel, Option<UserModel>)> {
    payload.validate()?;

    Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let review = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        photos: Set(payload.photos.as_deref().map(encode_photos)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let author = Users::find_by_id(user.user_id).one(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "review_create",
        Some("reviews"),
        Some(serde_json::json!({
            "review_id": review.id,
            "product_id": review.product_id,
        })),
    )
    .await;

    Ok((review, author))
}

pub async fn delete_review(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let review = Reviews::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    if review.user_id != user.user_id {
        return Err(AppError::Forbidden(
            "You can only delete your own reviews".to_string(),
        ));
    }

    Reviews::delete_by_id(review.id).exec(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "review_delete",
        Some("reviews"),
        Some(serde_json::json!({ "review_id": id })),
    )
    .await;

    Ok(())
}

async fn load_authors(
    state: &AppState,
    ids: impl Iterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, UserModel>> {
    let mut user_ids: Vec<Uuid> = ids.collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let mut users = HashMap::new();
    if !user_ids.is_empty() {
        for user in Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&state.orm)
            .await?
        {
            users.insert(user.id, user);
        }
    }
    Ok(users)
}
