use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::users::{ChangePasswordRequest, UpdateProfileRequest, UpdateRoleRequest},
    entity::answers::{Column as AnswerColumn, Entity as Answers},
    entity::cart_items::{Column as CartColumn, Entity as CartItems},
    entity::order_items::{Column as OrderItemColumn, Entity as OrderItems},
    entity::orders::{Column as OrderColumn, Entity as Orders},
    entity::questions::{Column as QuestionColumn, Entity as Questions},
    entity::reviews::{Column as ReviewColumn, Entity as Reviews},
    entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel},
    entity::wishlist_items::{Column as WishlistColumn, Entity as WishlistItems},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_super_admin},
    models::Role,
    routes::params::UserListQuery,
    services::auth_service::{hash_password, verify_password},
    state::AppState,
};

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: &UserListQuery,
) -> AppResult<Vec<UserModel>> {
    ensure_admin(user)?;

    let mut condition = Condition::all();
    if let Some(role) = query.role.as_ref().filter(|r| !r.is_empty()) {
        condition = condition.add(Column::Role.eq(role.clone()));
    }

    let users = Users::find()
        .filter(condition)
        .order_by_asc(Column::CreatedAt)
        .all(&state.orm)
        .await?;

    Ok(users)
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<UserModel> {
    payload.validate()?;

    let taken = Users::find()
        .filter(Column::Email.eq(payload.email.clone()))
        .filter(Column::Id.ne(user.user_id))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.email = Set(payload.email);
    let updated = active.update(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "profile_update",
        Some("users"),
        None,
    )
    .await;

    Ok(updated)
}

pub async fn change_password(
    state: &AppState,
    user: &AuthUser,
    payload: ChangePasswordRequest,
) -> AppResult<()> {
    payload.validate()?;

    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(&existing.password_hash, &payload.current_password)? {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let hash = hash_password(&payload.new_password)?;
    let mut active: ActiveModel = existing.into();
    active.password_hash = Set(hash);
    active.update(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "password_change",
        Some("users"),
        None,
    )
    .await;

    Ok(())
}

pub async fn update_role(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateRoleRequest,
) -> AppResult<UserModel> {
    ensure_super_admin(user)?;

    let role =
        Role::parse(&payload.role).ok_or_else(|| AppError::BadRequest("Invalid role".to_string()))?;

    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut active: ActiveModel = existing.into();
    active.role = Set(role.as_str().to_string());
    let updated = active.update(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "role_update",
        Some("users"),
        Some(serde_json::json!({ "target_user_id": id, "role": role.as_str() })),
    )
    .await;

    Ok(updated)
}

/// Removes the user and everything they own in one transaction, in FK order.
pub async fn delete_user(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_super_admin(user)?;

    let target = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let txn = state.orm.begin().await?;

    let order_ids: Vec<Uuid> = Orders::find()
        .filter(OrderColumn::UserId.eq(target.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();
    if !order_ids.is_empty() {
        OrderItems::delete_many()
            .filter(OrderItemColumn::OrderId.is_in(order_ids))
            .exec(&txn)
            .await?;
    }
    Orders::delete_many()
        .filter(OrderColumn::UserId.eq(target.id))
        .exec(&txn)
        .await?;

    CartItems::delete_many()
        .filter(CartColumn::UserId.eq(target.id))
        .exec(&txn)
        .await?;
    WishlistItems::delete_many()
        .filter(WishlistColumn::UserId.eq(target.id))
        .exec(&txn)
        .await?;
    Reviews::delete_many()
        .filter(ReviewColumn::UserId.eq(target.id))
        .exec(&txn)
        .await?;

    // Answers the user wrote, plus every answer on the user's questions
    // regardless of author.
    let question_ids: Vec<Uuid> = Questions::find()
        .filter(QuestionColumn::UserId.eq(target.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|q| q.id)
        .collect();
    let mut answer_cond = Condition::any().add(AnswerColumn::UserId.eq(target.id));
    if !question_ids.is_empty() {
        answer_cond = answer_cond.add(AnswerColumn::QuestionId.is_in(question_ids));
    }
    Answers::delete_many().filter(answer_cond).exec(&txn).await?;
    Questions::delete_many()
        .filter(QuestionColumn::UserId.eq(target.id))
        .exec(&txn)
        .await?;

    Users::delete_by_id(target.id).exec(&txn).await?;

    txn.commit().await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "user_delete",
        Some("users"),
        Some(serde_json::json!({ "target_user_id": id })),
    )
    .await;

    Ok(())
}
