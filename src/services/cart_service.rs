use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::cart::{AddToCartRequest, UpdateQuantityRequest},
    entity::cart_items::{ActiveModel, Column, Entity as CartItems, Model as CartItemModel},
    entity::products::{Column as ProductColumn, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    state::AppState,
};

pub async fn get_cart(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<(Vec<(CartItemModel, ProductModel)>, i64)> {
    let items = CartItems::find()
        .filter(Column::UserId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
    let mut products: HashMap<Uuid, ProductModel> = HashMap::new();
    if !product_ids.is_empty() {
        for product in Products::find()
            .filter(ProductColumn::Id.is_in(product_ids))
            .all(&state.orm)
            .await?
        {
            products.insert(product.id, product);
        }
    }

    let mut total: i64 = 0;
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        // Product deletes cascade into carts, so a row can vanish between the
        // two queries; skip orphaned entries.
        if let Some(product) = products.remove(&item.product_id) {
            total += product.price * i64::from(item.quantity);
            entries.push((item, product));
        }
    }

    Ok((entries, total))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<(CartItemModel, ProductModel)> {
    payload.validate()?;

    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id),
        quantity: Set(payload.quantity),
        created_at: NotSet,
    };

    // Re-adding a product folds into the existing row instead of tripping the
    // (user_id, product_id) unique index.
    let item = CartItems::insert(active)
        .on_conflict(
            OnConflict::columns([Column::UserId, Column::ProductId])
                .value(
                    Column::Quantity,
                    Expr::col((CartItems, Column::Quantity)).add(payload.quantity),
                )
                .to_owned(),
        )
        .exec_with_returning(&state.orm)
        .await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "cart_add",
        Some("cart_items"),
        Some(serde_json::json!({
            "product_id": payload.product_id,
            "quantity": payload.quantity,
        })),
    )
    .await;

    Ok((item, product))
}

/// Returns `None` when the requested quantity drops to zero or below and the
/// row was removed instead.
pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    item_id: Uuid,
    payload: UpdateQuantityRequest,
) -> AppResult<Option<(CartItemModel, ProductModel)>> {
    let item = CartItems::find()
        .filter(Column::Id.eq(item_id))
        .filter(Column::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

    if payload.quantity <= 0 {
        CartItems::delete_by_id(item.id).exec(&state.orm).await?;

        log_audit(
            &state.pool,
            Some(user.user_id),
            "cart_remove",
            Some("cart_items"),
            Some(serde_json::json!({ "cart_item_id": item_id })),
        )
        .await;

        return Ok(None);
    }

    let product_id = item.product_id;
    let mut active: ActiveModel = item.into();
    active.quantity = Set(payload.quantity);
    let item = active.update(&state.orm).await?;

    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "cart_update",
        Some("cart_items"),
        Some(serde_json::json!({
            "cart_item_id": item_id,
            "quantity": payload.quantity,
        })),
    )
    .await;

    Ok(Some((item, product)))
}

pub async fn remove_item(state: &AppState, user: &AuthUser, item_id: Uuid) -> AppResult<()> {
    let result = CartItems::delete_many()
        .filter(Column::Id.eq(item_id))
        .filter(Column::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Cart item not found".to_string()));
    }

    log_audit(
        &state.pool,
        Some(user.user_id),
        "cart_remove",
        Some("cart_items"),
        Some(serde_json::json!({ "cart_item_id": item_id })),
    )
    .await;

    Ok(())
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<()> {
    CartItems::delete_many()
        .filter(Column::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "cart_clear",
        Some("cart_items"),
        None,
    )
    .await;

    Ok(())
}
