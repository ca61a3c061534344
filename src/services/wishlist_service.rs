use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::categories::Model as CategoryModel,
    entity::products::{Column as ProductColumn, Entity as Products, Model as ProductModel},
    entity::wishlist_items::{
        ActiveModel, Column, Entity as WishlistItems, Model as WishlistItemModel,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    services::product_service::load_categories,
    state::AppState,
};

/// A wishlist row joined with its product and the product's category.
pub struct WishlistEntry {
    pub item: WishlistItemModel,
    pub product: ProductModel,
    pub category: Option<CategoryModel>,
}

pub async fn list_wishlist(state: &AppState, user: &AuthUser) -> AppResult<Vec<WishlistEntry>> {
    let items = WishlistItems::find()
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

    let product_list: Vec<ProductModel> = products.values().cloned().collect();
    let categories = load_categories(state, &product_list).await?;

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        // Product deletes cascade into wishlists; skip rows whose product
        // vanished between the two queries.
        if let Some(product) = products.remove(&item.product_id) {
            let category = categories.get(&product.category_id).cloned();
            entries.push(WishlistEntry {
                item,
                product,
                category,
            });
        }
    }

    Ok(entries)
}

/// Returns whether the product is on the wishlist after the call.
pub async fn toggle(state: &AppState, user: &AuthUser, product_id: Uuid) -> AppResult<bool> {
    Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let existing = WishlistItems::find()
        .filter(Column::UserId.eq(user.user_id))
        .filter(Column::ProductId.eq(product_id))
        .one(&state.orm)
        .await?;

    if let Some(item) = existing {
        WishlistItems::delete_by_id(item.id).exec(&state.orm).await?;

        log_audit(
            &state.pool,
            Some(user.user_id),
            "wishlist_remove",
            Some("wishlist_items"),
            Some(serde_json::json!({ "product_id": product_id })),
        )
        .await;

        return Ok(false);
    }

    ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(product_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "wishlist_add",
        Some("wishlist_items"),
        Some(serde_json::json!({ "product_id": product_id })),
    )
    .await;

    Ok(true)
}

/// Removing a product that is not wished is a no-op.
pub async fn remove(state: &AppState, user: &AuthUser, product_id: Uuid) -> AppResult<()> {
    WishlistItems::delete_many()
        .filter(Column::UserId.eq(user.user_id))
        .filter(Column::ProductId.eq(product_id))
        .exec(&state.orm)
        .await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "wishlist_remove",
        Some("wishlist_items"),
        Some(serde_json::json!({ "product_id": product_id })),
    )
    .await;

    Ok(())
}
