use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::categories::{CreateCategoryRequest, UpdateCategoryRequest},
    entity::categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
    entity::products::{Column as ProductColumn, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
) -> AppResult<Vec<(CategoryModel, Vec<ProductModel>)>> {
    let categories = Categories::find()
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
    let mut grouped: HashMap<Uuid, Vec<ProductModel>> = HashMap::new();
    if !ids.is_empty() {
        let products = Products::find()
            .filter(ProductColumn::CategoryId.is_in(ids))
            .all(&state.orm)
            .await?;
        for product in products {
            grouped.entry(product.category_id).or_default().push(product);
        }
    }

    Ok(categories
        .into_iter()
        .map(|c| {
            let products = grouped.remove(&c.id).unwrap_or_default();
            (c, products)
        })
        .collect())
}

pub async fn get_category(
    state: &AppState,
    id: Uuid,
) -> AppResult<(CategoryModel, Vec<ProductModel>)> {
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let products = Products::find()
        .filter(ProductColumn::CategoryId.eq(id))
        .all(&state.orm)
        .await?;

    Ok((category, products))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<CategoryModel> {
    ensure_admin(user)?;
    payload.validate()?;

    let category = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        image_url: Set(payload.image_url),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "category_create",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await;

    Ok(category)
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<CategoryModel> {
    ensure_admin(user)?;

    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let mut active: ActiveModel = existing.clone().into();
    let mut changed = false;
    if let Some(name) = payload.name {
        active.name = Set(name);
        changed = true;
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
        changed = true;
    }

    // An empty payload would otherwise produce an UPDATE with no columns.
    let category = if changed {
        active.update(&state.orm).await?
    } else {
        existing
    };

    log_audit(
        &state.pool,
        Some(user.user_id),
        "category_update",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await;

    Ok(category)
}

pub async fn delete_category(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let product_count = Products::find()
        .filter(ProductColumn::CategoryId.eq(id))
        .count(&state.orm)
        .await?;
    if product_count > 0 {
        return Err(AppError::BadRequest(
            "Category still has products".to_string(),
        ));
    }

    Categories::delete_by_id(category.id).exec(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "category_delete",
        Some("categories"),
        Some(serde_json::json!({ "category_id": id })),
    )
    .await;

    Ok(())
}
