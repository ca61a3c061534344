use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::answers::{Column as AnswerColumn, Entity as Answers},
    entity::categories::{Entity as Categories, Model as CategoryModel},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    entity::questions::{Column as QuestionColumn, Entity as Questions},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::encode_specs,
    money::decimal_to_cents,
    routes::params::{ProductListQuery, ProductSort},
    state::AppState,
};

pub async fn search_products(
    state: &AppState,
    query: &ProductListQuery,
) -> AppResult<Vec<(ProductModel, Option<CategoryModel>)>> {
    let mut condition = Condition::all();

    if let Some(category_id) = query.category_id {
        condition = condition.add(Column::CategoryId.eq(category_id));
    }

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(decimal_to_cents(min_price)));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(decimal_to_cents(max_price)));
    }

    if let Some(in_stock) = query.in_stock {
        condition = condition.add(if in_stock {
            Column::Stock.gt(0)
        } else {
            Column::Stock.eq(0)
        });
    }

    let finder = Products::find().filter(condition);
    let finder = match query.sort.unwrap_or(ProductSort::Newest) {
        ProductSort::PriceAsc => finder.order_by_asc(Column::Price),
        ProductSort::PriceDesc => finder.order_by_desc(Column::Price),
        ProductSort::Newest => finder.order_by_desc(Column::CreatedAt),
    };

    let products = finder.all(&state.orm).await?;
    let categories = load_categories(state, &products).await?;

    Ok(products
        .into_iter()
        .map(|p| {
            let category = categories.get(&p.category_id).cloned();
            (p, category)
        })
        .collect())
}

pub async fn get_product(
    state: &AppState,
    id: Uuid,
) -> AppResult<(ProductModel, Option<CategoryModel>)> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let category = Categories::find_by_id(product.category_id)
        .one(&state.orm)
        .await?;

    Ok((product, category))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<(ProductModel, Option<CategoryModel>)> {
    ensure_admin(user)?;
    payload.validate()?;

    let category = Categories::find_by_id(payload.category_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest("Category not found".to_string()))?;

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(Some(payload.description)),
        price: Set(decimal_to_cents(payload.price)),
        stock: Set(payload.stock),
        category_id: Set(payload.category_id),
        image_url: Set(payload.image_url),
        specs: Set(payload.specs.as_ref().map(encode_specs)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await;

    Ok((product, Some(category)))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<(ProductModel, Option<CategoryModel>)> {
    ensure_admin(user)?;
    payload.validate()?;

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if let Some(category_id) = payload.category_id {
        let exists = Categories::find_by_id(category_id).one(&state.orm).await?;
        if exists.is_none() {
            return Err(AppError::BadRequest("Category not found".to_string()));
        }
    }

    let mut active: ActiveModel = existing.clone().into();
    let mut changed = false;
    if let Some(name) = payload.name {
        active.name = Set(name);
        changed = true;
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
        changed = true;
    }
    if let Some(price) = payload.price {
        active.price = Set(decimal_to_cents(price));
        changed = true;
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
        changed = true;
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
        changed = true;
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
        changed = true;
    }
    if let Some(specs) = payload.specs.as_ref() {
        active.specs = Set(Some(encode_specs(specs)));
        changed = true;
    }

    // An empty payload would otherwise produce an UPDATE with no columns.
    let product = if changed {
        active.update(&state.orm).await?
    } else {
        existing
    };
    let category = Categories::find_by_id(product.category_id)
        .one(&state.orm)
        .await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await;

    Ok((product, category))
}

pub async fn delete_product(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    // Question rows cascade with the product, but their answers do not; clear
    // those first so the cascade can run.
    let txn = state.orm.begin().await?;
    let question_ids: Vec<Uuid> = Questions::find()
        .filter(QuestionColumn::ProductId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|q| q.id)
        .collect();
    if !question_ids.is_empty() {
        Answers::delete_many()
            .filter(AnswerColumn::QuestionId.is_in(question_ids))
            .exec(&txn)
            .await?;
    }

    let result = Products::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Product not found".to_string()));
    }
    txn.commit().await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await;

    Ok(())
}

/// Batch-load the categories referenced by a product set.
pub(crate) async fn load_categories(
    state: &AppState,
    products: &[ProductModel],
) -> AppResult<HashMap<Uuid, CategoryModel>> {
    let mut ids: Vec<Uuid> = products.iter().map(|p| p.category_id).collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let categories = Categories::find()
        .filter(crate::entity::categories::Column::Id.is_in(ids))
        .all(&state.orm)
        .await?;

    Ok(categories.into_iter().map(|c| (c.id, c)).collect())
}
