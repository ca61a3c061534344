use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::v2::{V2CategoryDto, V2ProductDto, V2ProductPage},
    error::AppResult,
    routes::params::{ProductListQuery, V2ProductQuery},
    services::{category_service, product_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/categories", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/v2/products",
    params(
        ("page" = Option<u64>, Query, description = "Page number, starts at 1"),
        ("pageSize" = Option<u64>, Query, description = "Items per page, capped at 100"),
        ("categoryId" = Option<Uuid>, Query, description = "Filter by category"),
        ("q" = Option<String>, Query, description = "Match against name and description"),
    ),
    responses(
        (status = 200, description = "One page of products", body = V2ProductPage),
    ),
    tag = "Mobile v2"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<V2ProductQuery>,
) -> AppResult<Json<V2ProductPage>> {
    let (page, page_size) = query.normalize_paging();
    let filter = ProductListQuery {
        category_id: query.category_id,
        search: query.q,
        min_price: None,
        max_price: None,
        in_stock: None,
        sort: None,
    };

    let products = product_service::search_products(&state, &filter).await?;
    let total = products.len() as i64;
    let items = products
        .into_iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .map(|(product, _)| V2ProductDto::from(product))
        .collect();

    Ok(Json(V2ProductPage {
        items,
        total,
        page: page as i64,
        page_size: page_size as i64,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v2/categories",
    responses(
        (status = 200, description = "All categories", body = [V2CategoryDto]),
    ),
    tag = "Mobile v2"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<V2CategoryDto>>> {
    let categories = category_service::list_categories(&state).await?;
    let items = categories
        .into_iter()
        .map(|(category, _)| V2CategoryDto::from(category))
        .collect();
    Ok(Json(items))
}
