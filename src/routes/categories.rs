use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::categories::{
        CategoryDto, CategoryList, CategoryWithProductsDto, CreateCategoryRequest,
        UpdateCategoryRequest,
    },
    dto::products::ProductDto,
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List categories with their products", body = ApiResponse<CategoryList>),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let categories = category_service::list_categories(&state).await?;
    let total = categories.len() as i64;
    let items = categories
        .into_iter()
        .map(|(category, products)| {
            let products = products
                .into_iter()
                .map(|p| ProductDto::from_entity(p, None))
                .collect();
            CategoryWithProductsDto::from_entity(category, products)
        })
        .collect();
    Ok(Json(ApiResponse::paginated(
        "Categories",
        CategoryList { items },
        1,
        total,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<CategoryWithProductsDto>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CategoryWithProductsDto>>> {
    let (category, products) = category_service::get_category(&state, id).await?;
    let products = products
        .into_iter()
        .map(|p| ProductDto::from_entity(p, None))
        .collect();
    Ok(Json(ApiResponse::success(
        "Category",
        CategoryWithProductsDto::from_entity(category, products),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Create category", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Duplicate name or invalid payload"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<CategoryDto>>> {
    let category = category_service::create_category(&state, &user, payload).await?;
    Ok(Json(ApiResponse::success(
        "Category created",
        CategoryDto::from(category),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Update category", body = ApiResponse<CategoryDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<Json<ApiResponse<CategoryDto>>> {
    let category = category_service::update_category(&state, &user, id, payload).await?;
    Ok(Json(ApiResponse::success(
        "Updated",
        CategoryDto::from(category),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Delete category"),
        (status = 400, description = "Category still has products"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    category_service::delete_category(&state, &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
