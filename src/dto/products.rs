use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::categories::CategoryDto;
use crate::entity::{categories, products};
use crate::models::decode_specs;
use crate::money::cents_to_decimal;

/// Product as the API exposes it: decimal price, decoded specs, category
/// embedded where the caller loaded it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
    pub image_url: Option<String>,
    pub specs: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

impl ProductDto {
    pub fn from_entity(model: products::Model, category: Option<categories::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: cents_to_decimal(model.price),
            stock: model.stock,
            category_id: model.category_id,
            category: category.map(CategoryDto::from),
            image_url: model.image_url,
            specs: decode_specs(model.specs.as_deref()),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<ProductDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    /// Decimal amount; stored as cents.
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    pub category_id: Uuid,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
    pub image_url: Option<String>,
    pub specs: Option<JsonValue>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub category_id: Option<Uuid>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub specs: Option<JsonValue>,
}
