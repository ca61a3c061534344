use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::products::ProductDto;
use crate::entity::{cart_items, products};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub product: ProductDto,
    pub created_at: DateTime<Utc>,
}

impl CartItemDto {
    pub fn from_entity(item: cart_items::Model, product: products::Model) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            product: ProductDto::from_entity(product, None),
            created_at: item.created_at.with_timezone(&Utc),
        }
    }
}

/// Cart snapshot: rows plus a subtotal computed from live product prices.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartDto {
    pub items: Vec<CartItemDto>,
    pub total: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// Zero or less removes the item.
    pub quantity: i32,
}
