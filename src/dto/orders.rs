use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::products::ProductDto;
use crate::dto::users::UserDto;
use crate::money::cents_to_decimal;
use crate::services::order_service::{OrderItemRecord, OrderRecord};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Price frozen at order creation, in decimal.
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
}

impl From<OrderItemRecord> for OrderItemDto {
    fn from(record: OrderItemRecord) -> Self {
        Self {
            id: record.item.id,
            product_id: record.item.product_id,
            quantity: record.item.quantity,
            unit_price: cents_to_decimal(record.item.unit_price),
            product: record.product.map(|p| ProductDto::from_entity(p, None)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total: f64,
    pub status: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub items: Vec<OrderItemDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRecord> for OrderDto {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.order.id,
            user_id: record.order.user_id,
            total: cents_to_decimal(record.order.total),
            status: record.order.status,
            address: record.order.address,
            phone: record.order.phone,
            items: record.items.into_iter().map(OrderItemDto::from).collect(),
            user: record.user.map(UserDto::from),
            created_at: record.order.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderDto>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<OrderLineRequest>,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub status: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}
