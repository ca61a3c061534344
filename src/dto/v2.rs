//! Mobile API types. v2 responses skip the `ApiResponse` wrapper and use
//! string ids with integer cent amounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entity::{cart_items, categories, products, reviews, users};
use crate::models::{decode_photos, decode_specs};
use crate::services::order_service::OrderRecord;
use crate::services::wishlist_service::WishlistEntry;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for V2UserDto {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl V2Tokens {
    /// Both slots carry the same token until a real refresh flow exists.
    pub fn from_single(token: String) -> Self {
        Self {
            access_token: token.clone(),
            refresh_token: token,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct V2AuthResponse {
    pub tokens: V2Tokens,
    pub user: V2UserDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct V2RegisterRequest {
    pub name: Option<String>,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2ProductDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
    pub category_id: String,
    pub image_url: Option<String>,
    pub specs: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for V2ProductDto {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            description: model.description,
            price_cents: model.price,
            stock: model.stock,
            category_id: model.category_id.to_string(),
            image_url: model.image_url,
            specs: decode_specs(model.specs.as_deref()),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2ProductPage {
    pub items: Vec<V2ProductDto>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2CategoryDto {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<categories::Model> for V2CategoryDto {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            image_url: model.image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2CartItemDto {
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
    pub product: V2ProductDto,
    pub created_at: DateTime<Utc>,
}

impl V2CartItemDto {
    pub fn from_entity(item: cart_items::Model, product: products::Model) -> Self {
        Self {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            quantity: item.quantity,
            product: V2ProductDto::from(product),
            created_at: item.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2CartDto {
    pub items: Vec<V2CartItemDto>,
    pub total_cents: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2UpdateCartRequest {
    pub item_id: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2RemoveCartRequest {
    pub item_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2OrderItemDto {
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<V2ProductDto>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2OrderDto {
    pub id: String,
    pub total_cents: i64,
    pub status: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub items: Vec<V2OrderItemDto>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRecord> for V2OrderDto {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.order.id.to_string(),
            total_cents: record.order.total,
            status: record.order.status,
            address: record.order.address,
            phone: record.order.phone,
            items: record
                .items
                .into_iter()
                .map(|r| V2OrderItemDto {
                    id: r.item.id.to_string(),
                    product_id: r.item.product_id.to_string(),
                    quantity: r.item.quantity,
                    unit_price_cents: r.item.unit_price,
                    product: r.product.map(V2ProductDto::from),
                })
                .collect(),
            created_at: record.order.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct V2UserSummaryDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2ReviewDto {
    pub id: String,
    pub product_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<V2UserSummaryDto>,
    pub created_at: DateTime<Utc>,
}

impl V2ReviewDto {
    pub fn from_entity(model: reviews::Model, user: Option<users::Model>) -> Self {
        Self {
            id: model.id.to_string(),
            product_id: model.product_id.to_string(),
            rating: model.rating,
            comment: model.comment,
            photos: decode_photos(model.photos.as_deref()),
            user: user.map(|u| V2UserSummaryDto {
                id: u.id.to_string(),
                name: u.name,
            }),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct V2ReviewRequest {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2WishlistItemDto {
    pub id: String,
    pub product: V2ProductDto,
    pub created_at: DateTime<Utc>,
}

impl From<WishlistEntry> for V2WishlistItemDto {
    fn from(entry: WishlistEntry) -> Self {
        Self {
            id: entry.item.id.to_string(),
            product: V2ProductDto::from(entry.product),
            created_at: entry.item.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2ToggleRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct V2OkDto {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product_model() -> products::Model {
        products::Model {
            id: Uuid::new_v4(),
            name: "Board".to_string(),
            description: Some("Tenkeyless".to_string()),
            price: 12999,
            stock: 3,
            category_id: Uuid::new_v4(),
            image_url: None,
            specs: Some(r#"{"layout":"TKL"}"#.to_string()),
            created_at: chrono::Utc
                .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .unwrap()
                .into(),
        }
    }

    #[test]
    fn product_maps_to_string_ids_and_cents() {
        let model = product_model();
        let id = model.id;
        let category_id = model.category_id;

        let dto = V2ProductDto::from(model);
        assert_eq!(dto.id, id.to_string());
        assert_eq!(dto.category_id, category_id.to_string());
        assert_eq!(dto.price_cents, 12999);
        assert_eq!(dto.specs, Some(serde_json::json!({"layout": "TKL"})));
    }

    #[test]
    fn malformed_specs_vanish_from_the_dto() {
        let mut model = product_model();
        model.specs = Some("{broken".to_string());
        assert_eq!(V2ProductDto::from(model).specs, None);
    }

    #[test]
    fn tokens_fill_both_slots() {
        let tokens = V2Tokens::from_single("abc".to_string());
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token, "abc");
    }
}
