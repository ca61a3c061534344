use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::products::ProductDto;
use crate::services::wishlist_service::WishlistEntry;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product: ProductDto,
    pub created_at: DateTime<Utc>,
}

impl From<WishlistEntry> for WishlistItemDto {
    fn from(entry: WishlistEntry) -> Self {
        Self {
            id: entry.item.id,
            product_id: entry.item.product_id,
            product: ProductDto::from_entity(entry.product, entry.category),
            created_at: entry.item.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistList {
    pub items: Vec<WishlistItemDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleWishlistRequest {
    pub product_id: Uuid,
}

/// Result of a toggle: whether the product is wished after the call.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleResultDto {
    pub wished: bool,
}
