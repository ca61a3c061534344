use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::users::UserSummaryDto;
use crate::entity::{reviews, users};
use crate::models::decode_photos;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummaryDto>,
    pub created_at: DateTime<Utc>,
}

impl ReviewDto {
    pub fn from_entity(model: reviews::Model, user: Option<users::Model>) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            rating: model.rating,
            comment: model.comment,
            photos: decode_photos(model.photos.as_deref()),
            user: user.map(UserSummaryDto::from),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewList {
    pub items: Vec<ReviewDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
    pub photos: Option<Vec<String>>,
}
