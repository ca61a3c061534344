use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entity::images;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub content_type: Option<String>,
    /// Base64 payload; a `data:...;base64,` prefix is tolerated.
    pub base64: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageMetaDto {
    pub id: Uuid,
    pub name: String,
}

impl From<images::Model> for ImageMetaDto {
    fn from(model: images::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
