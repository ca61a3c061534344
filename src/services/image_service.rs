use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::images::UploadImageRequest,
    entity::images::{ActiveModel, Column, Entity as Images, Model as ImageModel},
    error::{AppError, AppResult},
    state::AppState,
};

/// Stores the decoded bytes under `name`, replacing any previous upload with
/// the same name.
pub async fn upsert_image(
    state: &AppState,
    payload: UploadImageRequest,
) -> AppResult<ImageModel> {
    payload.validate()?;

    // Clients often send the full `data:image/png;base64,...` URL; keep only
    // the payload after the last comma.
    let encoded = payload
        .base64
        .rsplit(',')
        .next()
        .unwrap_or(payload.base64.as_str());
    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::BadRequest("Invalid base64 data".to_string()))?;

    let existing = Images::find()
        .filter(Column::Name.eq(payload.name.clone()))
        .one(&state.orm)
        .await?;

    let image = match existing {
        Some(image) => {
            let mut active: ActiveModel = image.into();
            active.content_type = Set(payload.content_type);
            active.data = Set(data);
            active.update(&state.orm).await?
        }
        None => {
            ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(payload.name),
                content_type: Set(payload.content_type),
                data: Set(data),
                created_at: NotSet,
            }
            .insert(&state.orm)
            .await?
        }
    };

    log_audit(
        &state.pool,
        None,
        "image_upload",
        Some("images"),
        Some(serde_json::json!({ "name": image.name })),
    )
    .await;

    Ok(image)
}

pub async fn get_image(state: &AppState, name: &str) -> AppResult<ImageModel> {
    Images::find()
        .filter(Column::Name.eq(name))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))
}
