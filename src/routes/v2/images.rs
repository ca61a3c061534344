use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    dto::images::{ImageMetaDto, UploadImageRequest},
    error::AppResult,
    services::image_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_image))
        .route("/{name}", get(get_image))
}

#[utoipa::path(
    post,
    path = "/api/v2/images",
    request_body = UploadImageRequest,
    responses(
        (status = 200, description = "Stored image", body = ImageMetaDto),
        (status = 400, description = "Invalid base64 data"),
    ),
    tag = "Mobile v2"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Json(payload): Json<UploadImageRequest>,
) -> AppResult<Json<ImageMetaDto>> {
    let image = image_service::upsert_image(&state, payload).await?;
    Ok(Json(ImageMetaDto::from(image)))
}

#[utoipa::path(
    get,
    path = "/api/v2/images/{name}",
    params(("name" = String, Path, description = "Image name")),
    responses(
        (status = 200, description = "Raw image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Image not found"),
    ),
    tag = "Mobile v2"
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let image = image_service::get_image(&state, &name).await?;

    let mut headers = HeaderMap::new();
    let content_type = image
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    headers.insert(header::CONTENT_TYPE, content_type);
    // Names are stable per upload; let clients cache hard.
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );
    Ok((headers, image.data))
}
