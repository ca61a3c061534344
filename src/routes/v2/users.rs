use axum::{Json, Router, extract::State, routing::patch};

use crate::{
    dto::users::UpdateProfileRequest,
    dto::v2::V2UserDto,
    error::AppResult,
    middleware::auth::AuthUser,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/me", patch(update_me))
}

#[utoipa::path(
    patch,
    path = "/api/v2/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = V2UserDto),
        (status = 400, description = "Email is already taken"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<V2UserDto>> {
    let updated = user_service::update_profile(&state, &user, payload).await?;
    Ok(Json(V2UserDto::from(updated)))
}
