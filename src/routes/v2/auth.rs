use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};

use crate::{
    dto::auth::{LoginRequest, RegisterRequest},
    dto::users::ChangePasswordRequest,
    dto::v2::{V2AuthResponse, V2OkDto, V2RefreshRequest, V2RegisterRequest, V2Tokens, V2UserDto},
    error::AppResult,
    middleware::auth::AuthUser,
    services::{auth_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
        .route("/password", put(change_password))
}

#[utoipa::path(
    post,
    path = "/api/v2/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens and profile", body = V2AuthResponse),
        (status = 400, description = "Invalid email or password"),
    ),
    tag = "Mobile v2"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<V2AuthResponse>> {
    let (user, token) = auth_service::login(&state, payload).await?;
    Ok(Json(V2AuthResponse {
        tokens: V2Tokens::from_single(token),
        user: V2UserDto::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v2/auth/register",
    request_body = V2RegisterRequest,
    responses(
        (status = 201, description = "Tokens and profile", body = V2AuthResponse),
        (status = 400, description = "Email already registered or invalid input"),
    ),
    tag = "Mobile v2"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<V2RegisterRequest>,
) -> AppResult<Json<V2AuthResponse>> {
    // Mobile signup may omit the name; fall back to the email local part.
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| {
            payload
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        });
    let (user, token) = auth_service::register(
        &state,
        RegisterRequest {
            name,
            email: payload.email,
            password: payload.password,
        },
    )
    .await?;
    Ok(Json(V2AuthResponse {
        tokens: V2Tokens::from_single(token),
        user: V2UserDto::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v2/auth/refresh",
    request_body = V2RefreshRequest,
    responses(
        (status = 200, description = "Fresh tokens", body = V2AuthResponse),
        (status = 401, description = "Invalid or expired token"),
    ),
    tag = "Mobile v2"
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<V2RefreshRequest>,
) -> AppResult<Json<V2AuthResponse>> {
    let (user, token) = auth_service::refresh(&state, &payload.refresh_token).await?;
    Ok(Json(V2AuthResponse {
        tokens: V2Tokens::from_single(token),
        user: V2UserDto::from(user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v2/auth/me",
    responses(
        (status = 200, description = "Current profile", body = V2UserDto),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<V2UserDto>> {
    let profile = auth_service::current_user(&state, &user).await?;
    Ok(Json(V2UserDto::from(profile)))
}

#[utoipa::path(
    put,
    path = "/api/v2/auth/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = V2OkDto),
        (status = 401, description = "Current password is incorrect"),
    ),
    security(("bearer_auth" = [])),
    tag = "Mobile v2"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<V2OkDto>> {
    user_service::change_password(&state, &user, payload).await?;
    Ok(Json(V2OkDto { ok: true }))
}
