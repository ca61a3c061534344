use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{Validation, decode};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    error::AppError,
    models::Role,
    state::AppState,
};

/// The authenticated caller, decoded from the bearer token. Every protected
/// operation takes this explicitly; nothing reads identity from ambient
/// request state.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

pub fn ensure_roles(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if !allowed.contains(&user.role) {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_roles(user, &[Role::Admin, Role::SuperAdmin])
}

pub fn ensure_super_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_roles(user, &[Role::SuperAdmin])
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let decoded = decode::<Claims>(token, &state.jwt.decoding, &Validation::default())
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

        let role = Role::parse(&decoded.claims.role)
            .ok_or_else(|| AppError::Unauthorized("Unknown role in token".into()))?;

        Ok(AuthUser {
            user_id,
            email: decoded.claims.email.clone(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use sqlx::postgres::PgPoolOptions;

    use crate::db::create_orm_conn;
    use crate::state::{AppState, JwtKeys};

    // Lazy pool: never connects, which is all the extractor needs.
    fn test_state() -> AppState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        AppState {
            orm: create_orm_conn(&pool),
            jwt: JwtKeys::from_secret("extractor-test-secret"),
            pool,
        }
    }

    async fn extract(state: &AppState, header: Option<&str>) -> Result<AuthUser, AppError> {
        let mut builder = Request::builder().uri("/api/orders");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        let (mut parts, _) = builder.body(()).expect("request").into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = test_state();
        let err = extract(&state, None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let state = test_state();
        let err = extract(&state, Some("Bearer not-a-token")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = extract(&state, Some("Basic abc")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn valid_bearer_token_decodes() {
        let state = test_state();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "probe@example.com".to_string(),
            role: "USER".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &state.jwt.encoding,
        )
        .expect("encode");

        let user = extract(&state, Some(&format!("Bearer {token}")))
            .await
            .expect("extract");
        assert_eq!(user.email, "probe@example.com");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn role_gate_rejects_plain_users() {
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            email: "probe@example.com".to_string(),
            role: Role::User,
        };
        assert!(matches!(
            ensure_admin(&user),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_super_admin(&user),
            Err(AppError::Forbidden(_))
        ));

        let admin = AuthUser { role: Role::Admin, ..user };
        assert!(ensure_admin(&admin).is_ok());
        assert!(matches!(
            ensure_super_admin(&admin),
            Err(AppError::Forbidden(_))
        ));
    }
}
