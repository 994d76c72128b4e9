use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use uuid::Uuid;

use crate::auth::jwt;
use crate::errors::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Unauthorized("No authentication token, access denied".to_string())
            })?;

        let user_id = jwt::verify_token(token, &state.config.jwt_secret)?;
        Ok(AuthUser { id: user_id })
    }
}
