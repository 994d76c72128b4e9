//! Bearer token signing and verification (HS256).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
}

/// Issues a token for the user, valid for seven days.
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, AppError> {
    let expires_at = Utc::now()
        .checked_add_signed(Duration::days(TOKEN_TTL_DAYS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Token expiry overflows")))?;
    sign_with_expiry(user_id, secret, expires_at)
}

fn sign_with_expiry(
    user_id: Uuid,
    secret: &str,
    expires_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign token: {e}")))
}

/// Verifies a token and returns the user id it was issued for.
/// Expired, tampered and foreign-secret tokens all read as unauthorized.
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .map_err(|_| AppError::Unauthorized("Token is not valid".to_string()))
}
