//! Password policy and bcrypt hashing.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::AppError;

const MIN_PASSWORD_LEN: usize = 12;
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Checks the registration password policy: minimum length, at least one
/// uppercase letter, at least one special character.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long."
        )));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::Validation(
            "Password must contain at least one uppercase letter.".to_string(),
        ));
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(AppError::Validation(
            "Password must contain at least one special character (!@#$%^&* etc.).".to_string(),
        ));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to verify password: {e}")))
}
