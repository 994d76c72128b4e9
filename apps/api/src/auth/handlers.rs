use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::auth::jwt;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::db;
use crate::errors::AppError;
use crate::models::user::{CandidateProfileRow, UserPublic, UserRow};
use crate::state::AppState;

const DUPLICATE_EMAIL: &str = "An account with this email already exists. Please sign in instead.";

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserPublic,
    pub token: String,
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Please provide all required fields: name, email, and password.".to_string(),
        ));
    }
    validate_password(&req.password)?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    // The user row and its empty profile land together or not at all.
    let mut tx = state.db.begin().await?;
    let user: UserRow =
        sqlx::query_as("INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *")
            .bind(&name)
            .bind(&email)
            .bind(&password_hash)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                // A concurrent registration can still win the race past the
                // pre-check; the unique index settles it.
                if db::is_unique_violation(&e) {
                    AppError::Conflict(DUPLICATE_EMAIL.to_string())
                } else {
                    AppError::from(e)
                }
            })?;
    sqlx::query("INSERT INTO candidate_profiles (user_id) VALUES ($1)")
        .bind(user.id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    let token = jwt::issue_token(user.id, &state.config.jwt_secret)?;
    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserPublic::from(&user),
            token,
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    let user = user.ok_or_else(|| {
        AppError::Unauthorized("User does not exist. Please register first.".to_string())
    })?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid password. Please try again.".to_string(),
        ));
    }

    let token = jwt::issue_token(user.id, &state.config.jwt_secret)?;
    info!("User {} logged in", user.id);

    Ok(Json(AuthResponse {
        user: UserPublic::from(&user),
        token,
    }))
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserPublic,
    pub profile: CandidateProfileRow,
}

/// GET /api/v1/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth.id)
        .fetch_optional(&state.db)
        .await?;
    let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let profile: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE user_id = $1")
            .bind(auth.id)
            .fetch_optional(&state.db)
            .await?;
    let profile = profile.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: UserPublic::from(&user),
        profile,
    }))
}
