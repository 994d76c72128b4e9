#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User representation safe to return from the API.
/// The password hash never leaves the database layer.
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRow> for UserPublic {
    fn from(row: &UserRow) -> Self {
        UserPublic {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            created_at: row.created_at,
        }
    }
}

/// Matching-relevant candidate data, kept separate from the account row.
/// Created empty at registration, mutated only through profile updates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfileRow {
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub experience_years: i32,
    pub skills: Vec<String>,
    pub preferred_roles: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub expected_salary: Option<i64>,
    pub profile_complete: bool,
    pub updated_at: DateTime<Utc>,
}
