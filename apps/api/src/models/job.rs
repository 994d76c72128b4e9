use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting in its canonical form. Rows are only ever replaced or
/// deactivated, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: String,
    pub experience_min: Option<i32>,
    pub experience_max: Option<i32>,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub job_type: String,
    pub source: String,
    pub source_url: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
