#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_SAVED: &str = "Saved";
pub const STATUS_APPLIED: &str = "Applied";
pub const STATUS_INTERVIEW: &str = "Interview";
pub const STATUS_SELECTED: &str = "Selected";
pub const STATUS_REJECTED: &str = "Rejected";

/// One entry in an application's status history.
/// Appended on every status change, never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub status: String,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applied_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub resume_used: Option<Uuid>,
    /// Relevance score frozen at creation time. Live scores are always
    /// recomputed from the current profile instead.
    pub match_score: Option<i32>,
    pub skill_gaps: Vec<String>,
    pub timeline: Json<Vec<TimelineEvent>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
