#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Notification kinds understood by clients.
pub const KIND_JOB_MATCH: &str = "job_match";
pub const KIND_APPLICATION_UPDATE: &str = "application_update";
pub const KIND_INTERVIEW_REMINDER: &str = "interview_reminder";
pub const KIND_SKILL_SUGGESTION: &str = "skill_suggestion";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
