//! Job persistence behind a trait so ingestion can run against any backend.
//!
//! Carried in `AppState` as `Arc<dyn JobStore>`. Production wires up
//! `PgJobStore`; tests swap in an in-memory store with injectable failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRow;

/// A posting ready for insertion, produced by payload normalization.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub skills: Vec<String>,
    pub source: String,
    pub source_url: String,
    pub posted_at: DateTime<Utc>,
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Exact lookup by the trimmed source URL, the dedup identity key.
    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<JobRow>, AppError>;

    async fn insert(&self, job: &NewJob) -> Result<Uuid, AppError>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<JobRow>, AppError> {
        let job = sqlx::query_as("SELECT * FROM jobs WHERE source_url = $1")
            .bind(source_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn insert(&self, job: &NewJob) -> Result<Uuid, AppError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO jobs (title, company, location, description, skills, source, source_url, posted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.description)
        .bind(&job.skills)
        .bind(&job.source)
        .bind(&job.source_url)
        .bind(job.posted_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
