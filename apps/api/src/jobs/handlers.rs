use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::db;
use crate::errors::AppError;
use crate::jobs::ingest::{ingest_batch, IngestReport, RawJobPayload};
use crate::matching::relevance::{score_match, MatchResult};
use crate::models::job::JobRow;
use crate::models::user::CandidateProfileRow;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Deserialize)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

fn non_empty(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Appends the WHERE clauses shared by the count and page queries.
fn push_job_filters(builder: &mut QueryBuilder<Postgres>, query: &JobListQuery) {
    builder.push(" WHERE is_active = TRUE");
    if let Some(search) = non_empty(&query.search) {
        let pattern = format!("%{search}%");
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR company ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(location) = non_empty(&query.location) {
        builder
            .push(" AND location ILIKE ")
            .push_bind(format!("%{location}%"));
    }
    if let Some(job_type) = non_empty(&query.job_type) {
        builder
            .push(" AND job_type = ")
            .push_bind(job_type.to_string());
    }
}

/// GET /api/v1/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<JobListQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;

    let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM jobs");
    push_job_filters(&mut count_query, &query);
    let (total,): (i64,) = count_query.build_query_as().fetch_one(&state.db).await?;

    let mut page_query = QueryBuilder::new("SELECT * FROM jobs");
    push_job_filters(&mut page_query, &query);
    page_query
        .push(" ORDER BY posted_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let jobs: Vec<JobRow> = page_query.build_query_as().fetch_all(&state.db).await?;

    let pages = if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    };

    Ok(Json(JobListResponse {
        jobs,
        total,
        page,
        pages,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_job_type() -> String {
    "Full-time".to_string()
}

fn default_source() -> String {
    "Manual".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    #[serde(default = "default_currency")]
    pub salary_currency: String,
    pub experience_min: Option<i32>,
    pub experience_max: Option<i32>,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default = "default_source")]
    pub source: String,
    pub source_url: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// POST /api/v1/jobs
///
/// Unauthenticated entry point used by manual curation and scrapers.
pub async fn create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let title = req.title.trim();
    let company = req.company.trim();
    if title.is_empty() || company.is_empty() {
        return Err(AppError::Validation(
            "Job title and company are required".to_string(),
        ));
    }

    let posted_at = req.posted_at.unwrap_or_else(Utc::now);
    let source_url = req
        .source_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let job: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (title, company, location, salary_min, salary_max, salary_currency,
             experience_min, experience_max, description, requirements, skills,
             job_type, source, source_url, posted_at, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(company)
    .bind(&req.location)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .bind(&req.salary_currency)
    .bind(req.experience_min)
    .bind(req.experience_max)
    .bind(&req.description)
    .bind(&req.requirements)
    .bind(&req.skills)
    .bind(&req.job_type)
    .bind(&req.source)
    .bind(source_url)
    .bind(posted_at)
    .bind(req.is_active)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        if db::is_unique_violation(&e) {
            AppError::Conflict("A job with this source URL already exists".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    info!("Created job {} ({} at {})", job.id, job.title, job.company);
    Ok((StatusCode::CREATED, Json(job)))
}

/// POST /api/v1/jobs/ingest
pub async fn ingest_jobs(
    State(state): State<AppState>,
    Json(payloads): Json<Vec<RawJobPayload>>,
) -> Result<Json<IngestReport>, AppError> {
    let report = ingest_batch(state.job_store.as_ref(), payloads, Utc::now()).await;
    Ok(Json(report))
}

/// GET /api/v1/jobs/:id/match
pub async fn job_match(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResult>, AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let profile: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let profile = profile.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(score_match(&profile, &job)))
}
