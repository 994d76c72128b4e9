use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::applications::stats::{compute_stats, ApplicationStats};
use crate::auth::extract::AuthUser;
use crate::db;
use crate::errors::AppError;
use crate::matching::relevance::score_match;
use crate::models::application::{
    ApplicationRow, TimelineEvent, STATUS_APPLIED, STATUS_INTERVIEW, STATUS_REJECTED, STATUS_SAVED,
    STATUS_SELECTED,
};
use crate::models::job::JobRow;
use crate::models::notification::KIND_APPLICATION_UPDATE;
use crate::models::user::CandidateProfileRow;
use crate::state::AppState;

const ALLOWED_STATUSES: [&str; 5] = [
    STATUS_SAVED,
    STATUS_APPLIED,
    STATUS_INTERVIEW,
    STATUS_SELECTED,
    STATUS_REJECTED,
];

fn validate_status(status: &str) -> Result<(), AppError> {
    if ALLOWED_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unknown application status '{status}'"
        )))
    }
}

#[derive(Clone, Serialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: String,
}

impl From<&JobRow> for JobSummary {
    fn from(job: &JobRow) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub job: JobSummary,
}

/// GET /api/v1/applications
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    let applications: Vec<ApplicationRow> =
        sqlx::query_as("SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    let job_ids: Vec<Uuid> = applications.iter().map(|a| a.job_id).collect();
    let jobs: Vec<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = ANY($1)")
        .bind(&job_ids)
        .fetch_all(&state.db)
        .await?;
    let jobs_by_id: HashMap<Uuid, JobSummary> =
        jobs.iter().map(|j| (j.id, JobSummary::from(j))).collect();

    let responses = applications
        .into_iter()
        .filter_map(|application| {
            jobs_by_id
                .get(&application.job_id)
                .map(|job| ApplicationResponse {
                    application,
                    job: job.clone(),
                })
        })
        .collect();
    Ok(Json(responses))
}

#[derive(Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: Uuid,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub resume_used: Option<Uuid>,
}

/// POST /api/v1/applications
pub async fn create_application(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), AppError> {
    let status = req.status.unwrap_or_else(|| STATUS_SAVED.to_string());
    validate_status(&status)?;

    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(req.job_id)
        .fetch_optional(&state.db)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {} not found", req.job_id)))?;

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM applications WHERE user_id = $1 AND job_id = $2")
            .bind(user.id)
            .bind(req.job_id)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    let profile: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let profile = profile.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    // Snapshot the relevance result at creation time; live scores are
    // always recomputed from the current profile instead.
    let relevance = score_match(&profile, &job);

    let now = Utc::now();
    let applied_at = (status == STATUS_APPLIED).then_some(now);
    let timeline = vec![TimelineEvent {
        status: status.clone(),
        note: Some("Application created".to_string()),
        at: now,
    }];

    let application: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications
            (user_id, job_id, status, applied_at, notes, resume_used,
             match_score, skill_gaps, timeline)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(req.job_id)
    .bind(&status)
    .bind(applied_at)
    .bind(&req.notes)
    .bind(req.resume_used)
    .bind(relevance.score as i32)
    .bind(&relevance.gaps)
    .bind(sqlx::types::Json(&timeline))
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        // Concurrent double-submit still lands on the unique constraint.
        if db::is_unique_violation(&e) {
            AppError::Conflict("You have already applied to this job".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    info!(
        "User {} tracked job {} with status {status}",
        user.id, req.job_id
    );

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            application,
            job: JobSummary::from(&job),
        }),
    ))
}

#[derive(Deserialize)]
pub struct UpdateApplicationRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
    pub resume_used: Option<Uuid>,
    /// Annotation recorded on the timeline event when the status changes.
    pub note: Option<String>,
}

/// PUT /api/v1/applications/:id
pub async fn update_application(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let existing: Option<ApplicationRow> =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let existing =
        existing.ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let status = match req.status {
        Some(status) => {
            validate_status(&status)?;
            status
        }
        None => existing.status.clone(),
    };
    let status_changed = status != existing.status;

    let now = Utc::now();
    let mut timeline = existing.timeline.0.clone();
    let mut applied_at = existing.applied_at;
    if status_changed {
        timeline.push(TimelineEvent {
            status: status.clone(),
            note: req.note.clone(),
            at: now,
        });
        if status == STATUS_APPLIED && applied_at.is_none() {
            applied_at = Some(now);
        }
    }

    let notes = req.notes.or(existing.notes);
    let resume_used = req.resume_used.or(existing.resume_used);

    let updated: ApplicationRow = sqlx::query_as(
        r#"
        UPDATE applications
        SET status = $1, applied_at = $2, notes = $3, resume_used = $4,
            timeline = $5, updated_at = now()
        WHERE id = $6 AND user_id = $7
        RETURNING *
        "#,
    )
    .bind(&status)
    .bind(applied_at)
    .bind(&notes)
    .bind(resume_used)
    .bind(sqlx::types::Json(&timeline))
    .bind(id)
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    if status_changed {
        let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
            .bind(existing.job_id)
            .fetch_optional(&state.db)
            .await?;
        if let Some(job) = job {
            sqlx::query(
                "INSERT INTO notifications (user_id, kind, title, message) VALUES ($1, $2, $3, $4)",
            )
            .bind(user.id)
            .bind(KIND_APPLICATION_UPDATE)
            .bind("Application status updated")
            .bind(format!(
                "Your application for {} at {} moved to {status}.",
                job.title, job.company
            ))
            .execute(&state.db)
            .await?;
        }
        info!("Application {id} moved to {status}");
    }

    Ok(Json(updated))
}

#[derive(Serialize)]
pub struct DeleteApplicationResponse {
    pub message: String,
}

/// DELETE /api/v1/applications/:id
pub async fn delete_application(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteApplicationResponse>, AppError> {
    let deleted: Option<(Uuid,)> =
        sqlx::query_as("DELETE FROM applications WHERE id = $1 AND user_id = $2 RETURNING id")
            .bind(id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    if deleted.is_none() {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    Ok(Json(DeleteApplicationResponse {
        message: "Application deleted".to_string(),
    }))
}

/// GET /api/v1/applications/stats
pub async fn application_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApplicationStats>, AppError> {
    let applications: Vec<ApplicationRow> =
        sqlx::query_as("SELECT * FROM applications WHERE user_id = $1")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(compute_stats(&applications)))
}
