use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::roadmap::builder::{build_roadmap, Roadmap};
use crate::state::AppState;

/// GET /api/v1/roadmap/:job_id
pub async fn get_roadmap(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Roadmap>, AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(Json(build_roadmap(&job)))
}
