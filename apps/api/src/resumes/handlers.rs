use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{
    AtsAssessmentRow, Certification, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeRow, SkillSet,
};
use crate::resumes::ats;
use crate::state::AppState;

fn default_template() -> String {
    "modern".to_string()
}

/// Full document payload shared by create and update; absent sections
/// default to empty.
#[derive(Deserialize)]
pub struct ResumePayload {
    pub title: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    pub target_role: Option<String>,
}

async fn fetch_owned_resume(
    db: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let resume: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(db)
            .await?;
    resume.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

/// GET /api/v1/resumes
pub async fn list_resumes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes: Vec<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn get_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = fetch_owned_resume(&state.db, user.id, id).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resumes
pub async fn create_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ResumePayload>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Resume title is required".to_string()));
    }

    let resume: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes
            (user_id, title, template, personal_info, summary, experience,
             education, skills, projects, certifications, target_role)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(payload.title.trim())
    .bind(&payload.template)
    .bind(sqlx::types::Json(&payload.personal_info))
    .bind(&payload.summary)
    .bind(sqlx::types::Json(&payload.experience))
    .bind(sqlx::types::Json(&payload.education))
    .bind(sqlx::types::Json(&payload.skills))
    .bind(sqlx::types::Json(&payload.projects))
    .bind(sqlx::types::Json(&payload.certifications))
    .bind(&payload.target_role)
    .fetch_one(&state.db)
    .await?;

    info!("User {} created resume {}", user.id, resume.id);
    Ok((StatusCode::CREATED, Json(resume)))
}

/// PUT /api/v1/resumes/:id
pub async fn update_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResumePayload>,
) -> Result<Json<ResumeRow>, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Resume title is required".to_string()));
    }

    let resume: Option<ResumeRow> = sqlx::query_as(
        r#"
        UPDATE resumes
        SET title = $1, template = $2, personal_info = $3, summary = $4,
            experience = $5, education = $6, skills = $7, projects = $8,
            certifications = $9, target_role = $10, updated_at = now()
        WHERE id = $11 AND user_id = $12
        RETURNING *
        "#,
    )
    .bind(payload.title.trim())
    .bind(&payload.template)
    .bind(sqlx::types::Json(&payload.personal_info))
    .bind(&payload.summary)
    .bind(sqlx::types::Json(&payload.experience))
    .bind(sqlx::types::Json(&payload.education))
    .bind(sqlx::types::Json(&payload.skills))
    .bind(sqlx::types::Json(&payload.projects))
    .bind(sqlx::types::Json(&payload.certifications))
    .bind(&payload.target_role)
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;

    resume
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
        .map(Json)
}

#[derive(Serialize)]
pub struct DeleteResumeResponse {
    pub message: String,
}

/// DELETE /api/v1/resumes/:id
pub async fn delete_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResumeResponse>, AppError> {
    let deleted: Option<(Uuid,)> =
        sqlx::query_as("DELETE FROM resumes WHERE id = $1 AND user_id = $2 RETURNING id")
            .bind(id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    if deleted.is_none() {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    Ok(Json(DeleteResumeResponse {
        message: "Resume deleted".to_string(),
    }))
}

/// POST /api/v1/resumes/:id/analyze
pub async fn analyze_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsAssessmentRow>, AppError> {
    let resume = fetch_owned_resume(&state.db, user.id, id).await?;

    let assessment = ats::assess(&resume);

    // History first, then the denormalized copy on the document. Two
    // sequential statements; a failure between them leaves the history
    // row authoritative.
    let stored: AtsAssessmentRow = sqlx::query_as(
        r#"
        INSERT INTO ats_assessments (resume_id, overall_score, scores, feedback)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(resume.id)
    .bind(assessment.overall_score as i32)
    .bind(sqlx::types::Json(&assessment.scores))
    .bind(&assessment.feedback)
    .fetch_one(&state.db)
    .await?;

    sqlx::query("UPDATE resumes SET ats_score = $1 WHERE id = $2")
        .bind(stored.overall_score)
        .bind(resume.id)
        .execute(&state.db)
        .await?;

    info!(
        "Assessed resume {} with overall score {}",
        resume.id, stored.overall_score
    );
    Ok(Json(stored))
}

/// GET /api/v1/resumes/:id/assessments
pub async fn list_assessments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AtsAssessmentRow>>, AppError> {
    let resume = fetch_owned_resume(&state.db, user.id, id).await?;

    let assessments: Vec<AtsAssessmentRow> = sqlx::query_as(
        "SELECT * FROM ats_assessments WHERE resume_id = $1 ORDER BY assessed_at DESC",
    )
    .bind(resume.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(assessments))
}
