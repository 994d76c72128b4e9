use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::matching::relevance::{score_match, MatchResult};
use crate::models::job::JobRow;
use crate::models::user::CandidateProfileRow;
use crate::state::AppState;

const MATCHING_JOBS_LIMIT: i64 = 10;

/// Trims entries, drops empties, and deduplicates case-insensitively,
/// preserving first-occurrence order and casing.
pub fn normalize_skill_list(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub phone: Option<String>,
    pub location: Option<String>,
    pub experience_years: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub preferred_roles: Option<Vec<String>>,
    pub preferred_locations: Option<Vec<String>>,
    pub expected_salary: Option<i64>,
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<CandidateProfileRow>, AppError> {
    let existing: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let existing = existing.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let experience_years = req.experience_years.unwrap_or(existing.experience_years);
    if experience_years < 0 {
        return Err(AppError::Validation(
            "Experience years cannot be negative".to_string(),
        ));
    }

    let skills = req
        .skills
        .map(|s| normalize_skill_list(&s))
        .unwrap_or(existing.skills);
    let preferred_roles = req
        .preferred_roles
        .map(|r| normalize_skill_list(&r))
        .unwrap_or(existing.preferred_roles);
    let preferred_locations = req
        .preferred_locations
        .map(|l| normalize_skill_list(&l))
        .unwrap_or(existing.preferred_locations);

    let phone = req.phone.or(existing.phone);
    let location = req.location.or(existing.location);
    let expected_salary = req.expected_salary.or(existing.expected_salary);
    // A profile can drive matching once it names skills and target roles.
    let profile_complete = !skills.is_empty() && !preferred_roles.is_empty();

    let updated: CandidateProfileRow = sqlx::query_as(
        r#"
        UPDATE candidate_profiles
        SET phone = $1, location = $2, experience_years = $3, skills = $4,
            preferred_roles = $5, preferred_locations = $6, expected_salary = $7,
            profile_complete = $8, updated_at = now()
        WHERE user_id = $9
        RETURNING *
        "#,
    )
    .bind(&phone)
    .bind(&location)
    .bind(experience_years)
    .bind(&skills)
    .bind(&preferred_roles)
    .bind(&preferred_locations)
    .bind(expected_salary)
    .bind(profile_complete)
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

#[derive(Serialize)]
pub struct MatchedJob {
    #[serde(flatten)]
    pub job: JobRow,
    pub match_result: MatchResult,
}

/// GET /api/v1/profile/matching-jobs
pub async fn matching_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<MatchedJob>>, AppError> {
    let profile: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let profile = profile.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let jobs: Vec<JobRow> =
        sqlx::query_as("SELECT * FROM jobs WHERE is_active = TRUE ORDER BY posted_at DESC LIMIT $1")
            .bind(MATCHING_JOBS_LIMIT)
            .fetch_all(&state.db)
            .await?;

    let matched = jobs
        .into_iter()
        .map(|job| {
            let match_result = score_match(&profile, &job);
            MatchedJob { job, match_result }
        })
        .collect();
    Ok(Json(matched))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_empty_entries() {
        let input = vec![
            "  Java ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "SQL".to_string(),
        ];
        assert_eq!(normalize_skill_list(&input), vec!["Java", "SQL"]);
    }

    #[test]
    fn test_normalize_deduplicates_case_insensitively_keeping_first() {
        let input = vec![
            "Java".to_string(),
            "java".to_string(),
            "SQL".to_string(),
            " JAVA ".to_string(),
        ];
        assert_eq!(normalize_skill_list(&input), vec!["Java", "SQL"]);
    }

    #[test]
    fn test_normalize_preserves_order() {
        let input = vec!["React".to_string(), "AWS".to_string(), "Python".to_string()];
        assert_eq!(normalize_skill_list(&input), vec!["React", "AWS", "Python"]);
    }
}
