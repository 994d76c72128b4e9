//! Candidate-to-job relevance scoring.
//!
//! A pure weighted sum over four dimensions: skill overlap (40), experience
//! (30), location (15), and role (15). A job that states no constraint for a
//! dimension awards that dimension's full credit, for every dimension alike.
//! No I/O happens here; callers fetch the rows and persist results if they
//! need to.

use serde::{Deserialize, Serialize};

use crate::models::job::JobRow;
use crate::models::user::CandidateProfileRow;

pub const SKILL_WEIGHT: f64 = 40.0;
pub const EXPERIENCE_WEIGHT: f64 = 30.0;
pub const LOCATION_WEIGHT: f64 = 15.0;
pub const ROLE_WEIGHT: f64 = 15.0;

/// Missing skills reported per match before the gap list is cut off.
pub const MAX_SKILL_GAPS: usize = 5;

/// Computed fit between one candidate and one job. Derived on demand and
/// never authoritative; only application rows keep a copy, frozen at
/// creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub gaps: Vec<String>,
}

/// Scores how well a candidate profile fits a job posting.
///
/// Skill overlap is case-insensitive. Required skills the candidate lacks
/// are reported as gaps in the job's stated order, with the job's original
/// casing. Sub-scores are summed as floats and rounded once at the end.
pub fn score_match(profile: &CandidateProfileRow, job: &JobRow) -> MatchResult {
    let mut score = 0.0_f64;
    let mut gaps = Vec::new();

    // Skill overlap (40). A job listing no skills constrains nothing.
    if job.skills.is_empty() {
        score += SKILL_WEIGHT;
    } else {
        let candidate_skills: Vec<String> =
            profile.skills.iter().map(|s| s.to_lowercase()).collect();
        let mut matched = 0usize;
        for skill in &job.skills {
            if candidate_skills.contains(&skill.to_lowercase()) {
                matched += 1;
            } else {
                gaps.push(skill.clone());
            }
        }
        score += SKILL_WEIGHT * matched as f64 / job.skills.len() as f64;
    }
    gaps.truncate(MAX_SKILL_GAPS);

    // Experience (30). Partial credit proportional to the shortfall.
    score += match job.experience_min {
        Some(min) if profile.experience_years < min => {
            EXPERIENCE_WEIGHT * profile.experience_years.max(0) as f64 / min as f64
        }
        _ => EXPERIENCE_WEIGHT,
    };

    // Location (15). Only constrains when both sides state one.
    let location_ok = match &job.location {
        Some(job_location) if !profile.preferred_locations.is_empty() => {
            let job_location = job_location.to_lowercase();
            profile
                .preferred_locations
                .iter()
                .any(|loc| job_location.contains(&loc.to_lowercase()))
        }
        _ => true,
    };
    if location_ok {
        score += LOCATION_WEIGHT;
    }

    // Role (15). Preferred role as a substring of the job title.
    let role_ok = profile.preferred_roles.is_empty() || {
        let title = job.title.to_lowercase();
        profile
            .preferred_roles
            .iter()
            .any(|role| title.contains(&role.to_lowercase()))
    };
    if role_ok {
        score += ROLE_WEIGHT;
    }

    MatchResult {
        score: (score.round() as i64).clamp(0, 100) as u32,
        gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_profile(
        skills: &[&str],
        experience_years: i32,
        preferred_roles: &[&str],
        preferred_locations: &[&str],
    ) -> CandidateProfileRow {
        CandidateProfileRow {
            user_id: Uuid::new_v4(),
            phone: None,
            location: None,
            experience_years,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            preferred_roles: preferred_roles.iter().map(|s| s.to_string()).collect(),
            preferred_locations: preferred_locations.iter().map(|s| s.to_string()).collect(),
            expected_salary: None,
            profile_complete: true,
            updated_at: Utc::now(),
        }
    }

    fn make_job(
        title: &str,
        skills: &[&str],
        experience_min: Option<i32>,
        location: Option<&str>,
    ) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme Corp".to_string(),
            location: location.map(|l| l.to_string()),
            salary_min: None,
            salary_max: None,
            salary_currency: "INR".to_string(),
            experience_min,
            experience_max: None,
            description: None,
            requirements: vec![],
            skills: skills.iter().map(|s| s.to_string()).collect(),
            job_type: "Full-time".to_string(),
            source: "Manual".to_string(),
            source_url: None,
            posted_at: Utc::now(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reference_example_scores_87_with_python_gap() {
        // Two of three skills, experience above minimum, location and role
        // both matched: 26.67 + 30 + 15 + 15 rounds to 87.
        let profile = make_profile(&["Java", "SQL"], 3, &["Backend"], &["Remote"]);
        let job = make_job(
            "Backend Developer",
            &["Java", "Python", "SQL"],
            Some(2),
            Some("Remote"),
        );

        let result = score_match(&profile, &job);
        assert_eq!(result.score, 87);
        assert_eq!(result.gaps, vec!["Python".to_string()]);
    }

    #[test]
    fn test_full_match_scores_100() {
        let profile = make_profile(&["Rust", "SQL"], 5, &["Backend"], &["Pune"]);
        let job = make_job("Backend Engineer", &["Rust", "SQL"], Some(3), Some("Pune"));

        let result = score_match(&profile, &job);
        assert_eq!(result.score, 100);
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_nothing_matches_scores_0() {
        let profile = make_profile(&[], 0, &["Designer"], &["Mumbai"]);
        let job = make_job("Backend Engineer", &["Rust"], Some(4), Some("Bangalore"));

        let result = score_match(&profile, &job);
        assert_eq!(result.score, 0);
        assert_eq!(result.gaps, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_score_is_bounded() {
        let profile = make_profile(&["Java", "Python", "React", "SQL", "AWS"], 40, &[], &[]);
        let job = make_job("Engineer", &["Java"], Some(1), None);

        let result = score_match(&profile, &job);
        assert!(result.score <= 100);
    }

    #[test]
    fn test_skill_match_is_case_insensitive() {
        let profile = make_profile(&["JAVA", "sql"], 0, &[], &[]);
        let job = make_job("Engineer", &["java", "SQL"], None, None);

        let result = score_match(&profile, &job);
        assert_eq!(result.score, 100);
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_gaps_keep_job_order_and_casing_capped_at_five() {
        let profile = make_profile(&[], 5, &[], &[]);
        let job = make_job(
            "Engineer",
            &["Java", "Python", "React", "SQL", "AWS", "Docker", "Kafka"],
            None,
            None,
        );

        let result = score_match(&profile, &job);
        assert_eq!(result.gaps, vec!["Java", "Python", "React", "SQL", "AWS"]);
    }

    #[test]
    fn test_adding_a_matching_skill_never_lowers_the_score() {
        let job = make_job("Engineer", &["Java", "Python", "SQL"], Some(2), None);
        let before = score_match(&make_profile(&["Java"], 3, &[], &[]), &job);
        let after = score_match(&make_profile(&["Java", "Python"], 3, &[], &[]), &job);

        assert!(after.score >= before.score);
        assert!(after.gaps.len() < before.gaps.len());
    }

    #[test]
    fn test_job_without_skills_awards_full_skill_credit() {
        // No stated requirement means no penalty, same as the other
        // dimensions.
        let profile = make_profile(&[], 0, &[], &[]);
        let job = make_job("Engineer", &[], None, None);

        let result = score_match(&profile, &job);
        assert_eq!(result.score, 100);
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_experience_at_exact_minimum_gets_full_credit() {
        let profile = make_profile(&[], 3, &[], &[]);
        let job = make_job("Engineer", &[], Some(3), None);

        assert_eq!(score_match(&profile, &job).score, 100);
    }

    #[test]
    fn test_experience_below_minimum_gets_proportional_credit() {
        // 40 + 30 * 1/4 + 15 + 15 = 77.5, rounds to 78.
        let profile = make_profile(&[], 1, &[], &[]);
        let job = make_job("Engineer", &[], Some(4), None);

        assert_eq!(score_match(&profile, &job).score, 78);
    }

    #[test]
    fn test_zero_experience_against_positive_minimum_gets_nothing() {
        let profile = make_profile(&[], 0, &[], &[]);
        let job = make_job("Engineer", &[], Some(2), None);

        assert_eq!(score_match(&profile, &job).score, 70);
    }

    #[test]
    fn test_missing_experience_minimum_gets_full_credit() {
        let profile = make_profile(&[], 0, &[], &[]);
        let job = make_job("Engineer", &[], None, None);

        assert_eq!(score_match(&profile, &job).score, 100);
    }

    #[test]
    fn test_location_preference_matches_as_substring() {
        let profile = make_profile(&[], 0, &[], &["bangalore"]);
        let job = make_job("Engineer", &[], None, Some("Bangalore, India"));

        assert_eq!(score_match(&profile, &job).score, 100);
    }

    #[test]
    fn test_location_mismatch_loses_location_credit() {
        let profile = make_profile(&[], 0, &[], &["Mumbai"]);
        let job = make_job("Engineer", &[], None, Some("Bangalore"));

        assert_eq!(score_match(&profile, &job).score, 85);
    }

    #[test]
    fn test_job_without_location_awards_location_credit() {
        let profile = make_profile(&[], 0, &[], &["Mumbai"]);
        let job = make_job("Engineer", &[], None, None);

        assert_eq!(score_match(&profile, &job).score, 100);
    }

    #[test]
    fn test_role_preference_matches_inside_title() {
        let profile = make_profile(&[], 0, &["backend"], &[]);
        let job = make_job("Senior Backend Developer", &[], None, None);

        assert_eq!(score_match(&profile, &job).score, 100);
    }

    #[test]
    fn test_role_mismatch_loses_role_credit() {
        let profile = make_profile(&[], 0, &["Data Scientist"], &[]);
        let job = make_job("Frontend Developer", &[], None, None);

        assert_eq!(score_match(&profile, &job).score, 85);
    }
}
