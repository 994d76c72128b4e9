//! Aggregate statistics over a user's applications.

use serde::Serialize;

use crate::models::application::{
    ApplicationRow, STATUS_APPLIED, STATUS_INTERVIEW, STATUS_SAVED, STATUS_SELECTED,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationStats {
    pub total_applications: usize,
    pub applied_jobs: usize,
    pub saved_jobs: usize,
    pub interviews_scheduled: usize,
    /// Share of applications that reached Selected, as a rounded percentage.
    pub success_rate: u32,
    /// Average stored match score, rounded to the nearest integer. Rows
    /// without a score count as zero.
    pub avg_match_score: u32,
}

pub fn compute_stats(applications: &[ApplicationRow]) -> ApplicationStats {
    let total = applications.len();
    let count_status =
        |status: &str| applications.iter().filter(|a| a.status == status).count();

    let (success_rate, avg_match_score) = if total == 0 {
        (0, 0)
    } else {
        let selected = count_status(STATUS_SELECTED);
        let score_sum: i64 = applications
            .iter()
            .map(|a| i64::from(a.match_score.unwrap_or(0)))
            .sum();
        (
            ((selected as f64 / total as f64) * 100.0).round() as u32,
            (score_sum as f64 / total as f64).round() as u32,
        )
    };

    ApplicationStats {
        total_applications: total,
        applied_jobs: count_status(STATUS_APPLIED),
        saved_jobs: count_status(STATUS_SAVED),
        interviews_scheduled: count_status(STATUS_INTERVIEW),
        success_rate,
        avg_match_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::STATUS_REJECTED;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn make_application(status: &str, match_score: Option<i32>) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            status: status.to_string(),
            applied_at: None,
            notes: None,
            resume_used: None,
            match_score,
            skill_gaps: vec![],
            timeline: Json(vec![]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_applications_is_all_zeroes() {
        let stats = compute_stats(&[]);
        assert_eq!(
            stats,
            ApplicationStats {
                total_applications: 0,
                applied_jobs: 0,
                saved_jobs: 0,
                interviews_scheduled: 0,
                success_rate: 0,
                avg_match_score: 0,
            }
        );
    }

    #[test]
    fn test_statuses_are_counted_separately() {
        let apps = vec![
            make_application(STATUS_SAVED, None),
            make_application(STATUS_SAVED, None),
            make_application(STATUS_APPLIED, None),
            make_application(STATUS_INTERVIEW, None),
            make_application(STATUS_REJECTED, None),
        ];

        let stats = compute_stats(&apps);
        assert_eq!(stats.total_applications, 5);
        assert_eq!(stats.saved_jobs, 2);
        assert_eq!(stats.applied_jobs, 1);
        assert_eq!(stats.interviews_scheduled, 1);
    }

    #[test]
    fn test_success_rate_rounds_to_nearest() {
        let apps = vec![
            make_application(STATUS_SELECTED, None),
            make_application(STATUS_APPLIED, None),
            make_application(STATUS_APPLIED, None),
        ];

        // 1 of 3 selected: 33.33 rounds to 33.
        assert_eq!(compute_stats(&apps).success_rate, 33);
    }

    #[test]
    fn test_average_match_score_rounds_and_defaults_missing_to_zero() {
        let apps = vec![
            make_application(STATUS_APPLIED, Some(87)),
            make_application(STATUS_APPLIED, Some(88)),
        ];
        // 87.5 rounds to 88.
        assert_eq!(compute_stats(&apps).avg_match_score, 88);

        let apps = vec![
            make_application(STATUS_APPLIED, Some(90)),
            make_application(STATUS_APPLIED, None),
        ];
        assert_eq!(compute_stats(&apps).avg_match_score, 45);
    }
}
