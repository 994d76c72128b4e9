pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::notifications::handlers as notifications;
use crate::profile::handlers as profile;
use crate::resumes::handlers as resumes;
use crate::roadmap::handlers as roadmap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/profile", get(auth::get_profile))
        // Candidate profile
        .route("/api/v1/profile", put(profile::update_profile))
        .route("/api/v1/profile/matching-jobs", get(profile::matching_jobs))
        // Job postings
        .route("/api/v1/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/v1/jobs/ingest", post(jobs::ingest_jobs))
        .route("/api/v1/jobs/:id", get(jobs::get_job))
        .route("/api/v1/jobs/:id/match", get(jobs::job_match))
        // Application tracking
        .route(
            "/api/v1/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/api/v1/applications/stats",
            get(applications::application_stats),
        )
        .route(
            "/api/v1/applications/:id",
            put(applications::update_application).delete(applications::delete_application),
        )
        // Resume documents
        .route(
            "/api/v1/resumes",
            get(resumes::list_resumes).post(resumes::create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::get_resume)
                .put(resumes::update_resume)
                .delete(resumes::delete_resume),
        )
        .route("/api/v1/resumes/:id/analyze", post(resumes::analyze_resume))
        .route(
            "/api/v1/resumes/:id/assessments",
            get(resumes::list_assessments),
        )
        // Learning roadmap
        .route("/api/v1/roadmap/:job_id", get(roadmap::get_roadmap))
        // Notifications
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/v1/notifications/read-all",
            put(notifications::mark_all_read),
        )
        .route(
            "/api/v1/notifications/:id/read",
            put(notifications::mark_read),
        )
        .with_state(state)
}
