use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::jobs::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable posting store used by batch ingestion. Production wires
    /// `PgJobStore`; tests substitute an in-memory double.
    pub job_store: Arc<dyn JobStore>,
}
