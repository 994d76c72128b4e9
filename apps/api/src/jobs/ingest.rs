//! Batch ingestion of raw job payloads.
//!
//! Each payload is normalized (trimmed fields, parsed posting date, skills
//! extracted from the description), checked against existing postings by
//! source URL, and inserted if new. Items are processed independently: one
//! bad payload or storage failure is reported and the batch moves on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::jobs::store::{JobStore, NewJob};

/// Closed vocabulary scanned against descriptions, case-insensitively.
/// Hits are recorded in this order with this casing.
pub const SKILL_VOCABULARY: &[&str] = &["Java", "Python", "React", "SQL", "AWS"];

const DEFAULT_SOURCE: &str = "Scraped";

/// A posting as delivered by an upstream scraper or feed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawJobPayload {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub posted_date: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    Ingested { id: Uuid },
    SkippedDuplicate,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestItemReport {
    pub source_url: String,
    #[serde(flatten)]
    pub outcome: IngestOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub received: usize,
    pub ingested: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
    pub items: Vec<IngestItemReport>,
}

// ────────────────────────────────────────────────────────────────────────────
// Batch driver
// ────────────────────────────────────────────────────────────────────────────

/// Ingests a batch of raw payloads through the given store.
///
/// `now` is the ingestion timestamp, used as the posting date when a payload
/// carries none that parses. Never fails as a whole; per-item outcomes land
/// in the report.
pub async fn ingest_batch(
    store: &dyn JobStore,
    payloads: Vec<RawJobPayload>,
    now: DateTime<Utc>,
) -> IngestReport {
    let mut report = IngestReport {
        received: payloads.len(),
        ingested: 0,
        skipped_duplicates: 0,
        failed: 0,
        items: Vec::with_capacity(payloads.len()),
    };

    for payload in payloads {
        let source_url = payload.url.trim().to_string();
        let outcome = ingest_one(store, payload, now).await;
        match outcome {
            IngestOutcome::Ingested { .. } => report.ingested += 1,
            IngestOutcome::SkippedDuplicate => report.skipped_duplicates += 1,
            IngestOutcome::Failed { .. } => report.failed += 1,
        }
        report.items.push(IngestItemReport {
            source_url,
            outcome,
        });
    }

    info!(
        "Ingestion batch done: {} received, {} ingested, {} duplicates, {} failed",
        report.received, report.ingested, report.skipped_duplicates, report.failed
    );
    report
}

async fn ingest_one(
    store: &dyn JobStore,
    payload: RawJobPayload,
    now: DateTime<Utc>,
) -> IngestOutcome {
    let job = match normalize_payload(payload, now) {
        Ok(job) => job,
        Err(reason) => {
            error!("Rejected job payload: {reason}");
            return IngestOutcome::Failed { reason };
        }
    };

    match store.find_by_source_url(&job.source_url).await {
        Ok(Some(existing)) => {
            info!(
                "Skipped duplicate posting {} (already stored as {})",
                job.source_url, existing.id
            );
            IngestOutcome::SkippedDuplicate
        }
        Ok(None) => match store.insert(&job).await {
            Ok(id) => {
                info!("Ingested: {} at {}", job.title, job.company);
                IngestOutcome::Ingested { id }
            }
            Err(e) => {
                error!("Failed to store posting {}: {e}", job.source_url);
                IngestOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        },
        Err(e) => {
            error!("Duplicate lookup failed for {}: {e}", job.source_url);
            IngestOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

fn normalize_payload(payload: RawJobPayload, now: DateTime<Utc>) -> Result<NewJob, String> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err("job title is required".to_string());
    }
    let company = payload.company.trim();
    if company.is_empty() {
        return Err("company is required".to_string());
    }
    let source_url = payload.url.trim();
    if source_url.is_empty() {
        return Err("source url is required".to_string());
    }

    let location = payload
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    Ok(NewJob {
        title: title.to_string(),
        company: company.to_string(),
        location,
        skills: extract_skills(payload.description.as_deref()),
        description: payload.description,
        source: payload
            .source
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        source_url: source_url.to_string(),
        posted_at: parse_posted_date(payload.posted_date.as_deref(), now),
    })
}

/// Parses a posting date as RFC 3339, then as a bare `YYYY-MM-DD` day.
/// Anything else falls back to the ingestion timestamp; a bad date never
/// rejects the record.
fn parse_posted_date(raw: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return fallback;
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Some(dt) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return DateTime::from_naive_utc_and_offset(dt, Utc);
    }

    warn!("Unparseable posted date '{raw}', using ingestion time");
    fallback
}

/// Scans a description for known skills, preserving vocabulary order.
pub fn extract_skills(description: Option<&str>) -> Vec<String> {
    let Some(text) = description else {
        return Vec::new();
    };
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
