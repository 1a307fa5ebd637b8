//! Posting data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Provider;
use crate::services::recency;

/// A vendor date value before interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Number(f64),
    Text(String),
}

/// One vendor record mapped onto the shared field names.
///
/// Missing vendor fields are empty strings; relevance is decided later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosting {
    pub id: String,
    pub title: String,
    pub location: String,
    pub apply_url: String,
    pub description: String,
    pub posted_at: Option<RawTimestamp>,
}

/// A kept posting, attributed to its canonical company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: String,
    pub title: String,
    pub location: String,
    pub apply_url: String,
    pub description: String,
    pub company: String,
    pub source: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_bucket: Option<String>,
}

impl Posting {
    /// Attribute a raw posting to `company`, computing its age against `now`.
    ///
    /// Returns `None` when the record has neither an id nor an apply link.
    pub fn from_raw(
        raw: RawPosting,
        company: &str,
        source: Provider,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        if raw.id.is_empty() && raw.apply_url.is_empty() {
            return None;
        }

        let posted_at = raw
            .posted_at
            .as_ref()
            .and_then(recency::parse_timestamp)
            .and_then(DateTime::from_timestamp_millis);
        let age_bucket = posted_at.map(|t| recency::bucket_from_millis(t.timestamp_millis(), now));

        Some(Self {
            id: raw.id,
            title: raw.title,
            location: raw.location,
            apply_url: raw.apply_url,
            description: raw.description,
            company: company.to_string(),
            source,
            posted_at,
            age_bucket,
        })
    }

    /// Key used to drop repeated postings.
    pub fn dedupe_key(&self) -> String {
        format!("{}{}", self.id, self.apply_url)
    }
}

/// The run's output: every kept posting, freshly generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub postings: Vec<Posting>,
}

impl ResultSet {
    pub fn new(postings: Vec<Posting>, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            count: postings.len(),
            postings,
        }
    }
}

/// Counters for a single aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub sources_total: usize,
    pub sources_skipped: usize,
    pub sources_failed: usize,
    pub portal_failures: usize,
    pub fetched: usize,
    pub duplicates: usize,
    pub stale: usize,
    pub kept: usize,
}

impl RunStats {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time: start_time,
            sources_total: 0,
            sources_skipped: 0,
            sources_failed: 0,
            portal_failures: 0,
            fetched: 0,
            duplicates: 0,
            stale: 0,
            kept: 0,
        }
    }
}
