//! Storage abstractions for run artifacts.
//!
//! A run produces two files, both replaced wholesale every time:
//!
//! ```text
//! data/eu_roles.json   # JSON feed {generatedAt, count, postings}
//! README.md            # Markdown table of the same postings
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::ResultSet;
use crate::pipeline::report::ReportContext;

// Re-export for convenience
pub use local::LocalStorage;

/// Where a snapshot was written.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub count: usize,
    pub feed_location: String,
    pub report_location: String,
    pub timestamp: DateTime<Utc>,
}

/// Trait for artifact storage backends.
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Write the JSON feed and the Markdown report for `result`.
    async fn write_snapshot(
        &self,
        result: &ResultSet,
        context: &ReportContext<'_>,
    ) -> Result<WriteSummary>;
}
