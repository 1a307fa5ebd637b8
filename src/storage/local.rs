//! Local filesystem storage implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{PathsConfig, ResultSet};
use crate::pipeline::report::{self, ReportContext};
use crate::storage::{ReportStorage, WriteSummary};

/// Writes the feed and report to fixed paths on disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    feed_path: PathBuf,
    report_path: PathBuf,
}

impl LocalStorage {
    pub fn new(feed_path: impl Into<PathBuf>, report_path: impl Into<PathBuf>) -> Self {
        Self {
            feed_path: feed_path.into(),
            report_path: report_path.into(),
        }
    }

    pub fn from_paths(paths: &PathsConfig) -> Self {
        Self::new(&paths.output_json, &paths.output_report)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
        Self::ensure_dir(path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ReportStorage for LocalStorage {
    async fn write_snapshot(
        &self,
        result: &ResultSet,
        context: &ReportContext<'_>,
    ) -> Result<WriteSummary> {
        let json = report::render_json(result)?;
        Self::write_bytes(&self.feed_path, json.as_bytes()).await?;
        log::info!(
            "Feed: {} postings written to {}",
            result.count,
            self.feed_path.display()
        );

        let markdown = report::render_markdown(result, context);
        Self::write_bytes(&self.report_path, markdown.as_bytes()).await?;
        log::info!("Report written to {}", self.report_path.display());

        Ok(WriteSummary {
            count: result.count,
            feed_location: self.feed_path.display().to_string(),
            report_location: self.report_path.display().to_string(),
            timestamp: result.generated_at,
        })
    }
}
