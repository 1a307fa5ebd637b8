// src/providers/amazon.rs

//! amazon.jobs search portal.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::fields::{FieldMap, first_text, join_present, records};
use super::{CareerPortal, early_filter};
use crate::error::{AppError, Result};
use crate::models::{AmazonPortalConfig, RawPosting};
use crate::utils::http;

// Location and link are composed in `map_job`.
const FIELDS: FieldMap = FieldMap {
    id: &["id", "job_id"],
    title: &["title"],
    location: &[],
    apply_url: &[],
    description: &[],
    posted_at: &["posted_date", "updated_time"],
};

pub struct AmazonPortal {
    client: Client,
    config: AmazonPortalConfig,
}

impl AmazonPortal {
    pub fn new(client: Client, config: AmazonPortalConfig) -> Self {
        Self { client, config }
    }

    /// Search URL filtered to the configured country and city, newest first.
    pub fn search_url(&self) -> Result<Url> {
        let base = format!("{}/en/search.json", self.config.base_url.trim_end_matches('/'));
        let limit = self.config.result_limit.to_string();
        let url = Url::parse_with_params(
            &base,
            [
                ("offset", "0"),
                ("result_limit", limit.as_str()),
                ("sort", "recent"),
                ("normalized_country_code[]", self.config.country_code.as_str()),
                ("city[]", self.config.city.as_str()),
            ],
        )?;
        Ok(url)
    }

    pub fn parse(&self, url: &str, body: &Value) -> Result<Vec<RawPosting>> {
        let jobs = records(body, &["jobs"]).ok_or(AppError::UnexpectedShape {
            url: url.to_string(),
            expected: "a `jobs` array",
        })?;
        let postings = jobs.iter().map(|job| self.map_job(job)).collect();
        Ok(early_filter(postings, &self.config.early_keywords))
    }

    fn map_job(&self, job: &Value) -> RawPosting {
        let mut posting = FIELDS.map(job);
        posting.location = join_present(&[
            first_text(job, &["city"]),
            first_text(job, &["state"]),
            first_text(job, &["country_code"]),
        ]);
        let job_path = first_text(job, &["job_path"]);
        posting.apply_url = if job_path.is_empty() {
            first_text(job, &["job_url"])
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), job_path)
        };
        posting
    }
}

#[async_trait]
impl CareerPortal for AmazonPortal {
    fn name(&self) -> &str {
        "amazon.jobs"
    }

    fn company(&self) -> &str {
        &self.config.display_name
    }

    async fn fetch(&self) -> Result<Vec<RawPosting>> {
        let url = self.search_url()?;
        let body = http::get_json(&self.client, url.as_str()).await?;
        self.parse(url.as_str(), &body)
    }
}
