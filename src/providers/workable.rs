// src/providers/workable.rs

//! Workable careers API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::fields::{FieldMap, city_country, first_text, records};
use super::JobBoard;
use crate::error::{AppError, Result};
use crate::models::{Provider, RawPosting};
use crate::utils::http;

// Location and link are built from several fields, see `map_job`.
const FIELDS: FieldMap = FieldMap {
    id: &["shortcode", "id"],
    title: &["title"],
    location: &[],
    apply_url: &[],
    description: &[],
    posted_at: &["publishedDate", "updatedAt"],
};

pub struct WorkableBoard {
    client: Client,
}

impl WorkableBoard {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn endpoint(slug: &str) -> String {
        format!("https://apply.workable.com/api/v3/accounts/{slug}/jobs?limit=200")
    }

    pub fn parse(url: &str, body: &Value, slug: &str) -> Result<Vec<RawPosting>> {
        let jobs = records(body, &["results"]).ok_or(AppError::UnexpectedShape {
            url: url.to_string(),
            expected: "a `results` array",
        })?;
        Ok(jobs.iter().map(|job| Self::map_job(job, slug)).collect())
    }

    fn map_job(job: &Value, slug: &str) -> RawPosting {
        let mut posting = FIELDS.map(job);
        posting.location = city_country(job);
        let shortcode = first_text(job, &["shortcode"]);
        if !shortcode.is_empty() {
            posting.apply_url = format!("https://apply.workable.com/{slug}/j/{shortcode}/");
        }
        posting
    }
}

#[async_trait]
impl JobBoard for WorkableBoard {
    fn provider(&self) -> Provider {
        Provider::Workable
    }

    async fn fetch(&self, slug: &str) -> Result<Vec<RawPosting>> {
        let url = Self::endpoint(slug);
        let body = http::get_json(&self.client, &url).await?;
        Self::parse(&url, &body, slug)
    }
}
