// src/providers/greenhouse.rs

//! Greenhouse job board API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::fields::{FieldMap, records};
use super::JobBoard;
use crate::error::{AppError, Result};
use crate::models::{Provider, RawPosting};
use crate::utils::http;

const FIELDS: FieldMap = FieldMap {
    id: &["id"],
    title: &["title"],
    location: &["location.name"],
    apply_url: &["absolute_url"],
    description: &[],
    posted_at: &["updated_at", "created_at"],
};

pub struct GreenhouseBoard {
    client: Client,
}

impl GreenhouseBoard {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn endpoint(slug: &str) -> String {
        format!("https://boards-api.greenhouse.io/v1/boards/{slug}/jobs?content=true")
    }

    pub fn parse(url: &str, body: &Value) -> Result<Vec<RawPosting>> {
        let jobs = records(body, &["jobs"]).ok_or(AppError::UnexpectedShape {
            url: url.to_string(),
            expected: "a `jobs` array",
        })?;
        Ok(jobs.iter().map(|job| FIELDS.map(job)).collect())
    }
}

#[async_trait]
impl JobBoard for GreenhouseBoard {
    fn provider(&self) -> Provider {
        Provider::Greenhouse
    }

    async fn fetch(&self, slug: &str) -> Result<Vec<RawPosting>> {
        let url = Self::endpoint(slug);
        let body = http::get_json(&self.client, &url).await?;
        Self::parse(&url, &body)
    }
}
