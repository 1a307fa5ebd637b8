// src/providers/smartrecruiters.rs

//! SmartRecruiters postings API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::fields::{FieldMap, city_country, first_text, records};
use super::JobBoard;
use crate::error::{AppError, Result};
use crate::models::{Provider, RawPosting};
use crate::utils::http;

const COLLECTIONS: &[&str] = &["content", "results", "data"];

// Location and the link fallback are built in `map_posting`.
const FIELDS: FieldMap = FieldMap {
    id: &["id", "uuid"],
    title: &["name", "title"],
    location: &[],
    apply_url: &["applyUrl", "ref"],
    description: &[],
    posted_at: &["releasedDate", "updatedAt"],
};

pub struct SmartRecruitersBoard {
    client: Client,
}

impl SmartRecruitersBoard {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn endpoint(slug: &str) -> String {
        format!("https://api.smartrecruiters.com/v1/companies/{slug}/postings?limit=200")
    }

    pub fn parse(url: &str, body: &Value, slug: &str) -> Result<Vec<RawPosting>> {
        let postings = records(body, COLLECTIONS).ok_or(AppError::UnexpectedShape {
            url: url.to_string(),
            expected: "a `content`, `results` or `data` array",
        })?;
        Ok(postings.iter().map(|p| Self::map_posting(p, slug)).collect())
    }

    fn map_posting(record: &Value, slug: &str) -> RawPosting {
        let mut posting = FIELDS.map(record);
        posting.location = city_country(record);
        let id = first_text(record, &["id"]);
        if posting.apply_url.is_empty() && !id.is_empty() {
            posting.apply_url = format!("https://jobs.smartrecruiters.com/{slug}/{id}");
        }
        posting
    }
}

#[async_trait]
impl JobBoard for SmartRecruitersBoard {
    fn provider(&self) -> Provider {
        Provider::SmartRecruiters
    }

    async fn fetch(&self, slug: &str) -> Result<Vec<RawPosting>> {
        let url = Self::endpoint(slug);
        let body = http::get_json(&self.client, &url).await?;
        Self::parse(&url, &body, slug)
    }
}
