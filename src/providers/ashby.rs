// src/providers/ashby.rs

//! Ashby public job board API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::fields::{FieldMap, records};
use super::JobBoard;
use crate::error::{AppError, Result};
use crate::models::{Provider, RawPosting};
use crate::utils::http;

const FIELDS: FieldMap = FieldMap {
    id: &["id", "jobId"],
    title: &["title"],
    location: &["location.text", "location.name"],
    apply_url: &["jobUrl", "applyUrl"],
    description: &["descriptionPlain", "description"],
    posted_at: &["publishedAt", "updatedAt", "createdAt"],
};

pub struct AshbyBoard {
    client: Client,
}

impl AshbyBoard {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn endpoint(slug: &str) -> String {
        format!("https://jobs.ashbyhq.com/api/external/jobs?organizationSlug={slug}")
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
impl JobBoard for AshbyBoard {
    fn provider(&self) -> Provider {
        Provider::Ashby
    }

    async fn fetch(&self, slug: &str) -> Result<Vec<RawPosting>> {
        let url = Self::endpoint(slug);
        let body = http::get_json(&self.client, &url).await?;
        Self::parse(&url, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTimestamp;
    use serde_json::json;

    #[test]
    fn endpoint_shape() {
        assert_eq!(
            AshbyBoard::endpoint("ramp"),
            "https://jobs.ashbyhq.com/api/external/jobs?organizationSlug=ramp"
        );
    }

    #[test]
    fn maps_jobs_with_precedence() {
        let body = json!({"jobs": [
            {
                "id": "j-1",
                "title": "New Grad Engineer",
                "location": {"text": "London", "name": "UK"},
                "jobUrl": "https://jobs.ashbyhq.com/ramp/j-1",
                "description": "<p>Hi</p>",
                "updatedAt": "2025-03-01",
                "createdAt": "2025-02-01"
            },
            {
                "jobId": "j-2",
                "location": {"name": "Remote - UK"},
                "applyUrl": "https://jobs.ashbyhq.com/ramp/j-2/apply",
                "publishedAt": "2025-03-09T00:00:00Z"
            }
        ]});
        let jobs = AshbyBoard::parse("u", &body).unwrap();

        assert_eq!(jobs[0].location, "London");
        assert_eq!(jobs[0].description, "<p>Hi</p>");
        assert_eq!(jobs[0].posted_at, Some(RawTimestamp::Text("2025-03-01".to_string())));
        assert_eq!(jobs[1].id, "j-2");
        assert_eq!(jobs[1].location, "Remote - UK");
        assert_eq!(jobs[1].apply_url, "https://jobs.ashbyhq.com/ramp/j-2/apply");
        assert_eq!(
            jobs[1].posted_at,
            Some(RawTimestamp::Text("2025-03-09T00:00:00Z".to_string()))
        );
    }
}
