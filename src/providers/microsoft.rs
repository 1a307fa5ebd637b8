// src/providers/microsoft.rs

//! Microsoft careers search portal.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::fields::{FieldMap, records};
use super::{CareerPortal, early_filter};
use crate::error::{AppError, Result};
use crate::models::{MicrosoftPortalConfig, RawPosting};
use crate::utils::http;

const ORIGIN: &str = "https://careers.microsoft.com";
const REFERER: &str = "https://careers.microsoft.com/";

const COLLECTIONS: &[&str] = &["searchResults", "value", "jobs"];

const FIELDS: FieldMap = FieldMap {
    id: &["jobId", "id"],
    title: &["title", "jobTitle"],
    location: &["location", "formattedLocation"],
    apply_url: &["jobUrl", "url"],
    description: &[],
    posted_at: &["postedDate", "lastModified"],
};

/// JSON body of a search request.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub page: u32,
    pub page_size: u32,
    pub keywords: &'a str,
    pub location: &'a str,
    pub lang: &'a str,
}

pub struct MicrosoftPortal {
    client: Client,
    config: MicrosoftPortalConfig,
}

impl MicrosoftPortal {
    pub fn new(client: Client, config: MicrosoftPortalConfig) -> Self {
        Self { client, config }
    }

    pub fn search_request(&self) -> SearchRequest<'_> {
        SearchRequest {
            page: 1,
            page_size: self.config.page_size,
            keywords: &self.config.keywords,
            location: &self.config.location,
            lang: &self.config.lang,
        }
    }

    pub fn parse(&self, url: &str, body: &Value) -> Result<Vec<RawPosting>> {
        let results = records(body, COLLECTIONS).ok_or(AppError::UnexpectedShape {
            url: url.to_string(),
            expected: "a `searchResults`, `value` or `jobs` array",
        })?;
        let postings = results.iter().map(|r| FIELDS.map(r)).collect();
        Ok(early_filter(postings, &self.config.early_keywords))
    }
}

#[async_trait]
impl CareerPortal for MicrosoftPortal {
    fn name(&self) -> &str {
        "careers.microsoft.com"
    }

    fn company(&self) -> &str {
        &self.config.display_name
    }

    async fn fetch(&self) -> Result<Vec<RawPosting>> {
        let url = &self.config.search_url;
        let body = http::post_json(
            &self.client,
            url,
            &self.search_request(),
            &[("origin", ORIGIN), ("referer", REFERER)],
        )
        .await?;
        self.parse(url, &body)
    }
}
