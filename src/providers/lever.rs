// src/providers/lever.rs

//! Lever postings API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::fields::FieldMap;
use super::JobBoard;
use crate::error::{AppError, Result};
use crate::models::{Provider, RawPosting};
use crate::utils::http;

const FIELDS: FieldMap = FieldMap {
    id: &["id", "_id", "slug"],
    title: &["text", "title"],
    location: &["categories.location"],
    apply_url: &["hostedUrl", "applyUrl"],
    description: &["descriptionPlain", "description"],
    posted_at: &["createdAt", "updatedAt"],
};

pub struct LeverBoard {
    client: Client,
}

impl LeverBoard {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn endpoint(slug: &str) -> String {
        format!("https://api.lever.co/v0/postings/{slug}?mode=json")
    }

    /// Lever answers with a bare array of postings.
    pub fn parse(url: &str, body: &Value) -> Result<Vec<RawPosting>> {
        let postings = body.as_array().ok_or(AppError::UnexpectedShape {
            url: url.to_string(),
            expected: "a top-level array",
        })?;
        Ok(postings.iter().map(|p| FIELDS.map(p)).collect())
    }
}

#[async_trait]
impl JobBoard for LeverBoard {
    fn provider(&self) -> Provider {
        Provider::Lever
    }

    async fn fetch(&self, slug: &str) -> Result<Vec<RawPosting>> {
        let url = Self::endpoint(slug);
        let body = http::get_json(&self.client, &url).await?;
        Self::parse(&url, &body)
    }
}
