// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;

/// Create a configured asynchronous HTTP client.
///
/// The timeout is the only bound on an upstream call; there are no retries.
pub fn create_async_client(config: &FetcherConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// GET `url` and decode the body as JSON.
pub async fn get_json(client: &Client, url: &str) -> Result<Value> {
    send_json(client.get(url), url).await
}

/// POST `body` as JSON to `url` with extra headers and decode the reply.
pub async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &B,
    headers: &[(&'static str, &str)],
) -> Result<Value> {
    let mut request = client.post(url).json(body);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    send_json(request, url).await
}

async fn send_json(request: RequestBuilder, url: &str) -> Result<Value> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::upstream(url, status));
    }
    let text = response.text().await?;
    decode_body(url, &text)
}

/// Decode a response body, tagging failures with the request URL.
pub fn decode_body(url: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| AppError::malformed(url, e))
}
