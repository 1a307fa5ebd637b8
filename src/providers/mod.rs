//! Job source adapters.
//!
//! Each ATS vendor has a `JobBoard` that fetches one organization's postings
//! and maps the vendor's fields onto `RawPosting`. Direct company sites are
//! `CareerPortal`s: they take no identifier and pre-filter their own
//! (usually large) result sets by title.
//!
//! Field precedence per vendor lives in a `FieldMap` constant at the top of
//! each adapter.

mod amazon;
mod ashby;
pub mod fields;
mod greenhouse;
mod lever;
mod microsoft;
mod smartrecruiters;
mod workable;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::{PortalsConfig, Provider, RawPosting};
use crate::services::contains_any;

pub use amazon::AmazonPortal;
pub use ashby::AshbyBoard;
pub use greenhouse::GreenhouseBoard;
pub use lever::LeverBoard;
pub use microsoft::{MicrosoftPortal, SearchRequest};
pub use smartrecruiters::SmartRecruitersBoard;
pub use workable::WorkableBoard;

/// An ATS vendor API.
#[async_trait]
pub trait JobBoard: Send + Sync {
    fn provider(&self) -> Provider;

    /// Fetch every posting for one organization slug.
    ///
    /// Fails on non-success status or an undecodable body. Individual
    /// incomplete records never fail the call.
    async fn fetch(&self, identifier: &str) -> Result<Vec<RawPosting>>;
}

/// A company's own careers search.
#[async_trait]
pub trait CareerPortal: Send + Sync {
    /// Portal host, for logs
    fn name(&self) -> &str;

    /// Canonical company name for every posting from this portal
    fn company(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<RawPosting>>;
}

/// Fixed mapping from provider to its adapter.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    boards: HashMap<Provider, Arc<dyn JobBoard>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with an adapter for every supported ATS vendor.
    pub fn standard(client: Client) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GreenhouseBoard::new(client.clone())));
        registry.register(Arc::new(LeverBoard::new(client.clone())));
        registry.register(Arc::new(AshbyBoard::new(client.clone())));
        registry.register(Arc::new(WorkableBoard::new(client.clone())));
        registry.register(Arc::new(SmartRecruitersBoard::new(client)));
        registry
    }

    /// Register `board` under its own provider, replacing any previous one.
    pub fn register(&mut self, board: Arc<dyn JobBoard>) {
        self.boards.insert(board.provider(), board);
    }

    pub fn get(&self, provider: Provider) -> Option<Arc<dyn JobBoard>> {
        self.boards.get(&provider).cloned()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

/// Portals switched on in `config`, in the order they are listed.
pub fn enabled_portals(client: &Client, config: &PortalsConfig) -> Vec<Arc<dyn CareerPortal>> {
    let mut portals: Vec<Arc<dyn CareerPortal>> = Vec::new();
    for name in &config.enabled {
        match name.as_str() {
            "amazon" => portals.push(Arc::new(AmazonPortal::new(
                client.clone(),
                config.amazon.clone(),
            ))),
            "microsoft" => portals.push(Arc::new(MicrosoftPortal::new(
                client.clone(),
                config.microsoft.clone(),
            ))),
            other => log::warn!("Unknown portal '{}' in config, ignoring", other),
        }
    }
    portals
}

/// Keep postings whose title contains one of `keywords`.
pub(crate) fn early_filter(postings: Vec<RawPosting>, keywords: &[String]) -> Vec<RawPosting> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    postings
        .into_iter()
        .filter(|p| contains_any(&p.title, &keywords))
        .collect()
}
