// src/pipeline/portals.rs

//! Direct portal smoke test.

use std::sync::Arc;

use serde::Serialize;

use crate::models::RawPosting;
use crate::providers::CareerPortal;

const SAMPLE_SIZE: usize = 3;

/// What one portal returned, or why it failed.
#[derive(Debug, Serialize)]
pub struct PortalProbe {
    pub portal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<RawPosting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Query each portal once and report counts plus the first few postings.
pub async fn probe_portals(portals: &[Arc<dyn CareerPortal>]) -> Vec<PortalProbe> {
    let mut probes = Vec::with_capacity(portals.len());
    for portal in portals {
        let probe = match portal.fetch().await {
            Ok(postings) => PortalProbe {
                portal: portal.name().to_string(),
                count: Some(postings.len()),
                sample: Some(postings.into_iter().take(SAMPLE_SIZE).collect()),
                error: None,
            },
            Err(error) => {
                log::warn!("Portal {} failed: {}", portal.name(), error);
                PortalProbe {
                    portal: portal.name().to_string(),
                    count: None,
                    sample: None,
                    error: Some(error.to_string()),
                }
            }
        };
        probes.push(probe);
    }
    probes
}
