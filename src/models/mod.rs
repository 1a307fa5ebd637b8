// src/models/mod.rs

//! Domain models for the aggregator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod company;
mod config;
mod posting;

// Re-export all public types
pub use company::{AtsRef, CompanySource, Provider, SeedList, SourceGap};
pub use config::{
    AmazonPortalConfig, Config, FetcherConfig, FilterConfig, LoggingConfig,
    MicrosoftPortalConfig, PathsConfig, PortalsConfig,
};
pub use posting::{Posting, RawPosting, RawTimestamp, ResultSet, RunStats};
