//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Region, seniority and recency filters
    #[serde(default)]
    pub filters: FilterConfig,

    /// Direct company career portals
    #[serde(default)]
    pub portals: PortalsConfig,

    /// Input and output file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.max_concurrent == 0 {
            return Err(AppError::validation("fetcher.max_concurrent must be > 0"));
        }
        if !has_keyword(&self.filters.region_keywords) {
            return Err(AppError::validation("filters.region_keywords is empty"));
        }
        if !has_keyword(&self.filters.seniority_keywords) {
            return Err(AppError::validation("filters.seniority_keywords is empty"));
        }
        for name in &self.portals.enabled {
            if !matches!(name.as_str(), "amazon" | "microsoft") {
                return Err(AppError::validation(format!(
                    "portals.enabled contains unknown portal '{name}'"
                )));
            }
        }
        Ok(())
    }
}

fn has_keyword(keywords: &[String]) -> bool {
    keywords.iter().any(|k| !k.trim().is_empty())
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for every upstream request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum number of seed entries fetched at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Posting filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// A posting is in the target region if its location contains any of these
    #[serde(default = "defaults::region_keywords")]
    pub region_keywords: Vec<String>,

    /// A posting is entry-level if its title or description contains any of these
    #[serde(default = "defaults::seniority_keywords")]
    pub seniority_keywords: Vec<String>,

    /// Postings older than this many days are dropped (unknown age is kept)
    #[serde(default = "defaults::max_age_days")]
    pub max_age_days: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            region_keywords: defaults::region_keywords(),
            seniority_keywords: defaults::seniority_keywords(),
            max_age_days: defaults::max_age_days(),
        }
    }
}

/// Direct company portal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalsConfig {
    /// Portals queried after the seed list (`amazon`, `microsoft`)
    #[serde(default = "defaults::enabled_portals")]
    pub enabled: Vec<String>,

    #[serde(default)]
    pub amazon: AmazonPortalConfig,

    #[serde(default)]
    pub microsoft: MicrosoftPortalConfig,
}

impl Default for PortalsConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled_portals(),
            amazon: AmazonPortalConfig::default(),
            microsoft: MicrosoftPortalConfig::default(),
        }
    }
}

/// amazon.jobs search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmazonPortalConfig {
    #[serde(default = "defaults::amazon_display_name")]
    pub display_name: String,

    #[serde(default = "defaults::amazon_base_url")]
    pub base_url: String,

    /// ISO 3166 alpha-3 country filter
    #[serde(default = "defaults::amazon_country_code")]
    pub country_code: String,

    #[serde(default = "defaults::city")]
    pub city: String,

    #[serde(default = "defaults::amazon_result_limit")]
    pub result_limit: u32,

    /// Titles must contain one of these before the posting leaves the portal
    #[serde(default = "defaults::early_keywords")]
    pub early_keywords: Vec<String>,
}

impl Default for AmazonPortalConfig {
    fn default() -> Self {
        Self {
            display_name: defaults::amazon_display_name(),
            base_url: defaults::amazon_base_url(),
            country_code: defaults::amazon_country_code(),
            city: defaults::city(),
            result_limit: defaults::amazon_result_limit(),
            early_keywords: defaults::early_keywords(),
        }
    }
}

/// Microsoft careers search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicrosoftPortalConfig {
    #[serde(default = "defaults::microsoft_display_name")]
    pub display_name: String,

    #[serde(default = "defaults::microsoft_search_url")]
    pub search_url: String,

    #[serde(default = "defaults::microsoft_keywords")]
    pub keywords: String,

    #[serde(default = "defaults::city")]
    pub location: String,

    #[serde(default = "defaults::microsoft_page_size")]
    pub page_size: u32,

    #[serde(default = "defaults::microsoft_lang")]
    pub lang: String,

    #[serde(default = "defaults::early_keywords")]
    pub early_keywords: Vec<String>,
}

impl Default for MicrosoftPortalConfig {
    fn default() -> Self {
        Self {
            display_name: defaults::microsoft_display_name(),
            search_url: defaults::microsoft_search_url(),
            keywords: defaults::microsoft_keywords(),
            location: defaults::city(),
            page_size: defaults::microsoft_page_size(),
            lang: defaults::microsoft_lang(),
            early_keywords: defaults::early_keywords(),
        }
    }
}

/// File locations, relative to the working directory unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::companies_file")]
    pub companies_file: PathBuf,

    /// Used when `companies_file` does not exist
    #[serde(default = "defaults::example_companies_file")]
    pub example_companies_file: PathBuf,

    #[serde(default = "defaults::output_json")]
    pub output_json: PathBuf,

    #[serde(default = "defaults::output_report")]
    pub output_report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            companies_file: defaults::companies_file(),
            example_companies_file: defaults::example_companies_file(),
            output_json: defaults::output_json(),
            output_report: defaults::output_report(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // Fetcher defaults
    pub fn user_agent() -> String {
        "tracker-eu/1.0".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Filter defaults
    pub fn region_keywords() -> Vec<String> {
        strings(&[
            "london",
            "city of london",
            "greater london",
            "london, uk",
            "london, united kingdom",
            "gb-london",
        ])
    }
    pub fn seniority_keywords() -> Vec<String> {
        strings(&[
            "new grad",
            "new graduate",
            "graduate",
            "entry level",
            "junior",
            "early career",
            "jeune diplômé",
            "recent graduate",
            "grad role",
            "graduate program",
            "bac+5",
        ])
    }
    pub fn max_age_days() -> u32 {
        3
    }

    // Portal defaults
    pub fn enabled_portals() -> Vec<String> {
        strings(&["amazon", "microsoft"])
    }
    pub fn early_keywords() -> Vec<String> {
        strings(&[
            "new grad",
            "graduate",
            "entry level",
            "early career",
            "university",
        ])
    }
    pub fn city() -> String {
        "London".into()
    }
    pub fn amazon_display_name() -> String {
        "Amazon".into()
    }
    pub fn amazon_base_url() -> String {
        "https://www.amazon.jobs".into()
    }
    pub fn amazon_country_code() -> String {
        "GBR".into()
    }
    pub fn amazon_result_limit() -> u32 {
        200
    }
    pub fn microsoft_display_name() -> String {
        "Microsoft".into()
    }
    pub fn microsoft_search_url() -> String {
        "https://gcsservices.careers.microsoft.com/search/api/v1/search".into()
    }
    pub fn microsoft_keywords() -> String {
        "graduate OR new grad OR entry level".into()
    }
    pub fn microsoft_page_size() -> u32 {
        50
    }
    pub fn microsoft_lang() -> String {
        "en_us".into()
    }

    // Path defaults
    pub fn companies_file() -> PathBuf {
        "data/companies.json".into()
    }
    pub fn example_companies_file() -> PathBuf {
        "data/companies.example.json".into()
    }
    pub fn output_json() -> PathBuf {
        "data/eu_roles.json".into()
    }
    pub fn output_report() -> PathBuf {
        "README.md".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
