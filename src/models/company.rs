// src/models/company.rs

//! Seed list entries and the ATS providers they point at.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Job board vendor a posting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Greenhouse,
    Lever,
    Ashby,
    Workable,
    SmartRecruiters,
    /// A company's own careers site, served by a portal
    Direct,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Greenhouse => "greenhouse",
            Provider::Lever => "lever",
            Provider::Ashby => "ashby",
            Provider::Workable => "workable",
            Provider::SmartRecruiters => "smartrecruiters",
            Provider::Direct => "direct",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greenhouse" => Ok(Provider::Greenhouse),
            "lever" => Ok(Provider::Lever),
            "ashby" => Ok(Provider::Ashby),
            "workable" => Ok(Provider::Workable),
            "smartrecruiters" => Ok(Provider::SmartRecruiters),
            "direct" => Ok(Provider::Direct),
            other => Err(other.to_string()),
        }
    }
}

/// The `ats` block of a seed entry.
///
/// Read loosely: a null block, a wrong-typed field or an unknown vendor
/// leaves a gap on that one entry instead of rejecting the whole file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AtsRef {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Board slug or host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl<'de> Deserialize<'de> for AtsRef {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self {
            kind: text_field(&value, "type"),
            slug: text_field(&value, "slug"),
        })
    }
}

/// String fields as-is, numbers stringified, anything else absent.
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One company from the seed list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySource {
    /// Canonical display name, used for every posting from this source
    pub name: String,

    #[serde(default)]
    pub ats: AtsRef,
}

/// Why a seed entry cannot be fetched. A skip condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceGap {
    MissingProvider,
    UnknownProvider(String),
    MissingIdentifier,
    /// Known provider without a registered adapter
    NoAdapter(Provider),
    /// Served by the direct portal stage instead of an ATS board
    DirectPortal,
}

impl fmt::Display for SourceGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceGap::MissingProvider => write!(f, "no ats.type"),
            SourceGap::UnknownProvider(kind) => write!(f, "unsupported ats.type '{kind}'"),
            SourceGap::MissingIdentifier => write!(f, "no ats.slug"),
            SourceGap::NoAdapter(provider) => write!(f, "no adapter registered for {provider}"),
            SourceGap::DirectPortal => write!(f, "direct company, handled by portals"),
        }
    }
}

impl CompanySource {
    pub fn new(name: impl Into<String>, provider: Provider, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ats: AtsRef {
                kind: Some(provider.as_str().to_string()),
                slug: Some(slug.into()),
            },
        }
    }

    /// Resolve the provider and identifier this entry should be fetched with.
    pub fn resolve(&self) -> std::result::Result<(Provider, &str), SourceGap> {
        let kind = self
            .ats
            .kind
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(SourceGap::MissingProvider)?;
        let provider = kind.parse::<Provider>().map_err(SourceGap::UnknownProvider)?;
        if provider == Provider::Direct {
            return Err(SourceGap::DirectPortal);
        }
        let slug = self
            .ats
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SourceGap::MissingIdentifier)?;
        Ok((provider, slug))
    }

    /// Short `type:slug` label for log lines.
    pub fn label(&self) -> String {
        format!(
            "{}:{}",
            self.ats.kind.as_deref().unwrap_or("?"),
            self.ats.slug.as_deref().unwrap_or("?")
        )
    }

    /// Load a seed list from a JSON array file.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A loaded seed list and whether it came from the example file.
#[derive(Debug, Clone)]
pub struct SeedList {
    pub companies: Vec<CompanySource>,
    pub used_example: bool,
}

impl SeedList {
    /// Load `primary`, or `example` when `primary` does not exist.
    pub fn load(primary: &Path, example: &Path) -> Result<Self> {
        if primary.exists() {
            return Ok(Self {
                companies: CompanySource::load_all(primary)?,
                used_example: false,
            });
        }
        log::warn!(
            "No seed list at {}, using {}",
            primary.display(),
            example.display()
        );
        Ok(Self {
            companies: CompanySource::load_all(example)?,
            used_example: true,
        })
    }
}
