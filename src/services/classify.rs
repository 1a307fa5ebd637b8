// src/services/classify.rs

//! Region and seniority keyword matching.

use crate::models::FilterConfig;

/// Case-insensitive substring match of any keyword in `text`.
///
/// `keywords` must already be lower-cased. Matching is not tokenized, so
/// "new-london" contains "london".
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(k.as_str()))
}

fn normalize(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Keyword predicates deciding whether a posting is relevant.
#[derive(Debug, Clone)]
pub struct Classifier {
    region: Vec<String>,
    seniority: Vec<String>,
}

impl Classifier {
    pub fn new(region: &[String], seniority: &[String]) -> Self {
        Self {
            region: normalize(region),
            seniority: normalize(seniority),
        }
    }

    pub fn from_config(filters: &FilterConfig) -> Self {
        Self::new(&filters.region_keywords, &filters.seniority_keywords)
    }

    /// True if the location mentions a target region.
    pub fn is_target_region(&self, location: &str) -> bool {
        contains_any(location, &self.region)
    }

    /// True if the title or the description mentions an entry-level keyword.
    pub fn is_target_seniority(&self, title: &str, description: &str) -> bool {
        contains_any(title, &self.seniority) || contains_any(description, &self.seniority)
    }

    /// Both filters at once.
    pub fn is_relevant(&self, location: &str, title: &str, description: &str) -> bool {
        self.is_target_region(location) && self.is_target_seniority(title, description)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_matches_london() {
        let c = Classifier::default();
        assert!(c.is_target_region("London, United Kingdom"));
        assert!(c.is_target_region("LONDON"));
        assert!(c.is_target_region("GB-London"));
        assert!(!c.is_target_region("Paris, France"));
        assert!(!c.is_target_region(""));
    }

    #[test]
    fn region_match_is_substring_not_token() {
        let c = Classifier::default();
        assert!(c.is_target_region("new-london, CT"));
        assert!(c.is_target_region("New London"));
    }

    #[test]
    fn seniority_matches_title_or_description() {
        let c = Classifier::default();
        assert!(!c.is_target_seniority("Senior Staff Engineer", ""));
        assert!(c.is_target_seniority("Graduate Software Engineer", ""));
        assert!(c.is_target_seniority("Software Engineer", "Open to recent graduates"));
        assert!(c.is_target_seniority("Ingénieur Jeune Diplômé", ""));
        assert!(c.is_target_seniority("Junior Analyst", ""));
        assert!(!c.is_target_seniority("", ""));
    }

    #[test]
    fn relevance_needs_both() {
        let c = Classifier::default();
        assert!(c.is_relevant("London", "Graduate Engineer", ""));
        assert!(!c.is_relevant("Berlin", "Graduate Engineer", ""));
        assert!(!c.is_relevant("London", "Principal Engineer", ""));
    }

    #[test]
    fn keywords_are_normalized() {
        let c = Classifier::new(
            &["  Paris ".to_string(), "".to_string()],
            &["Stage".to_string()],
        );
        assert!(c.is_target_region("paris, france"));
        assert!(!c.is_target_region("London"));
        assert!(c.is_target_seniority("STAGE - Data", ""));
    }
}
