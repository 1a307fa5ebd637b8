// src/providers/fields.rs

//! Vendor field precedence.
//!
//! Every logical attribute is read through an ordered list of dotted JSON
//! paths; the first path holding a non-empty value wins. `null`, `false`, `0`
//! and `""` count as empty.

use serde_json::Value;

use crate::models::{RawPosting, RawTimestamp};

/// Ordered dotted paths tried for one attribute.
pub type Accessors = &'static [&'static str];

/// Accessor lists for every shared attribute of one vendor record.
///
/// An empty list leaves the attribute empty, for vendors that do not expose
/// it or where the adapter computes it.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pub id: Accessors,
    pub title: Accessors,
    pub location: Accessors,
    pub apply_url: Accessors,
    pub description: Accessors,
    pub posted_at: Accessors,
}

impl FieldMap {
    pub fn map(&self, record: &Value) -> RawPosting {
        RawPosting {
            id: first_text(record, self.id),
            title: first_text(record, self.title),
            location: first_text(record, self.location),
            apply_url: first_text(record, self.apply_url),
            description: first_text(record, self.description),
            posted_at: first_timestamp(record, self.posted_at),
        }
    }
}

/// Follow a dotted path through nested objects.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |value, key| value.get(key))
}

/// Whether a value counts as present.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First present value among `accessors`.
pub fn first<'a>(record: &'a Value, accessors: &[&str]) -> Option<&'a Value> {
    accessors
        .iter()
        .filter_map(|path| lookup(record, path))
        .find(|value| is_present(value))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First present scalar among `accessors` as text, or `""`.
pub fn first_text(record: &Value, accessors: &[&str]) -> String {
    accessors
        .iter()
        .filter_map(|path| lookup(record, path))
        .filter(|value| is_present(value))
        .find_map(scalar_text)
        .unwrap_or_default()
}

/// First present date value among `accessors`, left undecoded.
pub fn first_timestamp(record: &Value, accessors: &[&str]) -> Option<RawTimestamp> {
    match first(record, accessors)? {
        Value::Number(n) => n.as_f64().map(RawTimestamp::Number),
        Value::String(s) => Some(RawTimestamp::Text(s.clone())),
        _ => None,
    }
}

/// Records of the first present collection among `collections`.
///
/// `None` when that value is not an array.
pub fn records<'a>(body: &'a Value, collections: &[&str]) -> Option<&'a [Value]> {
    match first(body, collections) {
        Some(Value::Array(items)) => Some(items),
        Some(_) => None,
        None => Some(&[]),
    }
}

/// Join the non-empty parts with `", "`.
pub fn join_present<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"{city}, {country}"` when a city is known, otherwise the country alone.
pub fn city_country(record: &Value) -> String {
    let city = first_text(record, &["location.city"]);
    let country = first_text(record, &["location.country"]);
    if city.is_empty() {
        country
    } else {
        join_present(&[city, country])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_text_follows_precedence() {
        let record = json!({"text": "", "title": "Graduate Engineer", "name": "ignored"});
        assert_eq!(first_text(&record, &["text", "title", "name"]), "Graduate Engineer");
        assert_eq!(first_text(&record, &["name", "title"]), "ignored");
        assert_eq!(first_text(&record, &["missing"]), "");
    }

    #[test]
    fn numbers_are_stringified_and_zero_is_empty() {
        let record = json!({"id": 0, "job_id": 4411223});
        assert_eq!(first_text(&record, &["id", "job_id"]), "4411223");
    }

    #[test]
    fn nested_paths() {
        let record = json!({"location": {"name": "London, UK"}, "categories": null});
        assert_eq!(first_text(&record, &["location.text", "location.name"]), "London, UK");
        assert_eq!(first_text(&record, &["categories.location"]), "");
    }

    #[test]
    fn timestamps_keep_their_kind() {
        let record = json!({"createdAt": 1_700_000_000_000u64, "updated_at": "2025-01-01"});
        assert_eq!(
            first_timestamp(&record, &["createdAt"]),
            Some(RawTimestamp::Number(1_700_000_000_000.0))
        );
        assert_eq!(
            first_timestamp(&record, &["published", "updated_at"]),
            Some(RawTimestamp::Text("2025-01-01".to_string()))
        );
        assert_eq!(first_timestamp(&record, &["nope"]), None);
    }

    #[test]
    fn records_picks_first_collection() {
        let body = json!({"content": [], "results": [{"id": 1}], "data": [{}, {}]});
        // An empty array still counts as present
        assert_eq!(records(&body, &["content", "results"]).unwrap().len(), 0);
        assert_eq!(records(&body, &["results", "data"]).unwrap().len(), 1);
        assert_eq!(records(&body, &["missing"]).unwrap().len(), 0);
        assert!(records(&json!({"jobs": "oops"}), &["jobs"]).is_none());
    }

    #[test]
    fn city_country_formats() {
        assert_eq!(
            city_country(&json!({"location": {"city": "London", "country": "United Kingdom"}})),
            "London, United Kingdom"
        );
        assert_eq!(city_country(&json!({"location": {"country": "GB"}})), "GB");
        assert_eq!(city_country(&json!({})), "");
    }

    #[test]
    fn field_map_defaults_to_empty() {
        const MAP: FieldMap = FieldMap {
            id: &["id"],
            title: &["title"],
            location: &[],
            apply_url: &["url"],
            description: &[],
            posted_at: &["date"],
        };
        let raw = MAP.map(&json!({"title": "Intern"}));
        assert_eq!(raw.title, "Intern");
        assert_eq!(raw.id, "");
        assert_eq!(raw.location, "");
        assert!(raw.posted_at.is_none());
    }
}
