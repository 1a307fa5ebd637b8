//! Pure posting services.
//!
//! - Keyword relevance (`Classifier`)
//! - Date normalization and the recency window (`recency`)

mod classify;
pub mod recency;

pub use classify::{Classifier, contains_any};
