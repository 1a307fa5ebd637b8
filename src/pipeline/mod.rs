//! Pipeline entry points.
//!
//! - `run_pipeline`: Load the seed list, aggregate, write feed and report
//! - `probe_portals`: Query the direct portals on their own

pub mod aggregate;
pub mod portals;
pub mod report;
pub mod run;

pub use aggregate::{AggregateOutcome, Aggregator, sort_postings};
pub use portals::{PortalProbe, probe_portals};
pub use run::{load_seed, run_pipeline};
