// src/pipeline/run.rs

//! Full run: seed list -> aggregation -> feed and report on disk.

use crate::error::{AppError, Result};
use crate::models::{Config, SeedList};
use crate::pipeline::aggregate::{AggregateOutcome, Aggregator};
use crate::pipeline::report::ReportContext;
use crate::storage::ReportStorage;
use crate::utils::http;

/// Load the seed list named in `config`.
///
/// This is the only failure that stops a run before any fetch.
pub fn load_seed(config: &Config) -> Result<SeedList> {
    let paths = &config.paths;
    SeedList::load(&paths.companies_file, &paths.example_companies_file)
        .map_err(|e| AppError::config(format!("Cannot load seed list: {e}")))
}

/// Run the whole pipeline and write its artifacts through `storage`.
pub async fn run_pipeline(config: &Config, storage: &dyn ReportStorage) -> Result<AggregateOutcome> {
    let seed = load_seed(config)?;
    log::info!("Loaded {} companies", seed.companies.len());

    let client = http::create_async_client(&config.fetcher)?;
    let aggregator = Aggregator::from_config(config, client);
    let outcome = aggregator.run(&seed.companies).await;

    let seed_path = if seed.used_example {
        &config.paths.example_companies_file
    } else {
        &config.paths.companies_file
    };
    let source = seed_path.display().to_string();
    let context = ReportContext {
        max_age_days: aggregator.max_age_days(),
        source: &source,
    };
    let summary = storage.write_snapshot(&outcome.result, &context).await?;

    let stats = &outcome.stats;
    log::info!(
        "Sources: {} total, {} skipped, {} failed; portals failed: {}",
        stats.sources_total,
        stats.sources_skipped,
        stats.sources_failed,
        stats.portal_failures
    );
    log::info!(
        "Postings: {} fetched, {} duplicates, {} stale, {} kept ({:.1}s)",
        stats.fetched,
        stats.duplicates,
        stats.stale,
        stats.kept,
        (stats.end_time - stats.start_time).num_milliseconds() as f64 / 1000.0
    );
    log::info!(
        "Wrote {} postings generated at {} to {} and {}",
        summary.count,
        summary.timestamp.to_rfc3339(),
        summary.feed_location,
        summary.report_location
    );

    if seed.used_example {
        log::info!(
            "No {} found, the example list was used. Create it to control sources.",
            config.paths.companies_file.display()
        );
    }

    Ok(outcome)
}
