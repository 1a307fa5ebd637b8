//! grad-radar CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grad_radar::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    providers,
    storage::LocalStorage,
    utils::http,
};

/// grad-radar - London entry-level roles from ATS job boards
#[derive(Parser, Debug)]
#[command(
    name = "grad-radar",
    version,
    about = "Aggregates entry-level job postings from ATS job boards"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all sources and write the feed and report
    Run {
        /// Keep postings at most this many days old
        #[arg(long)]
        max_days: Option<u32>,

        /// Seed list to use instead of the configured one
        #[arg(long)]
        companies: Option<PathBuf>,
    },

    /// Query the direct company portals and print what they return
    Portals,

    /// Validate configuration and the seed list
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(&cli.config);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });

    log::info!("grad-radar starting...");

    match cli.command {
        Command::Run { max_days, companies } => {
            if let Some(days) = max_days {
                config.filters.max_age_days = days;
            }
            if let Some(path) = companies {
                config.paths.companies_file = path;
            }
            config.validate()?;

            let storage = LocalStorage::from_paths(&config.paths);
            let outcome = pipeline::run_pipeline(&config, &storage).await?;

            log::info!("Run complete: {} postings", outcome.result.count);
        }

        Command::Portals => {
            let client = http::create_async_client(&config.fetcher)?;
            let portals = providers::enabled_portals(&client, &config.portals);
            let probes = pipeline::probe_portals(&portals).await;
            println!("{}", serde_json::to_string_pretty(&probes)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let seed = pipeline::load_seed(&config)?;
            let mut gaps = 0;
            for company in &seed.companies {
                if let Err(gap) = company.resolve() {
                    gaps += 1;
                    log::warn!("{} ({}): {}", company.name, company.label(), gap);
                }
            }
            log::info!(
                "✓ Seed list OK: {} companies, {} will be skipped",
                seed.companies.len(),
                gaps
            );

            if seed.companies.is_empty() {
                return Err(AppError::validation("Seed list is empty"));
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
