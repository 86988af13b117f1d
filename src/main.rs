use std::process::ExitCode;

use chrono::Local;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod db;
mod models;
mod services;
mod utils;

use api::elen::ElenClient;
use config::{AppConfig, VERBOSE_INFO, VERBOSE_QUIET};
use services::extract_service::SeriesExtractor;
use services::point_service;
use services::sink_service::SinkWriter;
use utils::RunError;

const QUIET_DEPENDENCIES: [&str; 5] = ["sqlx=warn", "hyper=warn", "reqwest=warn", "html5ever=warn", "selectors=warn"];

/// Initialize tracing: RUST_LOG when set, otherwise the configured verbosity
fn init_tracing(config: &AppConfig) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(config.log_level().into())
        .from_env_lossy();

    // Keep dependencies quiet below warn unless RUST_LOG asks otherwise
    if config.verbosity >= VERBOSE_INFO && std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        for directive in QUIET_DEPENDENCIES {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Fetch, extract, build, write. One pass per invocation.
async fn run(config: &AppConfig) -> Result<(), RunError> {
    let extractor = SeriesExtractor::new(&config.extract)?;
    let writer = SinkWriter::from_config(&config.sinks);

    let page = ElenClient::new(config.page_url.as_str()).fetch_page().await?;
    let chart = extractor.extract(&page)?;

    // Points are dated today, whatever day the page shows
    let today = Local::now().date_naive();
    let points = point_service::build_points_local(chart.selected_series(), today, &config.extract.area);
    debug!("Built {} points for {} on {}", points.len(), config.extract.area, today);

    let report = writer.write(&points).await?;
    info!(
        "Saved {} {} prices for {}",
        report.points_written, config.extract.area, today
    );

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            let err = RunError::from(e);
            eprintln!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    init_tracing(&config);
    debug!("Configuration loaded, writing to {}", config.sinks.influx.server);

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Quiet runs still report why they failed
            if config.verbosity == VERBOSE_QUIET {
                eprintln!("{}", e);
            } else {
                error!("{}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
