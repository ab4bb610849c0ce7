mod settings;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use tracker_core::{aoe_today, SortOrder};
use tracker_engine::{run_pass, ReqwestFetcher};

use crate::settings::{load_settings, SETTINGS_FILENAME};

const LOG_FILENAME: &str = "tracker.log";

fn main() -> anyhow::Result<()> {
    engine_logging::initialize(
        LogDestination::Both(Path::new(LOG_FILENAME)),
        LevelFilter::Info,
    );

    let config = load_settings(Path::new(SETTINGS_FILENAME)).into_config();
    let today = aoe_today();
    engine_info!(
        "Tracking {} into {:?} as of {} (AoE)",
        config.base_url,
        config.results_dir,
        today
    );
    if config.sort_order == SortOrder::Chronological {
        engine_info!("Catalog sorted by first calendar date");
    }

    let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
    let runtime = tokio::runtime::Runtime::new().context("cannot start async runtime")?;
    let summary = runtime
        .block_on(run_pass(&config, fetcher, today))
        .context("tracking pass failed")?;

    engine_info!(
        "{} events harvested, {} skipped as malformed, {} in the feed",
        summary.harvested,
        summary.malformed,
        summary.admitted
    );
    if !summary.discoveries.is_empty() {
        engine_info!(
            "{} new filter entries need review in {:?}",
            summary.discoveries.len(),
            config.filter_path
        );
    }
    if !summary.newly_appeared.is_empty() {
        engine_info!(
            "Changed conferences: {}",
            summary
                .newly_appeared
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}
