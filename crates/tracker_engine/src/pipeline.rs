use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use engine_logging::{engine_info, engine_warn};
use tracker_core::{
    new_events_message, resolve_event, Admission, Discovery, EventCatalog, EventRecord,
    ResolvedEvent,
};

use crate::config::TrackerConfig;
use crate::feed::build_feed;
use crate::fetch::Fetcher;
use crate::harvest::{HarvestError, Harvester};
use crate::notify::NotificationLog;
use crate::persist::{ensure_output_dir, PersistError};
use crate::store::{CatalogStore, FilterStore, LoadStatus};

#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error(transparent)]
    Harvest(#[from] HarvestError),
    #[error("results directory unusable: {0}")]
    OutputDir(PersistError),
    #[error("filter config not writable: {0}")]
    FilterWrite(PersistError),
    #[error("results not writable: {0}")]
    ResultsWrite(PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub filter_status: LoadStatus,
    pub harvested: usize,
    pub malformed: usize,
    pub admitted: usize,
    pub discoveries: Vec<Discovery>,
    pub newly_appeared: BTreeSet<String>,
}

/// One full harvest: fetch, resolve, reconcile the filter, admit, diff and persist.
///
/// Events are admitted against `today`. The filter file is written before the
/// catalog, so a crash between the two still leaves discoveries recorded.
///
/// Every harvested row feeds the filter, including rows whose date text
/// cannot be resolved; those rows are kept out of the catalog and the feed.
///
/// Besides an unusable results directory or filter file, an unreachable
/// listing page is also fatal here: the pass stops before writing anything
/// instead of continuing with zero conferences and replacing the catalog with
/// an empty one.
pub async fn run_pass(
    config: &TrackerConfig,
    fetcher: Arc<dyn Fetcher>,
    today: NaiveDate,
) -> Result<PassSummary, PassError> {
    let notifications = NotificationLog::new(&config.notification_log_path);
    ensure_output_dir(&config.results_dir).map_err(PassError::OutputDir)?;

    let filter_store = FilterStore::new(&config.filter_path);
    let loaded = filter_store.load();
    if let LoadStatus::Corrupt(err) = &loaded.status {
        match filter_store.set_aside() {
            Ok(kept) => notifications.record(&format!(
                "Filter config reset to empty: {err} (previous file kept as {})",
                kept.display()
            )),
            Err(copy_err) => {
                engine_warn!("Failed to keep unusable filter config: {}", copy_err);
                notifications.record(&format!("Filter config reset to empty: {err}"));
            }
        }
    }
    let mut filter = loaded.config;

    let harvester = Harvester::new(fetcher, config.base_url.clone(), config.concurrency);
    let harvested = harvester.harvest().await?;
    let harvested_count = harvested.len();

    let discoveries = filter.reconcile(&harvested);
    for discovery in &discoveries {
        notifications.record(&discovery.to_string());
    }
    filter_store
        .save(&filter)
        .map_err(PassError::FilterWrite)?;

    let mut resolved: Vec<ResolvedEvent> = Vec::with_capacity(harvested.len());
    let mut malformed = 0;
    for event in harvested {
        let label = format!("{} - {} - {}", event.conference, event.track, event.content);
        match resolve_event(event) {
            Ok(event) => resolved.push(event),
            Err(err) => {
                malformed += 1;
                notifications.record(&format!("Skipping {label}: {err}"));
            }
        }
    }

    let records: Vec<EventRecord> = resolved.iter().map(EventRecord::from_resolved).collect();

    let admission = Admission::new(&filter, today);
    let admitted: Vec<ResolvedEvent> = resolved
        .into_iter()
        .filter(|event| match admission.admits_event(event) {
            Ok(admitted) => admitted,
            Err(err) => {
                engine_warn!("Not admitting {}: {}", event.name(), err);
                false
            }
        })
        .collect();

    let catalog = EventCatalog::new(records, config.sort_order);
    let catalog_store = CatalogStore::new(&config.results_dir);
    let newly_appeared = match catalog_store.load_previous() {
        Some(previous) => catalog.newly_appeared_since(&previous),
        None => BTreeSet::new(),
    };
    if let Some(message) = new_events_message(&newly_appeared) {
        notifications.record(&message);
    }

    catalog_store
        .save_records(catalog.records())
        .map_err(PassError::ResultsWrite)?;
    catalog_store
        .save_feed(&build_feed(&admitted))
        .map_err(PassError::ResultsWrite)?;

    let summary = PassSummary {
        filter_status: loaded.status,
        harvested: harvested_count,
        malformed,
        admitted: admitted.len(),
        discoveries,
        newly_appeared,
    };
    engine_info!(
        "Pass done: {} harvested, {} malformed, {} admitted, {} new filter keys",
        summary.harvested,
        summary.malformed,
        summary.admitted,
        summary.discoveries.len()
    );
    Ok(summary)
}
