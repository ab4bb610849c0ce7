//! Tracker engine: page fetching, scraping, persistence and the pass pipeline.
mod config;
mod feed;
mod fetch;
mod harvest;
mod notify;
mod persist;
mod pipeline;
mod scrape;
mod store;
mod types;

pub use config::{TrackerConfig, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY};
pub use feed::build_feed;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use harvest::{HarvestError, Harvester};
pub use notify::NotificationLog;
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use pipeline::{run_pass, PassError, PassSummary};
pub use scrape::{parse_listing, parse_schedule, schedule_url, ConferenceLink, ScheduleRow};
pub use store::{
    CatalogStore, FilterStore, LoadStatus, LoadedFilter, EVENTS_FILENAME, FEED_FILENAME,
};
pub use types::{FailureKind, FetchError, FetchedPage};
