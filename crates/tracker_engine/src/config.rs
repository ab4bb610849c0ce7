use std::path::{Path, PathBuf};

use tracker_core::SortOrder;

use crate::fetch::FetchSettings;

pub const DEFAULT_BASE_URL: &str = "https://conf.researchr.org/";
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Everything one pass needs to know about where to read and write.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub base_url: String,
    pub results_dir: PathBuf,
    pub filter_path: PathBuf,
    pub notification_log_path: PathBuf,
    /// Schedule pages fetched at the same time.
    pub concurrency: usize,
    pub sort_order: SortOrder,
    pub fetch: FetchSettings,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            results_dir: PathBuf::from("results"),
            filter_path: PathBuf::from("filter_config.json"),
            notification_log_path: PathBuf::from("notification.log"),
            concurrency: DEFAULT_CONCURRENCY,
            sort_order: SortOrder::default(),
            fetch: FetchSettings::default(),
        }
    }
}

impl TrackerConfig {
    /// Defaults with every file placed under `root`.
    pub fn rooted_at(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            results_dir: root.join(defaults.results_dir.as_path()),
            filter_path: root.join(defaults.filter_path.as_path()),
            notification_log_path: root.join(defaults.notification_log_path.as_path()),
            ..defaults
        }
    }
}
