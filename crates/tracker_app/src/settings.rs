use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use tracker_core::SortOrder;
use tracker_engine::TrackerConfig;

pub(crate) const SETTINGS_FILENAME: &str = "tracker.ron";

/// Operator overrides read from `tracker.ron`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub base_url: Option<String>,
    /// Directory holding the filter, the notification log and `results/`.
    pub data_dir: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub chronological_sort: bool,
    pub request_timeout_secs: Option<u64>,
}

impl AppSettings {
    pub fn into_config(self) -> TrackerConfig {
        let mut config = match &self.data_dir {
            Some(dir) => TrackerConfig::rooted_at(dir),
            None => TrackerConfig::default(),
        };
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.chronological_sort {
            config.sort_order = SortOrder::Chronological;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.fetch.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// A missing file means defaults; an unreadable one is logged and ignored.
pub(crate) fn load_settings(path: &Path) -> AppSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppSettings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return AppSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            AppSettings::default()
        }
    }
}
