use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use serde::Serialize;
use tracker_core::{ConfigLoadError, EventRecord, FilterConfig};

use crate::persist::{write_atomic, PersistError};

pub const EVENTS_FILENAME: &str = "conference_events.jsonl";
pub const FEED_FILENAME: &str = "conference_events.ics";

/// How the filter file looked when it was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Missing,
    /// The file exists but was unusable; an empty config was substituted.
    Corrupt(ConfigLoadError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFilter {
    pub config: FilterConfig,
    pub status: LoadStatus,
}

/// `filter_config.json` on disk.
#[derive(Debug, Clone)]
pub struct FilterStore {
    path: PathBuf,
}

impl FilterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing or corrupt file yields an empty config, and the
    /// status tells the two apart.
    pub fn load(&self) -> LoadedFilter {
        let corrupt = |message: String| LoadedFilter {
            config: FilterConfig::default(),
            status: LoadStatus::Corrupt(ConfigLoadError {
                path: self.path.display().to_string(),
                message,
            }),
        };

        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return LoadedFilter {
                    config: FilterConfig::default(),
                    status: LoadStatus::Missing,
                };
            }
            Err(err) => return corrupt(err.to_string()),
        };

        match serde_json::from_str(&content) {
            Ok(config) => {
                engine_info!("Loaded filter config from {:?}", self.path);
                LoadedFilter {
                    config,
                    status: LoadStatus::Loaded,
                }
            }
            Err(err) => corrupt(err.to_string()),
        }
    }

    /// Where [`FilterStore::set_aside`] copies an unusable file.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Copy the current file next to itself before it is overwritten.
    pub fn set_aside(&self) -> Result<PathBuf, PersistError> {
        let target = self.corrupt_path();
        fs::copy(&self.path, &target)?;
        engine_warn!("Kept unusable filter config as {:?}", target);
        Ok(target)
    }

    /// Write the whole config as 4-space indented JSON.
    pub fn save(&self, config: &FilterConfig) -> Result<(), PersistError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        config
            .serialize(&mut serializer)
            .map_err(|err| PersistError::Serialize {
                what: "filter config",
                message: err.to_string(),
            })?;
        let content = String::from_utf8_lossy(&buffer);
        write_atomic(&self.path, &content)
    }
}

/// The results directory: the JSON-lines catalog and the calendar feed.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn events_path(&self) -> PathBuf {
        self.dir.join(EVENTS_FILENAME)
    }

    pub fn feed_path(&self) -> PathBuf {
        self.dir.join(FEED_FILENAME)
    }

    /// Records of the previous pass, or `None` when there was none.
    ///
    /// Lines that do not parse are logged and dropped.
    pub fn load_previous(&self) -> Option<Vec<EventRecord>> {
        let path = self.events_path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                engine_warn!("Failed to read previous events from {:?}: {}", path, err);
                return None;
            }
        };

        let records: Vec<EventRecord> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(err) => {
                    engine_warn!("Skipping line {} of {:?}: {}", index + 1, path, err);
                    None
                }
            })
            .collect();
        Some(records)
    }

    pub fn save_records(&self, records: &[EventRecord]) -> Result<PathBuf, PersistError> {
        let mut content = String::new();
        for record in records {
            let line = serde_json::to_string(record).map_err(|err| PersistError::Serialize {
                what: "event record",
                message: err.to_string(),
            })?;
            content.push_str(&line);
            content.push('\n');
        }
        let path = self.events_path();
        write_atomic(&path, &content)?;
        Ok(path)
    }

    pub fn save_feed(&self, ics: &str) -> Result<PathBuf, PersistError> {
        let path = self.feed_path();
        write_atomic(&path, ics)?;
        Ok(path)
    }
}
