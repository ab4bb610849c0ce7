use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};

/// Append-only `notification.log`. Every line is also logged at info level.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    path: PathBuf,
}

impl NotificationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Failing to append is logged and otherwise ignored.
    pub fn record(&self, message: &str) {
        engine_info!("{}", message);
        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{message}"));
        if let Err(err) = appended {
            engine_warn!("Failed to append to {:?}: {}", self.path, err);
        }
    }
}
