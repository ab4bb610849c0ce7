use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

use engine_logging::engine_debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::EventRecord;
use crate::resolve::HarvestedEvent;

static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b-?[0-9]{4}\b").expect("valid year token regex"));

/// Conference name with every standalone year token removed, e.g. `ICSE 2026` -> `ICSE`.
pub fn strip_conference_year(name: &str) -> String {
    YEAR_TOKEN.replace_all(name, "").trim().to_string()
}

/// Rolling admission horizon, counted as `day + month * 30 + year * 365` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingDuration {
    pub year: i64,
    pub month: i64,
    pub day: i64,
}

impl Default for UpcomingDuration {
    fn default() -> Self {
        Self {
            year: 1,
            month: 0,
            day: 0,
        }
    }
}

impl UpcomingDuration {
    /// `None` when the total does not fit in an `i64`.
    pub fn days(&self) -> Option<i64> {
        self.month
            .checked_mul(30)
            .and_then(|days| days.checked_add(self.year.checked_mul(365)?))
            .and_then(|days| days.checked_add(self.day))
    }
}

/// Allow-lists for conferences, tracks and content, as persisted in `filter_config.json`.
///
/// Maps are ordered by key so the persisted file stays alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upcoming_duration: Option<UpcomingDuration>,
    #[serde(default)]
    pub conference_filter: BTreeMap<String, bool>,
    #[serde(default)]
    pub track_filter: BTreeMap<String, BTreeMap<String, bool>>,
    #[serde(default)]
    pub content_filter: BTreeMap<String, bool>,
}

/// The fields of an event that the filter is keyed on.
pub trait FilterKeys {
    fn conference(&self) -> &str;
    fn track(&self) -> &str;
    fn content(&self) -> &str;
}

impl FilterKeys for HarvestedEvent {
    fn conference(&self) -> &str {
        &self.conference
    }

    fn track(&self) -> &str {
        &self.track
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl FilterKeys for EventRecord {
    fn conference(&self) -> &str {
        &self.conference
    }

    fn track(&self) -> &str {
        &self.track
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// A key seen for the first time and inserted as not allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Conference(String),
    Track { conference: String, track: String },
    Content(String),
}

impl fmt::Display for Discovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discovery::Conference(name) => {
                write!(f, "New conference updated in the filter: {name}")
            }
            Discovery::Track { conference, track } => {
                write!(f, "New track updated in the filter: {conference} - {track}")
            }
            Discovery::Content(content) => {
                write!(f, "New content updated in the filter: {content}")
            }
        }
    }
}

impl FilterConfig {
    /// Record every conference, track and content seen in `events`.
    ///
    /// Unknown keys are inserted as `false` and returned in insertion order.
    /// Tracks are attributed to a known conference when the event's raw
    /// conference name starts with it, so `ICSE 2026` and `ICSE-2027` share
    /// the `ICSE` track map. Running this twice on the same events discovers
    /// nothing the second time.
    pub fn reconcile<E: FilterKeys>(&mut self, events: &[E]) -> Vec<Discovery> {
        let mut discoveries = Vec::new();
        self.upcoming_duration
            .get_or_insert_with(UpcomingDuration::default);

        let seen: BTreeSet<String> = events
            .iter()
            .map(|event| strip_conference_year(event.conference()))
            .collect();
        for conference in seen {
            if !self.conference_filter.contains_key(&conference) {
                self.conference_filter.insert(conference.clone(), false);
                discoveries.push(Discovery::Conference(conference));
            }
        }

        for conference in self.conference_filter.keys() {
            let tracks = self.track_filter.entry(conference.clone()).or_default();
            let seen_tracks: BTreeSet<&str> = events
                .iter()
                .filter(|event| event.conference().starts_with(conference.as_str()))
                .map(|event| event.track())
                .collect();
            for track in seen_tracks {
                if !tracks.contains_key(track) {
                    tracks.insert(track.to_string(), false);
                    discoveries.push(Discovery::Track {
                        conference: conference.clone(),
                        track: track.to_string(),
                    });
                }
            }
        }

        for event in events {
            let content = event.content();
            if !self.content_filter.contains_key(content) {
                self.content_filter.insert(content.to_string(), false);
                discoveries.push(Discovery::Content(content.to_string()));
            }
        }

        engine_debug!(
            "Reconciled {} events into filter: {} new keys",
            events.len(),
            discoveries.len()
        );
        discoveries
    }
}
