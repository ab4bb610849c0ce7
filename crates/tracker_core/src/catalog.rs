use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::extract_fields;
use crate::resolve::ResolvedEvent;

/// One line of `conference_events.jsonl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub conference: String,
    pub conference_link: String,
    pub date: String,
    pub track: String,
    pub content: String,
    pub link: String,
    /// Display-only deep link; never parsed back.
    pub gg_calendar_href: String,
}

impl EventRecord {
    pub fn from_resolved(event: &ResolvedEvent) -> Self {
        let source = &event.source;
        Self {
            conference: source.conference.clone(),
            conference_link: source.conference_link.clone(),
            date: source.date.clone(),
            track: source.track.clone(),
            content: source.content.clone(),
            link: source.link.clone(),
            gg_calendar_href: event.calendar_href(),
        }
    }

    fn sort_key(&self) -> (&str, &str, &str, &str) {
        (&self.date, &self.conference, &self.track, &self.content)
    }
}

/// How catalog records are ordered before they are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// `(date, conference, track, content)` compared as raw strings, so
    /// `"9 Jan"` sorts after `"10 Jan"`.
    #[default]
    Lexicographic,
    /// First calendar date in the date text, then the lexicographic key.
    /// Records without a usable date go last.
    Chronological,
}

/// The sorted set of records produced by one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCatalog {
    records: Vec<EventRecord>,
}

impl EventCatalog {
    pub fn new(mut records: Vec<EventRecord>, order: SortOrder) -> Self {
        match order {
            SortOrder::Lexicographic => records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key())),
            SortOrder::Chronological => records.sort_by_cached_key(|record| {
                let date = first_calendar_date(&record.date);
                (
                    date.is_none(),
                    date,
                    record.date.clone(),
                    record.conference.clone(),
                    record.track.clone(),
                    record.content.clone(),
                )
            }),
        }
        Self { records }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EventRecord> {
        self.records
    }

    /// Conferences owning a record with no structurally equal record in `previous`.
    ///
    /// Any field change counts, so a conference whose existing event was
    /// edited is reported alongside genuinely new ones.
    pub fn newly_appeared_since(&self, previous: &[EventRecord]) -> BTreeSet<String> {
        if self.records == previous {
            return BTreeSet::new();
        }
        self.records
            .iter()
            .filter(|record| !previous.contains(record))
            .map(|record| record.conference.clone())
            .collect()
    }
}

pub fn new_events_message(conferences: &BTreeSet<String>) -> Option<String> {
    if conferences.is_empty() {
        return None;
    }
    let names: Vec<&str> = conferences.iter().map(String::as_str).collect();
    Some(format!(
        "New events found in the following conferences: {}",
        names.join(", ")
    ))
}

fn first_calendar_date(text: &str) -> Option<NaiveDate> {
    extract_fields(text).calendar_date(text).ok()
}
