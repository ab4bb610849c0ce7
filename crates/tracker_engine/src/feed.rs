use chrono::{DateTime, FixedOffset, Utc};
use icalendar::{Calendar, Component, Event};
use sha2::{Digest, Sha256};
use tracker_core::ResolvedEvent;

const UID_DOMAIN: &str = "conference-tracker";

/// iCalendar text with one VEVENT per admitted event.
pub fn build_feed(events: &[ResolvedEvent]) -> String {
    let mut calendar = Calendar::new();
    for event in events {
        let mut entry = Event::new();
        entry
            .uid(&event_uid(event))
            .summary(&event.name())
            .description(&event.description())
            .add_property("DTSTART", utc_stamp(event.begin))
            .add_property("DTEND", utc_stamp(event.end));
        calendar.push(entry.done());
    }
    calendar.to_string()
}

fn utc_stamp(instant: DateTime<FixedOffset>) -> String {
    instant
        .with_timezone(&Utc)
        .format("%Y%m%dT%H%M%SZ")
        .to_string()
}

/// Stable across passes so calendar clients update events instead of duplicating them.
fn event_uid(event: &ResolvedEvent) -> String {
    let source = &event.source;
    let mut hasher = Sha256::new();
    for part in [
        &source.conference,
        &source.track,
        &source.content,
        &source.date,
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    let hex: String = hasher
        .finalize()
        .iter()
        .take(16)
        .map(|byte| format!("{byte:02x}"))
        .collect();
    format!("{hex}@{UID_DOMAIN}")
}
