use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use tracker_core::{Discovery, EventRecord, FilterConfig, HarvestedEvent, UpcomingDuration};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn record(conference: &str, track: &str, content: &str) -> EventRecord {
    EventRecord {
        conference: conference.to_string(),
        conference_link: format!("https://conf.example.org/home/{conference}"),
        date: "Mon 10 Nov 2025".to_string(),
        track: track.to_string(),
        content: content.to_string(),
        link: String::new(),
        gg_calendar_href: String::new(),
    }
}

fn sample_events() -> Vec<EventRecord> {
    vec![
        record("ICSE 2026", "Research Track", "Paper submission"),
        record("ICSE 2026", "Workshops", "Notification"),
        record("FSE 2026", "Research Papers", "Paper submission"),
    ]
}

#[test]
fn first_reconcile_discovers_everything_as_denied() {
    init_logging();
    let mut filter = FilterConfig::default();
    let discoveries = filter.reconcile(&sample_events());

    assert_eq!(
        discoveries,
        vec![
            Discovery::Conference("FSE".to_string()),
            Discovery::Conference("ICSE".to_string()),
            Discovery::Track {
                conference: "FSE".to_string(),
                track: "Research Papers".to_string(),
            },
            Discovery::Track {
                conference: "ICSE".to_string(),
                track: "Research Track".to_string(),
            },
            Discovery::Track {
                conference: "ICSE".to_string(),
                track: "Workshops".to_string(),
            },
            Discovery::Content("Paper submission".to_string()),
            Discovery::Content("Notification".to_string()),
        ]
    );
    assert_eq!(filter.upcoming_duration, Some(UpcomingDuration::default()));
    assert!(filter.conference_filter.values().all(|allowed| !allowed));
    assert!(filter
        .track_filter
        .values()
        .flat_map(|tracks| tracks.values())
        .all(|allowed| !allowed));
    assert!(filter.content_filter.values().all(|allowed| !allowed));
}

#[test]
fn reconcile_is_idempotent() {
    init_logging();
    let events = sample_events();
    let mut filter = FilterConfig::default();
    filter.reconcile(&events);
    let after_first = filter.clone();

    let discoveries = filter.reconcile(&events);
    assert!(discoveries.is_empty());
    assert_eq!(filter, after_first);
}

#[test]
fn operator_choices_survive_reconcile() {
    let mut filter = FilterConfig::default();
    filter.reconcile(&sample_events());
    filter.conference_filter.insert("ICSE".to_string(), true);
    filter
        .track_filter
        .get_mut("ICSE")
        .unwrap()
        .insert("Research Track".to_string(), true);
    filter.upcoming_duration = Some(UpcomingDuration {
        year: 0,
        month: 6,
        day: 0,
    });

    let mut events = sample_events();
    events.push(record("ICSE 2026", "Doctoral Symposium", "Paper submission"));
    let discoveries = filter.reconcile(&events);

    assert_eq!(
        discoveries,
        vec![Discovery::Track {
            conference: "ICSE".to_string(),
            track: "Doctoral Symposium".to_string(),
        }]
    );
    assert_eq!(filter.conference_filter["ICSE"], true);
    assert_eq!(filter.track_filter["ICSE"]["Research Track"], true);
    assert_eq!(filter.upcoming_duration.unwrap().days(), Some(180));
}

#[test]
fn tracks_are_attributed_by_name_prefix() {
    let mut filter = FilterConfig::default();
    filter.conference_filter.insert("ASE".to_string(), true);

    let discoveries = filter.reconcile(&[record("ASEC 2026", "Main", "Keynote")]);

    assert_eq!(
        discoveries,
        vec![
            Discovery::Conference("ASEC".to_string()),
            Discovery::Track {
                conference: "ASE".to_string(),
                track: "Main".to_string(),
            },
            Discovery::Track {
                conference: "ASEC".to_string(),
                track: "Main".to_string(),
            },
            Discovery::Content("Keynote".to_string()),
        ]
    );
}

#[test]
fn known_conference_without_events_still_gets_a_track_map() {
    let mut filter = FilterConfig::default();
    filter.conference_filter.insert("PLDI".to_string(), false);

    filter.reconcile::<EventRecord>(&[]);

    assert_eq!(filter.track_filter.get("PLDI"), Some(&BTreeMap::new()));
}

#[test]
fn discovery_messages_match_notification_log_lines() {
    assert_eq!(
        Discovery::Conference("ICSE".to_string()).to_string(),
        "New conference updated in the filter: ICSE"
    );
    assert_eq!(
        Discovery::Track {
            conference: "ICSE".to_string(),
            track: "Workshops".to_string(),
        }
        .to_string(),
        "New track updated in the filter: ICSE - Workshops"
    );
    assert_eq!(
        Discovery::Content("Notification".to_string()).to_string(),
        "New content updated in the filter: Notification"
    );
}

#[test]
fn persisted_json_keeps_field_names_and_alphabetical_keys() {
    let mut filter = FilterConfig::default();
    filter.reconcile(&sample_events());

    let json = serde_json::to_string(&filter).unwrap();
    assert!(json.starts_with(
        r#"{"upcoming_duration":{"year":1,"month":0,"day":0},"conference_filter":{"FSE":false,"ICSE":false},"track_filter":"#
    ));
    assert!(json.ends_with(r#""content_filter":{"Notification":false,"Paper submission":false}}"#));

    let restored: FilterConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, filter);
}

#[test]
fn partial_json_loads_with_empty_defaults() {
    let filter: FilterConfig =
        serde_json::from_str(r#"{"conference_filter": {"ICSE": true}}"#).unwrap();
    assert_eq!(filter.upcoming_duration, None);
    assert_eq!(filter.conference_filter["ICSE"], true);
    assert!(filter.track_filter.is_empty());
    assert!(filter.content_filter.is_empty());
}

#[test]
fn harvested_rows_are_reconciled_without_dates() {
    let mut filter = FilterConfig::default();
    let rows = vec![HarvestedEvent {
        conference: "ICSE 2026".to_string(),
        date: "TBD".to_string(),
        track: "Workshops".to_string(),
        content: "Notification".to_string(),
        ..HarvestedEvent::default()
    }];

    let discoveries = filter.reconcile(&rows);

    assert_eq!(
        discoveries,
        vec![
            Discovery::Conference("ICSE".to_string()),
            Discovery::Track {
                conference: "ICSE".to_string(),
                track: "Workshops".to_string(),
            },
            Discovery::Content("Notification".to_string()),
        ]
    );
}
