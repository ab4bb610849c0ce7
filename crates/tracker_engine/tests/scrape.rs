use pretty_assertions::assert_eq;
use tracker_engine::{parse_listing, parse_schedule, schedule_url, ConferenceLink, ScheduleRow};

const LISTING: &str = r#"
<html><body>
  <div class="panel panel-default">
    <div class="panel-heading"><div class="panel-title">Upcoming Conferences</div></div>
    <div class="panel-body">
      <h3><a href="https://conf.example.org/home/icse-2026">ICSE 2026</a></h3>
      <h3><a href="/home/fse-2026">  FSE
        2026 </a> <a href="/ignored">second link</a></h3>
      <h3>No link here</h3>
    </div>
  </div>
  <div class="panel panel-default">
    <div class="panel-heading"><div class="panel-title">Past Conferences</div></div>
    <div class="panel-body">
      <h3><a href="https://conf.example.org/home/icse-2025">ICSE 2025</a></h3>
    </div>
  </div>
</body></html>
"#;

const SCHEDULE: &str = r#"
<html><body>
<table>
  <tr class="clickable-row text-success" href="/track/icse-2026/papers">
    <td>Fri 10 Apr 2026</td>
    <td><span class="hidden">ICSE 2026</span> <strong>Research
        Track</strong></td>
    <td>Paper Submission</td>
  </tr>
  <tr class="clickable-row text-success">
    <td>Mon 1 Jun 2026</td>
    <td>Workshops</td>
    <td>Notification</td>
  </tr>
  <tr class="clickable-row text-muted" href="/track/icse-2026/past">
    <td>Mon 1 Sep 2025</td>
    <td>Workshops</td>
    <td>Call opens</td>
  </tr>
  <tr class="clickable-row text-success">
    <td>Tue 2 Jun 2026</td>
    <td>Too few cells</td>
  </tr>
</table>
</body></html>
"#;

#[test]
fn listing_reads_only_the_upcoming_panel() {
    let conferences = parse_listing(LISTING, "https://conf.example.org/");
    assert_eq!(
        conferences,
        vec![
            ConferenceLink {
                name: "ICSE 2026".to_string(),
                link: "https://conf.example.org/home/icse-2026".to_string(),
            },
            ConferenceLink {
                name: "FSE 2026".to_string(),
                link: "https://conf.example.org/home/fse-2026".to_string(),
            },
        ]
    );
}

#[test]
fn listing_without_upcoming_panel_is_empty() {
    let html = r#"<div><div><div class="panel-title">Archive</div></div><h3><a href="/x">X</a></h3></div>"#;
    assert!(parse_listing(html, "https://conf.example.org/").is_empty());
}

#[test]
fn schedule_url_swaps_home_for_dates() {
    assert_eq!(
        schedule_url(
            "https://conf.example.org/home/icse-2026",
            "https://conf.example.org/"
        )
        .as_deref(),
        Some("https://conf.example.org/dates/icse-2026")
    );
}

#[test]
fn schedule_url_rejects_conferences_hosted_elsewhere() {
    assert_eq!(
        schedule_url("https://icse.example.com/home", "https://conf.example.org/"),
        None
    );
}

#[test]
fn schedule_rows_are_highlighted_rows_with_three_cells() {
    let rows = parse_schedule(SCHEDULE, "https://conf.example.org/dates/icse-2026");
    assert_eq!(
        rows,
        vec![
            ScheduleRow {
                date: "Fri 10 Apr 2026".to_string(),
                track: "Research Track".to_string(),
                content: "Paper Submission".to_string(),
                link: "https://conf.example.org/track/icse-2026/papers".to_string(),
            },
            ScheduleRow {
                date: "Mon 1 Jun 2026".to_string(),
                track: "Workshops".to_string(),
                content: "Notification".to_string(),
                link: String::new(),
            },
        ]
    );
}

#[test]
fn schedule_without_rows_is_empty() {
    assert!(parse_schedule("<html><body><p>TBA</p></body></html>", "https://conf.example.org/").is_empty());
}
