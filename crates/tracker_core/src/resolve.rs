use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, TimeZone, Utc};
use url::form_urlencoded;

use crate::dates::{extract_fields, DateFields};
use crate::error::DateError;

/// Seconds west of UTC for the "anywhere on earth" zone.
pub const AOE_OFFSET_SECONDS: i32 = 12 * 3600;

const GOOGLE_CALENDAR_EDIT: &str = "https://calendar.google.com/calendar/u/0/r/eventedit";
const CALENDAR_STAMP: &str = "%Y%m%dT%H%M%SZ";

static AOE: LazyLock<FixedOffset> =
    LazyLock::new(|| FixedOffset::west_opt(AOE_OFFSET_SECONDS).expect("valid AOE offset"));

pub fn aoe_offset() -> FixedOffset {
    *AOE
}

/// The current calendar date in the AOE zone.
pub fn aoe_today() -> NaiveDate {
    Utc::now().with_timezone(&aoe_offset()).date_naive()
}

/// One schedule row as harvested, before any date interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestedEvent {
    pub conference: String,
    pub conference_link: String,
    pub date: String,
    pub track: String,
    pub content: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvent {
    pub source: HarvestedEvent,
    pub begin: DateTime<FixedOffset>,
    /// One minute past the nominal last minute, so `end > begin` always holds.
    pub end: DateTime<FixedOffset>,
}

impl ResolvedEvent {
    pub fn name(&self) -> String {
        format!(
            "{} - {} - {}",
            self.source.conference, self.source.track, self.source.content
        )
    }

    pub fn description(&self) -> String {
        format!(
            "Conference: {}\nConference Link: {}\nDate: {}\nTrack: {}\nEvent Link: {}",
            self.source.conference,
            self.source.conference_link,
            self.source.date,
            self.source.track,
            self.source.link
        )
    }

    /// Google Calendar "create event" link prefilled with this event.
    pub fn calendar_href(&self) -> String {
        let dates = format!(
            "{}/{}",
            self.begin.with_timezone(&Utc).format(CALENDAR_STAMP),
            self.end.with_timezone(&Utc).format(CALENDAR_STAMP)
        );
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("text", &self.name())
            .append_pair("dates", &dates)
            .append_pair("details", &self.description())
            .append_pair("location", "")
            .append_pair("sprop", "")
            .append_pair("sprop", "name:")
            .finish();
        format!("{GOOGLE_CALENDAR_EDIT}?{query}")
    }
}

pub fn resolve_event(source: HarvestedEvent) -> Result<ResolvedEvent, DateError> {
    let (begin, end) = resolve_interval(&source.date)?;
    Ok(ResolvedEvent { source, begin, end })
}

/// Normalize event date text into an AOE `(begin, end)` pair.
///
/// Text without `-` is a single whole day and needs year, month and day; the
/// time of day is ignored. Otherwise the text is split on the first `-` and
/// each endpoint borrows missing year, month or day from the other. A missing
/// time defaults to 00:00 at the start and 23:59 at the end.
pub fn resolve_interval(
    text: &str,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), DateError> {
    let trimmed = text.trim();
    match trimmed.split_once('-') {
        None => {
            let date = extract_fields(trimmed).calendar_date(trimmed)?;
            let begin = at(trimmed, date, 0, 0)?;
            let end = at(trimmed, date, 23, 59)? + TimeDelta::minutes(1);
            Ok((begin, end))
        }
        Some((start, end)) => {
            let mut start = extract_fields(start);
            let mut end = extract_fields(end);
            inherit_missing(&mut start, &mut end);

            let begin = at(
                trimmed,
                start.calendar_date(trimmed)?,
                start.hour.unwrap_or(0),
                start.minute.unwrap_or(0),
            )?;
            let end = at(
                trimmed,
                end.calendar_date(trimmed)?,
                end.hour.unwrap_or(23),
                end.minute.unwrap_or(59),
            )? + TimeDelta::minutes(1);

            if end <= begin {
                return Err(DateError::InvertedRange {
                    text: trimmed.to_string(),
                });
            }
            Ok((begin, end))
        }
    }
}

fn inherit_missing(start: &mut DateFields, end: &mut DateFields) {
    fn fill<T: Copy>(start: &mut Option<T>, end: &mut Option<T>) {
        if start.is_none() {
            *start = *end;
        }
        if end.is_none() {
            *end = *start;
        }
    }
    fill(&mut start.year, &mut end.year);
    fill(&mut start.month, &mut end.month);
    fill(&mut start.day, &mut end.day);
}

fn at(
    text: &str,
    date: NaiveDate,
    hour: u32,
    minute: u32,
) -> Result<DateTime<FixedOffset>, DateError> {
    date.and_hms_opt(hour, minute, 0)
        .and_then(|naive| aoe_offset().from_local_datetime(&naive).single())
        .ok_or_else(|| DateError::OutOfRange {
            text: text.to_string(),
        })
}
