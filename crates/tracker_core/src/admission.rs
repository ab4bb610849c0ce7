use chrono::{NaiveDate, TimeDelta};

use crate::dates::extract_fields;
use crate::error::{AdmissionError, FilterLookupError};
use crate::filter::{strip_conference_year, FilterConfig};
use crate::resolve::ResolvedEvent;

/// Decides which events make it into the calendar feed.
///
/// Holds a reconciled [`FilterConfig`] and the reference date for the
/// upcoming window.
#[derive(Debug, Clone, Copy)]
pub struct Admission<'a> {
    filter: &'a FilterConfig,
    today: NaiveDate,
}

impl<'a> Admission<'a> {
    pub fn new(filter: &'a FilterConfig, today: NaiveDate) -> Self {
        Self { filter, today }
    }

    /// Last admitted date, inclusive.
    pub fn horizon_end(&self) -> Result<NaiveDate, AdmissionError> {
        let duration = self
            .filter
            .upcoming_duration
            .ok_or(FilterLookupError::MissingUpcomingDuration)?;
        Ok(duration
            .days()
            .and_then(TimeDelta::try_days)
            .and_then(|delta| self.today.checked_add_signed(delta))
            .unwrap_or(NaiveDate::MAX))
    }

    /// True when the event falls in `[today, horizon_end]` and its
    /// conference, track and content are all explicitly allowed.
    ///
    /// The date is the first year, month and day found anywhere in
    /// `date_text`; for a range that is the start day once the month or year
    /// written only on the end side is picked up.
    pub fn admits(
        &self,
        conference_raw: &str,
        date_text: &str,
        track: &str,
        content: &str,
    ) -> Result<bool, AdmissionError> {
        let conference = strip_conference_year(conference_raw);
        let tracks = self
            .filter
            .track_filter
            .get(&conference)
            .ok_or_else(|| FilterLookupError::UnknownConference(conference.clone()))?;
        let horizon_end = self.horizon_end()?;

        let date = extract_fields(date_text).calendar_date(date_text.trim())?;
        if date < self.today || date > horizon_end {
            return Ok(false);
        }

        let allowed = |flag: Option<&bool>| flag.copied().unwrap_or(false);
        Ok(allowed(self.filter.conference_filter.get(&conference))
            && allowed(tracks.get(track.trim()))
            && allowed(self.filter.content_filter.get(content.trim())))
    }

    pub fn admits_event(&self, event: &ResolvedEvent) -> Result<bool, AdmissionError> {
        let source = &event.source;
        self.admits(
            &source.conference,
            &source.date,
            &source.track,
            &source.content,
        )
    }
}
