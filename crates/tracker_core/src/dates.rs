use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{DateError, DateField};

static HOUR_MINUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,2}:[0-9]{1,2}").expect("valid hour:minute regex"));
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));
static MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec").expect("valid month regex")
});
static DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,2}").expect("valid day regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan = 1,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Case-sensitive three-letter English abbreviation.
    pub fn from_abbrev(abbrev: &str) -> Option<Self> {
        let month = match abbrev {
            "Jan" => Month::Jan,
            "Feb" => Month::Feb,
            "Mar" => Month::Mar,
            "Apr" => Month::Apr,
            "May" => Month::May,
            "Jun" => Month::Jun,
            "Jul" => Month::Jul,
            "Aug" => Month::Aug,
            "Sep" => Month::Sep,
            "Oct" => Month::Oct,
            "Nov" => Month::Nov,
            "Dec" => Month::Dec,
            _ => return None,
        };
        Some(month)
    }

    pub fn number(self) -> u32 {
        self as u32
    }
}

/// Fields found in a date fragment. Absent fields stay `None`; callers pick defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFields {
    pub year: Option<i32>,
    pub month: Option<Month>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

impl DateFields {
    /// Calendar date from year, month and day; all three are required.
    ///
    /// `text` is only used to describe the failure.
    pub fn calendar_date(&self, text: &str) -> Result<NaiveDate, DateError> {
        let missing = |field| DateError::MissingField {
            text: text.to_string(),
            field,
        };
        let year = self.year.ok_or_else(|| missing(DateField::Year))?;
        let month = self.month.ok_or_else(|| missing(DateField::Month))?;
        let day = self.day.ok_or_else(|| missing(DateField::Day))?;
        NaiveDate::from_ymd_opt(year, month.number(), day).ok_or_else(|| DateError::OutOfRange {
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    HourMinute,
    Year,
    Month,
    Day,
}

/// One span of the input claimed by an extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedToken {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Extract date fields from a loosely formatted fragment.
///
/// Passes run in a fixed order: hour:minute, year, month, day. The first match
/// of each pass is the field value, and every occurrence of the matched text is
/// consumed so later passes cannot see it again.
pub fn extract_fields(fragment: &str) -> DateFields {
    extract_with_trace(fragment).0
}

/// Like [`extract_fields`], also returning the consumed spans in consumption order.
pub fn extract_with_trace(fragment: &str) -> (DateFields, Vec<ConsumedToken>) {
    let mut scanner = Scanner::new(fragment);
    let mut fields = DateFields::default();

    if let Some((hour, minute)) = scanner
        .take(TokenKind::HourMinute, &HOUR_MINUTE)
        .and_then(|token| token.split_once(':'))
    {
        fields.hour = hour.parse().ok();
        fields.minute = minute.parse().ok();
    }
    fields.year = scanner
        .take(TokenKind::Year, &YEAR)
        .and_then(|token| token.parse().ok());
    fields.month = scanner
        .take(TokenKind::Month, &MONTH)
        .and_then(Month::from_abbrev);
    fields.day = scanner
        .take(TokenKind::Day, &DAY)
        .and_then(|token| token.parse().ok());

    (fields, scanner.consumed)
}

struct Scanner<'a> {
    input: &'a str,
    consumed: Vec<ConsumedToken>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            consumed: Vec::new(),
        }
    }

    /// Unconsumed stretches of the input with their byte offsets, left to right.
    fn segments(&self) -> Vec<(usize, &'a str)> {
        let mut spans: Vec<&Range<usize>> = self.consumed.iter().map(|t| &t.span).collect();
        spans.sort_by_key(|span| span.start);

        let input = self.input;
        let mut segments = Vec::new();
        let mut cursor = 0;
        for span in spans {
            if span.start > cursor {
                segments.push((cursor, &input[cursor..span.start]));
            }
            cursor = cursor.max(span.end);
        }
        if cursor < input.len() {
            segments.push((cursor, &input[cursor..]));
        }
        segments
    }

    fn take(&mut self, kind: TokenKind, pattern: &Regex) -> Option<&'a str> {
        let segments = self.segments();
        let found = segments.iter().find_map(|(offset, segment)| {
            pattern
                .find(segment)
                .map(|m| offset + m.start()..offset + m.end())
        })?;
        let input = self.input;
        let token = &input[found];

        for (offset, segment) in segments {
            for (index, _) in segment.match_indices(token) {
                let start = offset + index;
                self.consumed.push(ConsumedToken {
                    kind,
                    span: start..start + token.len(),
                });
            }
        }
        Some(token)
    }
}
