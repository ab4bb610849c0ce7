use std::fmt;

/// Calendar field that date text failed to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Year => write!(f, "year"),
            DateField::Month => write!(f, "month"),
            DateField::Day => write!(f, "day"),
        }
    }
}

/// Date text that cannot be turned into the requested date or interval.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    #[error("malformed date {text:?}: no {field} found")]
    MissingField { text: String, field: DateField },
    #[error("malformed date {text:?}: fields do not name a valid instant")]
    OutOfRange { text: String },
    #[error("malformed date {text:?}: range ends before it begins")]
    InvertedRange { text: String },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FilterLookupError {
    #[error("conference {0:?} has no track filter; reconcile before admission")]
    UnknownConference(String),
    #[error("upcoming_duration is not configured; reconcile before admission")]
    MissingUpcomingDuration,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error(transparent)]
    MalformedDate(#[from] DateError),
    #[error(transparent)]
    FilterLookup(#[from] FilterLookupError),
}

/// A filter file that exists but could not be read or parsed.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("filter config {path} unreadable: {message}")]
pub struct ConfigLoadError {
    pub path: String,
    pub message: String,
}
