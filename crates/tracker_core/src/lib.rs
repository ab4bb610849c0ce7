//! Tracker core: pure date resolution, filter state and catalog logic.
mod admission;
mod catalog;
mod dates;
mod error;
mod filter;
mod resolve;

pub use admission::Admission;
pub use catalog::{new_events_message, EventCatalog, EventRecord, SortOrder};
pub use dates::{extract_fields, extract_with_trace, ConsumedToken, DateFields, Month, TokenKind};
pub use error::{AdmissionError, ConfigLoadError, DateError, DateField, FilterLookupError};
pub use filter::{
    strip_conference_year, Discovery, FilterConfig, FilterKeys, UpcomingDuration,
};
pub use resolve::{
    aoe_offset, aoe_today, resolve_event, resolve_interval, HarvestedEvent, ResolvedEvent,
    AOE_OFFSET_SECONDS,
};
