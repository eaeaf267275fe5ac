//! Fuzzy datetime ranges for filtering articles.
//!
//! Users narrow a sift with strings like `"2020-12"`, `"7-4...7-9"` or
//! `"...2020-12-25"`. Each side of the range is matched against an ordered
//! list of partial shapes, short years are expanded relative to the current
//! year, and every field left out is autofilled from the other side, the
//! clock, or the start/end of the period.
//!
//! All timestamps are JST (+09:00), matching the news site.

mod formats;
mod instant;
mod range;

pub use range::{DateRange, DatetimeRangeParser};
