//! Parsing `from...to` strings into resolved JST ranges.

use chrono::{DateTime, Datelike, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::debug;

use super::formats::match_shapes;
use super::instant::{Direction, Endpoint, Side};
use crate::errors::{InvalidRangeError, NonexistentDate};
use crate::utils::{jst, jst_now};

/// Separates the two sides of a range.
pub const RANGE_SEPARATOR: &str = "...";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<body>.*?)\s*#\s*(?P<ordinal>\d+)$").expect("valid ordinal regex")
});

/// One side of a range as the user wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSide {
    pub endpoint: Endpoint,
    /// The `#N` suffix, picking the Nth article among several published at
    /// the same timestamp.
    pub ordinal: Option<u32>,
}

impl ParsedSide {
    fn unbounded(direction: Direction) -> Self {
        Self {
            endpoint: Endpoint::Unbounded(direction),
            ordinal: None,
        }
    }
}

/// An inclusive range of JST timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
    pub from_ordinal: Option<u32>,
    pub to_ordinal: Option<u32>,
}

impl DateRange {
    /// Whether `when` lies within the range, both ends included.
    pub fn contains(&self, when: &DateTime<FixedOffset>) -> bool {
        *when >= self.from && *when <= self.to
    }

    /// `from` comes after `to`, so nothing can be contained.
    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from.format(DISPLAY_FORMAT))?;
        if let Some(ordinal) = self.from_ordinal {
            write!(f, " #{ordinal}")?;
        }
        write!(f, "{}{}", RANGE_SEPARATOR, self.to.format(DISPLAY_FORMAT))?;
        if let Some(ordinal) = self.to_ordinal {
            write!(f, " #{ordinal}")?;
        }
        Ok(())
    }
}

/// Expand a 2- or 3-digit year to a full one relative to `current_year`.
///
/// Two digits land in this century unless that would be more than a year
/// ahead of `current_year`, in which case the previous century is used.
/// Three digits follow the same rule at millennium scale. Anything else is
/// returned unchanged.
///
/// ```ignore
/// assert_eq!(guess_year(23, 2024), 2023);
/// assert_eq!(guess_year(99, 2024), 1999);
/// ```
pub fn guess_year(year: i32, current_year: i32) -> i32 {
    if year < 100 {
        let century = current_year.div_euclid(100) * 100;
        if year <= current_year.rem_euclid(100) + 1 {
            century + year
        } else {
            century - 100 + year
        }
    } else if year < 1000 {
        let millennium = current_year.div_euclid(1000) * 1000;
        if millennium + year <= current_year + 1 {
            millennium + year
        } else {
            millennium - 1000 + year
        }
    } else {
        year
    }
}

fn collapse_whitespace(input: &str) -> String {
    WHITESPACE.replace_all(input, " ").trim().to_string()
}

/// Parses fuzzy datetime ranges such as `"2020-12"`, `"7-4...7-9"`,
/// `"...2020-12-25"` or `"2020-7-1 13:10 #2...2020-7-31 11:11 #2"`.
///
/// Everything the user leaves out is inferred relative to the `now` the
/// parser was built with, so results are reproducible for a fixed clock.
#[derive(Debug, Clone)]
pub struct DatetimeRangeParser {
    now: DateTime<FixedOffset>,
}

impl DatetimeRangeParser {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: now.with_timezone(&jst()),
        }
    }

    /// A parser anchored at the current wall-clock time.
    pub fn from_clock() -> Self {
        Self::new(jst_now())
    }

    /// Parse and resolve a whole range string.
    ///
    /// Without a `...` separator the single value is used for both sides, so
    /// `"7-9"` covers all of July 9th. With one, an empty side is open-ended.
    pub fn parse(&self, input: &str) -> Result<DateRange, InvalidRangeError> {
        let text = collapse_whitespace(input);

        let (from, to) = match text.split_once(RANGE_SEPARATOR) {
            None if text.is_empty() => {
                return Err(InvalidRangeError::new(text.as_str(), "empty range"));
            }
            None => {
                let side = self.parse_side(&text)?;
                (side, side)
            }
            Some((from, to)) => {
                let (from, to) = (from.trim(), to.trim());
                if from.is_empty() && to.is_empty() {
                    return Err(InvalidRangeError::new(
                        text.as_str(),
                        "both sides of the range are empty",
                    ));
                }
                let from = if from.is_empty() {
                    ParsedSide::unbounded(Direction::Min)
                } else {
                    self.parse_side(from)?
                };
                let to = if to.is_empty() {
                    ParsedSide::unbounded(Direction::Max)
                } else {
                    self.parse_side(to)?
                };
                (from, to)
            }
        };

        let range = self
            .resolve(&from, &to)
            .map_err(|e| InvalidRangeError::new(text.as_str(), e.to_string()))?;
        debug!(input = %text, %range, "Parsed datetime range");
        Ok(range)
    }

    /// Parse one side of a range (no separator) into its written fields.
    pub fn parse_side(&self, text: &str) -> Result<ParsedSide, InvalidRangeError> {
        let (body, ordinal) = match ORDINAL.captures(text) {
            Some(caps) => {
                let ordinal = caps["ordinal"]
                    .parse::<u32>()
                    .map_err(|e| InvalidRangeError::new(text, format!("bad ordinal: {e}")))?;
                (caps.name("body").map_or("", |m| m.as_str()), Some(ordinal))
            }
            None => (text, None),
        };
        if body.is_empty() {
            return Err(InvalidRangeError::new(text, "no datetime before the ordinal marker"));
        }

        let (shape, mut instant) = match_shapes(body)
            .ok_or_else(|| InvalidRangeError::new(text, "no datetime format matched"))?;
        instant.year = instant.year.map(|year| guess_year(year, self.now.year()));
        debug!(text, shape, ?instant, ?ordinal, "Matched datetime shape");

        Ok(ParsedSide {
            endpoint: Endpoint::Partial(instant),
            ordinal,
        })
    }

    /// Autofill both sides against each other and the parser's clock.
    pub fn resolve(&self, from: &ParsedSide, to: &ParsedSide) -> Result<DateRange, NonexistentDate> {
        Ok(DateRange {
            from: from.endpoint.resolve(Side::From, &to.endpoint, &self.now)?,
            to: to.endpoint.resolve(Side::To, &from.endpoint, &self.now)?,
            from_ordinal: from.ordinal,
            to_ordinal: to.ordinal,
        })
    }
}
