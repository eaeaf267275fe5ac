//! Error types for range parsing and sifting.

use thiserror::Error;

/// A datetime range string that could not be turned into a [`DateRange`].
///
/// [`DateRange`]: crate::datetime::DateRange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid datetime range {input:?}: {reason}")]
pub struct InvalidRangeError {
    /// The user-supplied text, after whitespace collapsing.
    pub input: String,
    /// What went wrong.
    pub reason: String,
}

impl InvalidRangeError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// A range endpoint that resolves to a moment the calendar does not have.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} is not a real calendar date")]
pub struct NonexistentDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

#[derive(Error, Debug)]
pub enum SiftError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unsupported article store format: {0} (expected .yml, .yaml or .json)")]
    UnsupportedStore(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, SiftError>;
