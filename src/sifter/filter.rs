//! Article filters: datetime range, title substring, URL substring.

use std::borrow::Cow;
use std::fmt;

use crate::datetime::DateRange;
use crate::errors::{Result, SiftError};
use crate::models::Article;

/// Substring filter over a piece of article text.
///
/// The needle is normalized once at construction, and every haystack is
/// normalized the same way before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    text: String,
    case_insensitive: bool,
    space_insensitive: bool,
}

impl TextFilter {
    pub fn new(text: &str, case_insensitive: bool, space_insensitive: bool) -> Self {
        let mut filter = Self {
            text: String::new(),
            case_insensitive,
            space_insensitive,
        };
        filter.text = filter.normalize(text).into_owned();
        filter
    }

    /// Lowercase and/or strip all whitespace (ideographic spaces included),
    /// depending on how the filter was built.
    pub fn normalize<'a>(&self, s: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(s);
        if self.space_insensitive && out.chars().any(char::is_whitespace) {
            out = Cow::Owned(out.chars().filter(|c| !c.is_whitespace()).collect());
        }
        if self.case_insensitive {
            out = Cow::Owned(out.to_lowercase());
        }
        out
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.normalize(haystack).contains(self.text.as_str())
    }
}

impl fmt::Display for TextFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)?;
        match (self.case_insensitive, self.space_insensitive) {
            (true, true) => f.write_str(" (ignoring case and spaces)"),
            (true, false) => f.write_str(" (ignoring case)"),
            (false, true) => f.write_str(" (ignoring spaces)"),
            (false, false) => Ok(()),
        }
    }
}

/// Every filter a sift applies. Unset filters let everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub datetime: Option<DateRange>,
    pub title: Option<TextFilter>,
    pub url: Option<TextFilter>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.datetime.is_none() && self.title.is_none() && self.url.is_none()
    }

    /// Reject a datetime range whose `from` is after its `to`.
    ///
    /// Such a range would silently exclude every article.
    pub fn validate(&self) -> Result<()> {
        match &self.datetime {
            Some(range) if range.is_inverted() => Err(SiftError::InvalidFilter(format!(
                "datetime range is inverted ({range}); swap its sides"
            ))),
            _ => Ok(()),
        }
    }
}

/// Decides which articles take part in a sift.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilterSet {
    spec: FilterSpec,
}

impl ArticleFilterSet {
    pub fn new(spec: FilterSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Whether `article` must be left out.
    ///
    /// Checks run datetime, title, then URL, stopping at the first failure.
    /// An article without a datetime never passes a datetime filter.
    pub fn excludes(&self, article: &Article) -> bool {
        if let Some(range) = &self.spec.datetime {
            match &article.datetime {
                Some(when) if range.contains(when) => {}
                _ => return true,
            }
        }
        if let Some(title) = &self.spec.title {
            if !title.matches(&article.title) {
                return true;
            }
        }
        if let Some(url) = &self.spec.url {
            if !url.matches(&article.url) {
                return true;
            }
        }
        false
    }
}
