//! The ordered list of partial datetime shapes a range side may be written in.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::instant::PartialInstant;

/// Accepted shapes, most information-bearing first. The first one that
/// matches wins, so `"7-4"` is month-day rather than year-month and `"9"`
/// is a day rather than a year.
const SHAPES: [&str; 16] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H",
    "%Y-%m-%d",
    "%m-%d %H:%M:%S",
    "%m-%d %H:%M",
    "%m-%d %H",
    "%m-%d",
    "%Y-%m",
    "%d %H:%M:%S",
    "%d %H:%M",
    "%d %H",
    "%H:%M:%S",
    "%H:%M",
    "%d",
    "%Y",
];

static FORMATS: Lazy<Vec<Format>> = Lazy::new(|| SHAPES.into_iter().map(Format::compile).collect());

/// One shape compiled to an anchored regex with a named group per field.
struct Format {
    shape: &'static str,
    regex: Regex,
}

impl Format {
    fn compile(shape: &'static str) -> Self {
        let mut pattern = String::from("^");
        let mut chars = shape.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                pattern.push_str(&regex::escape(&c.to_string()));
                continue;
            }
            let group = match chars.next() {
                Some('Y') => r"(?P<year>\d{1,4})",
                Some('m') => r"(?P<month>\d{1,2})",
                Some('d') => r"(?P<day>\d{1,2})",
                Some('H') => r"(?P<hour>\d{1,2})",
                Some('M') => r"(?P<minute>\d{1,2})",
                Some('S') => r"(?P<second>\d{1,2})",
                other => panic!("unsupported directive %{other:?} in datetime shape {shape:?}"),
            };
            pattern.push_str(group);
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).expect("datetime shapes compile to valid regexes");
        Self { shape, regex }
    }

    /// Fields written in `text` if it has this shape and every value is in
    /// calendar range. Years are left as written.
    fn parse(&self, text: &str) -> Option<PartialInstant> {
        let caps = self.regex.captures(text)?;
        let field = |name: &str| -> Option<Option<u32>> {
            match caps.name(name) {
                Some(m) => m.as_str().parse::<u32>().ok().map(Some),
                None => Some(None),
            }
        };

        let instant = PartialInstant {
            year: field("year")?.map(|y| y as i32),
            month: field("month")?,
            day: field("day")?,
            hour: field("hour")?,
            minute: field("minute")?,
            second: field("second")?,
        };

        let in_range =
            |value: Option<u32>, min: u32, max: u32| value.is_none_or(|v| (min..=max).contains(&v));
        let valid = in_range(instant.month, 1, 12)
            && in_range(instant.day, 1, 31)
            && in_range(instant.hour, 0, 23)
            && in_range(instant.minute, 0, 59)
            && in_range(instant.second, 0, 59);
        valid.then_some(instant)
    }
}

/// Match `text` against each shape in order and return the fields of the
/// first that fits, with the shape that produced them.
pub fn match_shapes(text: &str) -> Option<(&'static str, PartialInstant)> {
    FORMATS.iter().find_map(|format| {
        let parsed = format.parse(text);
        if parsed.is_none() {
            trace!(shape = format.shape, text, "Datetime shape did not match");
        }
        parsed.map(|instant| (format.shape, instant))
    })
}
