//! Range endpoints with per-field presence, and the autofill that makes them concrete.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};

use crate::errors::NonexistentDate;
use crate::utils::jst;

/// Earliest year an open-ended range reaches back to.
pub const MIN_SANE_YEAR: i32 = 1924;

/// A calendar date and time where any field may be missing.
///
/// A `Some` field was written by the user; a `None` field is inferred
/// during [`Endpoint::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialInstant {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl PartialInstant {
    /// Year, month and day were all written, so the date must exist as is.
    fn names_full_date(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }
}

/// Which end of the timeline an open range side stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Min,
    Max,
}

/// Which side of a range an endpoint is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

/// One side of a datetime range before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Partial(PartialInstant),
    /// Left empty by the user (`"...2020"` or `"2020..."`).
    Unbounded(Direction),
}

impl Endpoint {
    /// Fields the user wrote for this endpoint. Unbounded endpoints have none.
    fn explicit(&self) -> PartialInstant {
        match self {
            Endpoint::Partial(partial) => *partial,
            Endpoint::Unbounded(_) => PartialInstant::default(),
        }
    }

    /// Turn this endpoint into a concrete JST timestamp.
    ///
    /// Missing fields are filled from seconds up to year. Each one takes, in
    /// order of preference, the value the user wrote for the `other` endpoint,
    /// the current date/time once any smaller field is known, and finally the
    /// structural default for `side` (start of period for `From`, end of
    /// period for `To`).
    ///
    /// A day past the end of the resolved month is capped at its last day,
    /// unless this endpoint wrote year, month and day itself.
    pub fn resolve(
        &self,
        side: Side,
        other: &Endpoint,
        now: &DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>, NonexistentDate> {
        let partial = match self {
            Endpoint::Unbounded(direction) => return Ok(sentinel(*direction, now)),
            Endpoint::Partial(partial) => partial,
        };
        let other = other.explicit();
        let is_from = side == Side::From;
        let mut has_small = false;

        let pick = |start: u32, end: u32| if is_from { start } else { end };

        let second = fill(partial.second, other.second, now.second(), &mut has_small, pick(0, 59));
        let minute = fill(partial.minute, other.minute, now.minute(), &mut has_small, pick(0, 59));
        let hour = fill(partial.hour, other.hour, now.hour(), &mut has_small, pick(0, 23));
        // `None` stands for "last day of the month", known only once month and year are.
        let day = fill(
            partial.day.map(Some),
            other.day.map(Some),
            Some(now.day()),
            &mut has_small,
            if is_from { Some(1) } else { None },
        );
        let month = fill(partial.month, other.month, now.month(), &mut has_small, pick(1, 12));
        let year = fill(
            partial.year,
            other.year,
            now.year(),
            &mut has_small,
            if is_from { MIN_SANE_YEAR } else { now.year() },
        );

        let invalid = |day: u32| NonexistentDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        let month_len = last_day_of_month(year, month).ok_or_else(|| invalid(day.unwrap_or(1)))?;
        let day = match day {
            None => month_len,
            Some(day) if day > month_len && !partial.names_full_date() => month_len,
            Some(day) => day,
        };

        jst()
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .ok_or_else(|| invalid(day))
    }
}

fn fill<T>(own: Option<T>, other: Option<T>, now: T, has_small: &mut bool, default: T) -> T {
    if let Some(value) = own.or(other) {
        *has_small = true;
        value
    } else if *has_small {
        now
    } else {
        default
    }
}

fn sentinel(direction: Direction, now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let (year, month, day, hour, minute, second) = match direction {
        Direction::Min => (MIN_SANE_YEAR, 1, 1, 0, 0, 0),
        Direction::Max => (now.year(), 12, 31, 23, 59, 59),
    };
    jst()
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("Jan 1 and Dec 31 exist in every year")
}

/// Number of days in `month` of `year`, leap years included.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|date| date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<FixedOffset> {
        jst().with_ymd_and_hms(2024, 5, 17, 10, 20, 30).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        jst().with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 2), Some(29));
        assert_eq!(last_day_of_month(2023, 2), Some(28));
        assert_eq!(last_day_of_month(1900, 2), Some(28));
        assert_eq!(last_day_of_month(2000, 2), Some(29));
        assert_eq!(last_day_of_month(2020, 12), Some(31));
        assert_eq!(last_day_of_month(2020, 4), Some(30));
        assert_eq!(last_day_of_month(2020, 13), None);
    }

    #[test]
    fn test_sentinels() {
        let min = Endpoint::Unbounded(Direction::Min);
        let max = Endpoint::Unbounded(Direction::Max);
        assert_eq!(min.resolve(Side::From, &max, &now()).unwrap(), at(1924, 1, 1, 0, 0, 0));
        assert_eq!(max.resolve(Side::To, &min, &now()).unwrap(), at(2024, 12, 31, 23, 59, 59));
    }

    #[test]
    fn test_year_month_fills_period() {
        let partial = Endpoint::Partial(PartialInstant {
            year: Some(2024),
            month: Some(2),
            ..Default::default()
        });
        assert_eq!(partial.resolve(Side::From, &partial, &now()).unwrap(), at(2024, 2, 1, 0, 0, 0));
        assert_eq!(partial.resolve(Side::To, &partial, &now()).unwrap(), at(2024, 2, 29, 23, 59, 59));
    }

    #[test]
    fn test_partner_fields_take_priority_over_defaults() {
        let from = Endpoint::Partial(PartialInstant {
            year: Some(2020),
            month: Some(7),
            day: Some(1),
            ..Default::default()
        });
        let to = Endpoint::Partial(PartialInstant {
            day: Some(9),
            hour: Some(11),
            minute: Some(11),
            ..Default::default()
        });
        // `from` borrows the hour and minute written on `to`.
        assert_eq!(from.resolve(Side::From, &to, &now()).unwrap(), at(2020, 7, 1, 11, 11, 0));
        // `to` borrows month and year from `from`.
        assert_eq!(to.resolve(Side::To, &from, &now()).unwrap(), at(2020, 7, 9, 11, 11, 59));
    }

    #[test]
    fn test_time_only_uses_today() {
        let partial = Endpoint::Partial(PartialInstant {
            hour: Some(13),
            minute: Some(10),
            ..Default::default()
        });
        assert_eq!(partial.resolve(Side::From, &partial, &now()).unwrap(), at(2024, 5, 17, 13, 10, 0));
        assert_eq!(partial.resolve(Side::To, &partial, &now()).unwrap(), at(2024, 5, 17, 13, 10, 59));
    }

    #[test]
    fn test_sentinel_partner_exposes_no_fields() {
        let from = Endpoint::Partial(PartialInstant {
            year: Some(2020),
            month: Some(12),
            day: Some(25),
            ..Default::default()
        });
        let max = Endpoint::Unbounded(Direction::Max);
        assert_eq!(from.resolve(Side::From, &max, &now()).unwrap(), at(2020, 12, 25, 0, 0, 0));
    }

    #[test]
    fn test_nonexistent_date_is_rejected() {
        let partial = Endpoint::Partial(PartialInstant {
            year: Some(2021),
            month: Some(2),
            day: Some(30),
            ..Default::default()
        });
        let err = partial.resolve(Side::From, &partial, &now()).unwrap_err();
        assert_eq!((err.year, err.month, err.day), (2021, 2, 30));
    }

    #[test]
    fn test_clock_day_is_capped_to_a_shorter_month() {
        let jan_31 = at(2024, 1, 31, 8, 0, 0);
        let time = Endpoint::Partial(PartialInstant {
            hour: Some(13),
            minute: Some(10),
            ..Default::default()
        });
        let june = Endpoint::Partial(PartialInstant {
            year: Some(2020),
            month: Some(6),
            ..Default::default()
        });
        assert_eq!(time.resolve(Side::From, &june, &jan_31).unwrap(), at(2020, 6, 30, 13, 10, 0));
        assert_eq!(june.resolve(Side::To, &time, &jan_31).unwrap(), at(2020, 6, 30, 13, 10, 59));
    }

    #[test]
    fn test_written_day_is_capped_when_month_is_inferred() {
        let june_10 = at(2024, 6, 10, 8, 0, 0);
        let day_31 = Endpoint::Partial(PartialInstant {
            day: Some(31),
            ..Default::default()
        });
        assert_eq!(day_31.resolve(Side::To, &day_31, &june_10).unwrap(), at(2024, 6, 30, 23, 59, 59));

        let feb_30 = Endpoint::Partial(PartialInstant {
            month: Some(2),
            day: Some(30),
            ..Default::default()
        });
        assert_eq!(feb_30.resolve(Side::From, &feb_30, &june_10).unwrap(), at(2024, 2, 29, 0, 0, 0));
    }
}
