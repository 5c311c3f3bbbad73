//! Calendar, availability and validation engines for a training booking form.
//!
//! Every engine is a pure function over explicit inputs: a displayed
//! [`YearMonth`], a [`HolidaySet`] snapshot, the configured [`TimeSlot`]s and
//! a caller-owned [`FormState`]. [`CalendarView`] and [`FormController`] hold
//! the derived state a UI needs and recompute it when their inputs change.

pub mod availability;
pub mod calendar;
pub mod clock;
pub mod config;
mod consts;
pub mod form;
pub mod holiday;
mod prelude;
mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use availability::{available_slots, default_slots, hourly_slots, is_slot_available, TimeSlot};
pub use calendar::{
    date_notice, days_in_month, disabled_dates, holiday_for_date, is_disabled, month_grid,
    starting_weekday_offset, sundays_in_month, CalendarView, DateNotice, DayCell, MonthGrid,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BookingConfig, ConfigError};
pub use consts::*;
pub use form::{BookingSubmission, FormController, FormState, PhotoRef};
pub use holiday::{load_holidays, Holiday, HolidayKind, HolidaySet, HolidaySource, HolidaySourceError, StaticHolidays};
pub use types::{Month, Year};
pub use validation::{is_valid_email, validate, Field, FieldError, ValidationResult};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid time of day: {_0} (expected HH:MM)")]
    InvalidTime(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// A concrete calendar day in the range 0001-01-01..=9999-12-31.
///
/// Formats and parses as `YYYY-MM-DD`, the shape the holiday feed and the
/// submission payload use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its numeric components
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth` or `InvalidDay` for components
    /// that do not name a real day.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Year::new(year)?;
        Month::new(month)?;
        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .map(Self)
            .ok_or(ParseError::InvalidDay { month, day, year })
    }

    /// Wraps a chrono date, rejecting years outside `1..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` when the year is not representable.
    pub fn from_naive(date: NaiveDate) -> Result<Self, ParseError> {
        let year = u16::try_from(date.year()).map_err(|_| ParseError::InvalidYear(0))?;
        Year::new(year)?;
        Ok(Self(date))
    }

    /// Wraps a chrono date, clamping it into 0001-01-01..=9999-12-31
    pub fn saturating_from_naive(date: NaiveDate) -> Self {
        let earliest = first_of(1, u32::from(JANUARY));
        let latest = first_of(i32::from(MAX_YEAR) + 1, u32::from(JANUARY))
            .pred_opt()
            .unwrap_or(NaiveDate::MAX);
        Self(date.clamp(earliest, latest))
    }

    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(&self) -> u16 {
        self.0.year() as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn day(&self) -> u8 {
        self.0.day() as u8
    }

    /// The month this date belongs to
    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(*self)
    }

    /// Weekday index with 0 = Sunday, 6 = Saturday
    #[allow(clippy::cast_possible_truncation)]
    pub fn weekday_offset(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday_offset() == SUNDAY_OFFSET
    }

    /// The next calendar day, `None` past 9999-12-31
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(|d| Self::from_naive(d).ok())
    }

    /// The previous calendar day, `None` before 0001-01-01
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().and_then(|d| Self::from_naive(d).ok())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let year = parse_u16(parts[0])?;
        let month = parse_u8(parts[1])?;
        let day = parse_u8(parts[2])?;

        Self::from_ymd(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A displayed calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

impl YearMonth {
    /// Creates a month from raw numbers, rejecting out-of-range input
    ///
    /// # Errors
    /// Returns `InvalidYear` or `InvalidMonth`.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self { year: Year::new(year)?, month: Month::new(month)? })
    }

    /// Creates a month from already validated parts
    pub const fn from_parts(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: CalendarDate) -> Self {
        let parts = (Year::new(date.year()), Month::new(date.month()));
        // A CalendarDate always carries a valid year and month.
        debug_assert!(parts.0.is_ok() && parts.1.is_ok(), "{date} is outside 0001-01..9999-12");
        match parts {
            (Ok(year), Ok(month)) => Self { year, month },
            _ => Self::EARLIEST,
        }
    }

    const EARLIEST: Self = Self {
        year:  Year::MIN,
        month: Month::JANUARY,
    };

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    /// The 1st of the month
    pub fn first_day(&self) -> CalendarDate {
        CalendarDate(first_of(i32::from(self.year.get()), u32::from(self.month.get())))
    }

    /// The last day of the month: the 1st of the following month, stepped
    /// back by one day.
    pub fn last_day(&self) -> CalendarDate {
        let (year, month) = if self.month.is_last() {
            (i32::from(self.year.get()) + 1, u32::from(JANUARY))
        } else {
            (i32::from(self.year.get()), u32::from(self.month.get()) + 1)
        };
        let day_zero = first_of(year, month).pred_opt().unwrap_or(self.first_day().0);
        CalendarDate(day_zero)
    }

    /// The following month, rolling December into January of the next year.
    /// Returns `None` past `MAX_YEAR`.
    pub fn next(&self) -> Option<Self> {
        if self.month.is_last() {
            Some(Self { year: self.year.next()?, month: Month::JANUARY })
        } else {
            Month::new(self.month.get() + 1).ok().map(|month| Self { year: self.year, month })
        }
    }

    /// The preceding month, rolling January into December of the previous
    /// year. Returns `None` before year 1.
    pub fn previous(&self) -> Option<Self> {
        if self.month.is_first() {
            Some(Self { year: self.year.previous()?, month: Month::DECEMBER })
        } else {
            Month::new(self.month.get() - 1).ok().map(|month| Self { year: self.year, month })
        }
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year() == self.year.get() && date.month() == self.month.get()
    }

    /// Calendar header text, e.g. "January 2024"
    pub fn label(&self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        match trimmed.split_once(DATE_SEPARATOR) {
            Some((year, month)) if !month.contains(DATE_SEPARATOR) => {
                Self::new(parse_u16(year)?, parse_u8(month)?)
            }
            _ => Err(ParseError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

impl serde::Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Year and Month are range-checked, so the fallback is never taken.
fn first_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, u32::from(MIN_DAY)).unwrap_or(NaiveDate::MIN)
}

fn parse_u16(s: &str) -> Result<u16, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<u16>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

fn parse_u8(s: &str) -> Result<u8, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<u8>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}
