//! Holiday records and the session-wide holiday snapshot.
//!
//! The holiday feed is fetched once per year. Engines only ever see a
//! [`HolidaySet`], which is replaced as a whole when a new feed arrives.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{CalendarDate, Year, NATIONAL_HOLIDAY_TAG, OBSERVANCE_TAG};

/// How a holiday affects bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    /// Blocks bookings for its date
    NationalHoliday,
    /// Informational only
    Observance,
}

impl HolidayKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NationalHoliday => NATIONAL_HOLIDAY_TAG,
            Self::Observance => OBSERVANCE_TAG,
        }
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any tag other than `NATIONAL_HOLIDAY` is informational.
impl FromStr for HolidayKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == NATIONAL_HOLIDAY_TAG {
            Ok(Self::NationalHoliday)
        } else {
            Ok(Self::Observance)
        }
    }
}

impl Serialize for HolidayKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HolidayKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of the holiday feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holiday {
    pub date: CalendarDate,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HolidayKind,
}

impl Holiday {
    pub fn new(date: CalendarDate, name: impl Into<String>, kind: HolidayKind) -> Self {
        Self { date, name: name.into(), kind }
    }

    /// Whether this holiday blocks bookings on its date
    pub fn is_blocking(&self) -> bool {
        self.kind == HolidayKind::NationalHoliday
    }
}

/// Immutable snapshot of the known holidays.
///
/// Cloning shares the underlying slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    holidays: Arc<[Holiday]>,
}

impl HolidaySet {
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays: holidays.into() }
    }

    /// No known holidays: only Sundays are excluded
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the holiday feed payload, a JSON array of
    /// `{ "date": "YYYY-MM-DD", "name": ..., "type": ... }` objects.
    /// Extra fields are ignored.
    ///
    /// # Errors
    /// Returns `HolidaySourceError::Malformed` when the payload is not such
    /// an array or an entry carries an invalid date.
    pub fn from_json(payload: &str) -> Result<Self, HolidaySourceError> {
        let holidays: Vec<Holiday> = serde_json::from_str(payload)?;
        Ok(Self::new(holidays))
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holiday> {
        self.holidays.iter()
    }

    /// First holiday whose date matches exactly, of any kind
    pub fn find(&self, date: &CalendarDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.date == *date)
    }

    /// Whether any national holiday falls on `date`
    pub fn is_national_holiday(&self, date: &CalendarDate) -> bool {
        self.holidays.iter().any(|h| h.date == *date && h.is_blocking())
    }

    /// Dates of every national holiday, in feed order
    pub fn national_dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.holidays.iter().filter(|h| h.is_blocking()).map(|h| h.date)
    }
}

impl FromIterator<Holiday> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a HolidaySet {
    type Item = &'a Holiday;
    type IntoIter = std::slice::Iter<'a, Holiday>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Error type for holiday feed retrieval.
#[derive(Debug, thiserror::Error)]
pub enum HolidaySourceError {
    /// The feed could not be reached or refused the request.
    #[error("Holiday feed unavailable: {0}")]
    Unavailable(String),

    /// The feed answered with something that is not a holiday list.
    #[error("Malformed holiday feed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Supplies the holidays of a requested year.
pub trait HolidaySource {
    /// # Errors
    /// Implementations report transport or decoding failures; callers go
    /// through [`load_holidays`], which never fails.
    fn holidays_for_year(&self, year: Year) -> Result<Vec<Holiday>, HolidaySourceError>;
}

/// Fixed in-memory holiday list, filtered by year on request.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidays {
    holidays: Vec<Holiday>,
}

impl StaticHolidays {
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }
}

impl HolidaySource for StaticHolidays {
    fn holidays_for_year(&self, year: Year) -> Result<Vec<Holiday>, HolidaySourceError> {
        Ok(self
            .holidays
            .iter()
            .filter(|h| h.date.year() == year.get())
            .cloned()
            .collect())
    }
}

/// Loads a year's holidays into a fresh snapshot.
///
/// A failing source yields an empty set.
pub fn load_holidays<S: HolidaySource + ?Sized>(source: &S, year: Year) -> HolidaySet {
    match source.holidays_for_year(year) {
        Ok(holidays) => {
            debug!(year = year.get(), count = holidays.len(), "Loaded holidays");
            HolidaySet::new(holidays)
        }
        Err(err) => {
            warn!(year = year.get(), error = %err, "Holiday load failed, continuing without holidays");
            HolidaySet::empty()
        }
    }
}
