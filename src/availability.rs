//! Bookable time slots for a selected date.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use tracing::debug;

use crate::{CalendarDate, HolidaySet, ParseError, FIRST_SLOT_HOUR, LAST_SLOT_HOUR, MAX_HOUR, TIME_SEPARATOR};

/// Start time of one appointment, formatted and parsed as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// # Errors
    /// Returns `ParseError::InvalidTime` for an hour above 23 or a minute
    /// above 59.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, ParseError> {
        NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
            .map(Self)
            .ok_or_else(|| ParseError::InvalidTime(format!("{hour:02}{TIME_SEPARATOR}{minute:02}")))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn hour(&self) -> u8 {
        self.0.hour() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }

    pub const fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{TIME_SEPARATOR}{:02}", self.hour(), self.minute())
    }
}

/// Strict `HH:MM`, two digits each.
impl FromStr for TimeSlot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let invalid = || ParseError::InvalidTime(trimmed.to_owned());

        let (hour, minute) = trimmed.split_once(TIME_SEPARATOR).ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(invalid());
        }

        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl serde::Serialize for TimeSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Whole-hour slots from `first` to `last` inclusive. Hours above 23 are
/// dropped; an inverted range is empty.
pub fn hourly_slots(first: u8, last: u8) -> Vec<TimeSlot> {
    (first..=last.min(MAX_HOUR))
        .filter_map(|hour| TimeSlot::from_hm(hour, 0).ok())
        .collect()
}

/// 08:00 through 17:00, hourly
pub fn default_slots() -> Vec<TimeSlot> {
    hourly_slots(FIRST_SLOT_HOUR, LAST_SLOT_HOUR)
}

/// Slots that can be booked on `date`.
///
/// Empty when no date is selected, when the date is a Sunday, or when it is
/// a national holiday. Otherwise `slots` comes back unchanged, in order.
/// Re-run whenever the date or the holiday set changes.
pub fn available_slots(date: Option<CalendarDate>, holidays: &HolidaySet, slots: &[TimeSlot]) -> Vec<TimeSlot> {
    let Some(date) = date else {
        return Vec::new();
    };
    if date.is_sunday() || holidays.is_national_holiday(&date) {
        debug!(%date, "No bookable slots");
        return Vec::new();
    }
    debug!(%date, count = slots.len(), "Bookable slots");
    slots.to_vec()
}

/// Whether `slot` is among the slots bookable on `date`
pub fn is_slot_available(date: CalendarDate, holidays: &HolidaySet, slots: &[TimeSlot], slot: TimeSlot) -> bool {
    !date.is_sunday() && !holidays.is_national_holiday(&date) && slots.contains(&slot)
}
