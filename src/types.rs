use crate::consts::{DECEMBER, JANUARY, MAX_MONTH, MAX_YEAR, MONTH_NAMES};
use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// The following year, `None` past `MAX_YEAR`
    pub fn next(self) -> Option<Self> {
        Self::new(self.get().checked_add(1)?).ok()
    }

    /// The preceding year, `None` before year 1
    pub fn previous(self) -> Option<Self> {
        Self::new(self.get() - 1).ok()
    }
}

impl Year {
    pub(crate) const MIN: Self = Self(NonZeroU16::MIN);
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// English month name, e.g. "January"
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.0.get() as usize]
    }

    /// Whether this is December, the month that rolls into a new year
    pub const fn is_last(self) -> bool {
        self.0.get() == DECEMBER
    }

    /// Whether this is January, the month that rolls back into the previous year
    pub const fn is_first(self) -> bool {
        self.0.get() == JANUARY
    }
}

impl Month {
    pub(crate) const JANUARY: Self = Self(NonZeroU8::MIN);
    pub(crate) const DECEMBER: Self = match NonZeroU8::new(DECEMBER) {
        Some(v) => Self(v),
        None => unreachable!(),
    };
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2024).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_neighbours() {
        let year = Year::new(2024).unwrap();
        assert_eq!(year.next().map(Year::get), Some(2025));
        assert_eq!(year.previous().map(Year::get), Some(2023));

        assert_eq!(Year::new(1).unwrap().previous(), None);
        assert_eq!(Year::new(MAX_YEAR).unwrap().next(), None);
    }

    #[test]
    fn test_year_serde_rejects_zero() {
        let year: Year = serde_json::from_str("2024").unwrap();
        assert_eq!(year.get(), 2024);
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(Month::new(255), Err(ParseError::InvalidMonth(255))));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Month::new(1).unwrap().name(), "January");
        assert_eq!(Month::new(2).unwrap().name(), "February");
        assert_eq!(Month::new(12).unwrap().name(), "December");
    }

    #[test]
    fn test_month_edges() {
        assert!(Month::new(1).unwrap().is_first());
        assert!(!Month::new(1).unwrap().is_last());
        assert!(Month::new(12).unwrap().is_last());
        assert!(!Month::new(6).unwrap().is_first());
    }

    #[test]
    fn test_month_display_is_numeric() {
        assert_eq!(Month::new(8).unwrap().to_string(), "8");
    }
}
