//! Shared constructors for unit tests.

use crate::{CalendarDate, Holiday, HolidayKind, HolidaySet, TimeSlot, YearMonth};

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day).expect("test date should be valid")
}

pub fn month(year: u16, month: u8) -> YearMonth {
    YearMonth::new(year, month).expect("test month should be valid")
}

pub fn slot(hour: u8) -> TimeSlot {
    TimeSlot::from_hm(hour, 0).expect("test slot should be valid")
}

pub fn national(date_str: &str, name: &str) -> Holiday {
    Holiday::new(date_str.parse().expect("test holiday date should parse"), name, HolidayKind::NationalHoliday)
}

pub fn observance(date_str: &str, name: &str) -> Holiday {
    Holiday::new(date_str.parse().expect("test holiday date should parse"), name, HolidayKind::Observance)
}

/// New Year's Day 2024 as a national holiday plus one observance
pub fn january_2024_holidays() -> HolidaySet {
    HolidaySet::new(vec![
        national("2024-01-01", "New Year"),
        observance("2024-01-21", "Grandmother's Day"),
    ])
}
