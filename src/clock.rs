//! Source of "today", used to pick the month a calendar opens on.

use chrono::Local;

use crate::CalendarDate;

pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::saturating_from_naive(Local::now().date_naive())
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
