//! Month grid computation and the calendar view state.

use std::collections::BTreeSet;

use tracing::debug;

use crate::prelude::*;
use crate::{CalendarDate, Clock, Holiday, HolidaySet, YearMonth, DAYS_PER_WEEK};

/// Every date of `month`, 1st to last, ascending.
pub fn days_in_month(month: YearMonth) -> Vec<CalendarDate> {
    let last = month.last_day();
    let mut days = Vec::with_capacity(usize::from(last.day()));
    let mut current = Some(month.first_day());
    while let Some(day) = current.filter(|d| *d <= last) {
        days.push(day);
        current = day.succ();
    }
    days
}

pub fn sundays_in_month(month: YearMonth) -> BTreeSet<CalendarDate> {
    days_in_month(month).into_iter().filter(CalendarDate::is_sunday).collect()
}

/// Sundays of `month` plus every national holiday in the set.
///
/// Holidays are not filtered by month; out-of-month entries never match a
/// displayed day.
pub fn disabled_dates(holidays: &HolidaySet, month: YearMonth) -> BTreeSet<CalendarDate> {
    let mut disabled = sundays_in_month(month);
    disabled.extend(holidays.national_dates());
    debug!(%month, count = disabled.len(), "Recomputed disabled dates");
    disabled
}

/// Whether `date` cannot be booked, independent of the displayed month
pub fn is_disabled(holidays: &HolidaySet, date: &CalendarDate) -> bool {
    date.is_sunday() || holidays.is_national_holiday(date)
}

/// Number of blank cells before the 1st in a Sunday-first grid
pub fn starting_weekday_offset(month: YearMonth) -> u8 {
    month.first_day().weekday_offset()
}

/// Exact-date lookup of any holiday kind
pub fn holiday_for_date<'a>(holidays: &'a HolidaySet, date: &CalendarDate) -> Option<&'a Holiday> {
    holidays.find(date)
}

/// Informational banner shown under the calendar for a date.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateNotice {
    #[display(fmt = "This day is a holiday: {_0}")]
    Holiday(String),
    #[display(fmt = "This day is a Sunday. No training can be scheduled.")]
    Sunday,
}

pub fn date_notice(holidays: &HolidaySet, date: &CalendarDate) -> Option<DateNotice> {
    match holidays.find(date) {
        Some(holiday) => Some(DateNotice::Holiday(holiday.name.clone())),
        None if date.is_sunday() => Some(DateNotice::Sunday),
        None => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date:     CalendarDate,
    pub disabled: bool,
    pub selected: bool,
}

/// One month laid out for a 7-column, Sunday-first grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month:         YearMonth,
    pub leading_blank: u8,
    pub days:          Vec<DayCell>,
}

impl MonthGrid {
    /// Rows of the grid, blanks as `None`; the last row is not padded.
    pub fn weeks(&self) -> Vec<Vec<Option<DayCell>>> {
        let cells: Vec<Option<DayCell>> = std::iter::repeat_n(None, usize::from(self.leading_blank))
            .chain(self.days.iter().copied().map(Some))
            .collect();
        cells.chunks(usize::from(DAYS_PER_WEEK)).map(<[_]>::to_vec).collect()
    }
}

pub fn month_grid(holidays: &HolidaySet, month: YearMonth, selected: Option<CalendarDate>) -> MonthGrid {
    let disabled = disabled_dates(holidays, month);
    let days = days_in_month(month)
        .into_iter()
        .map(|date| DayCell {
            date,
            disabled: disabled.contains(&date),
            selected: selected == Some(date),
        })
        .collect();

    MonthGrid {
        month,
        leading_blank: starting_weekday_offset(month),
        days,
    }
}

/// Derived state of the date picker.
///
/// The form owns the selected date and passes it in through
/// [`Self::select_holiday_info`]; the view keeps a copy to recompute the
/// banner when the holidays change.
#[derive(Debug, Clone)]
pub struct CalendarView {
    displayed_month:       YearMonth,
    holidays:              HolidaySet,
    disabled_dates:        BTreeSet<CalendarDate>,
    selected_date:         Option<CalendarDate>,
    selected_date_holiday: Option<Holiday>,
}

impl CalendarView {
    pub fn new(month: YearMonth, holidays: HolidaySet) -> Self {
        let disabled_dates = disabled_dates(&holidays, month);
        Self {
            displayed_month: month,
            holidays,
            disabled_dates,
            selected_date: None,
            selected_date_holiday: None,
        }
    }

    /// Opens on the month containing the clock's current date
    pub fn current<C: Clock + ?Sized>(clock: &C, holidays: HolidaySet) -> Self {
        Self::new(clock.today().year_month(), holidays)
    }

    pub const fn displayed_month(&self) -> YearMonth {
        self.displayed_month
    }

    pub const fn disabled_dates(&self) -> &BTreeSet<CalendarDate> {
        &self.disabled_dates
    }

    pub const fn selected_date_holiday(&self) -> Option<&Holiday> {
        self.selected_date_holiday.as_ref()
    }

    pub const fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Steps back one month. Stays put at 0001-01.
    pub fn show_previous_month(&mut self) {
        if let Some(previous) = self.displayed_month.previous() {
            self.show_month(previous);
        }
    }

    /// Steps forward one month. Stays put at 9999-12.
    pub fn show_next_month(&mut self) {
        if let Some(next) = self.displayed_month.next() {
            self.show_month(next);
        }
    }

    pub fn show_month(&mut self, month: YearMonth) {
        self.displayed_month = month;
        self.refresh();
    }

    /// Installs a new holiday snapshot, discarding the old one. The banner is
    /// recomputed for the last selected date.
    pub fn set_holidays(&mut self, holidays: HolidaySet) {
        self.holidays = holidays;
        self.refresh();
        self.refresh_banner();
    }

    /// Recomputes the holiday banner for the form's selected date
    pub fn select_holiday_info(&mut self, selected: Option<CalendarDate>) {
        self.selected_date = selected;
        self.refresh_banner();
    }

    fn refresh_banner(&mut self) {
        self.selected_date_holiday = self
            .selected_date
            .and_then(|date| self.holidays.find(&date).cloned());
    }

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.disabled_dates.contains(date) || is_disabled(&self.holidays, date)
    }

    /// Handles a click on a grid day: returns the date to select, or `None`
    /// when the day is disabled.
    pub fn click(&self, date: CalendarDate) -> Option<CalendarDate> {
        if self.is_disabled(&date) {
            debug!(%date, "Ignored click on disabled date");
            None
        } else {
            Some(date)
        }
    }

    pub fn grid(&self, selected: Option<CalendarDate>) -> MonthGrid {
        month_grid(&self.holidays, self.displayed_month, selected)
    }

    /// Header text, e.g. "January 2024"
    pub fn title(&self) -> String {
        self.displayed_month.label()
    }

    fn refresh(&mut self) {
        self.disabled_dates = disabled_dates(&self.holidays, self.displayed_month);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, january_2024_holidays, month, national, observance};
    use crate::FixedClock;

    #[test]
    fn test_days_in_month_lengths() {
        struct TestCase {
            year:   u16,
            month:  u8,
            length: usize,
        }

        let cases = [
            TestCase { year: 2024, month: 1, length: 31 },
            TestCase { year: 2024, month: 2, length: 29 },
            TestCase { year: 2023, month: 2, length: 28 },
            TestCase { year: 2100, month: 2, length: 28 },
            TestCase { year: 2024, month: 4, length: 30 },
            TestCase { year: 2024, month: 12, length: 31 },
            TestCase { year: 9999, month: 12, length: 31 },
        ];

        for case in &cases {
            let ym = month(case.year, case.month);
            let days = days_in_month(ym);
            assert_eq!(days.len(), case.length, "{ym}");
            assert_eq!(days.first(), Some(&ym.first_day()));
            assert_eq!(days.last(), Some(&ym.last_day()));
            assert!(days.windows(2).all(|w| w[0].succ() == Some(w[1])), "{ym} not contiguous");
            assert!(days.iter().all(|d| ym.contains(d)));
        }
    }

    #[test]
    fn test_first_day_matches_offset_for_every_month_of_a_year() {
        for m in 1..=12 {
            let ym = month(2025, m);
            let days = days_in_month(ym);
            assert_eq!(days[0].weekday_offset(), starting_weekday_offset(ym), "{ym}");
        }
    }

    #[test]
    fn test_sundays_in_month() {
        for m in 1..=12 {
            let ym = month(2024, m);
            let sundays = sundays_in_month(ym);
            assert!(sundays.iter().all(CalendarDate::is_sunday));
            let expected = days_in_month(ym).into_iter().filter(CalendarDate::is_sunday).count();
            assert_eq!(sundays.len(), expected, "{ym}");
            assert!((4..=5).contains(&sundays.len()));
        }
    }

    #[test]
    fn test_january_2024_scenario() {
        let ym = month(2024, 1);
        assert_eq!(days_in_month(ym).len(), 31);
        assert_eq!(starting_weekday_offset(ym), 1);

        let disabled = disabled_dates(&january_2024_holidays(), ym);
        let expected: BTreeSet<_> = [
            date(2024, 1, 1),
            date(2024, 1, 7),
            date(2024, 1, 14),
            date(2024, 1, 21),
            date(2024, 1, 28),
        ]
        .into_iter()
        .collect();
        assert_eq!(disabled, expected);
    }

    #[test]
    fn test_disabled_iff_sunday_or_national_holiday() {
        let holidays = HolidaySet::new(vec![
            national("2024-05-01", "Labour Day"),
            national("2024-05-03", "Constitution Day"),
            observance("2024-05-02", "Flag Day"),
            national("2024-06-01", "Outside the month"),
        ]);
        let ym = month(2024, 5);
        let disabled = disabled_dates(&holidays, ym);

        for day in days_in_month(ym) {
            let expected = day.is_sunday() || holidays.is_national_holiday(&day);
            assert_eq!(disabled.contains(&day), expected, "{day}");
            assert_eq!(is_disabled(&holidays, &day), expected, "{day}");
        }
        assert!(!disabled.contains(&date(2024, 5, 2)));
    }

    #[test]
    fn test_sunday_first_month_has_no_leading_pad() {
        // September 2024 starts on a Sunday
        let ym = month(2024, 9);
        assert_eq!(starting_weekday_offset(ym), 0);
        let grid = month_grid(&HolidaySet::empty(), ym, None);
        assert_eq!(grid.leading_blank, 0);
        assert!(grid.weeks()[0][0].is_some());
    }

    #[test]
    fn test_month_grid_cells() {
        let ym = month(2024, 1);
        let grid = month_grid(&january_2024_holidays(), ym, Some(date(2024, 1, 15)));

        assert_eq!(grid.leading_blank, 1);
        assert_eq!(grid.days.len(), 31);
        assert!(grid.days[0].disabled);
        assert!(!grid.days[1].disabled);
        assert!(grid.days[14].selected);
        assert_eq!(grid.days.iter().filter(|c| c.selected).count(), 1);

        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], None);
        assert_eq!(weeks[0][1].map(|c| c.date), Some(date(2024, 1, 1)));
        assert!(weeks.iter().all(|w| w.len() <= 7));
    }

    #[test]
    fn test_holiday_lookup_and_notice() {
        let holidays = january_2024_holidays();
        assert_eq!(holiday_for_date(&holidays, &date(2024, 1, 1)).map(|h| h.name.as_str()), Some("New Year"));
        assert!(holiday_for_date(&holidays, &date(2024, 1, 2)).is_none());

        assert_eq!(
            date_notice(&holidays, &date(2024, 1, 1)).map(|n| n.to_string()),
            Some("This day is a holiday: New Year".to_owned())
        );
        // An observance on a Sunday still names the holiday
        assert_eq!(
            date_notice(&holidays, &date(2024, 1, 21)),
            Some(DateNotice::Holiday("Grandmother's Day".to_owned()))
        );
        assert_eq!(
            date_notice(&holidays, &date(2024, 1, 14)).map(|n| n.to_string()),
            Some("This day is a Sunday. No training can be scheduled.".to_owned())
        );
        assert_eq!(date_notice(&holidays, &date(2024, 1, 2)), None);
    }

    #[test]
    fn test_view_navigation_rolls_over_years() {
        let mut view = CalendarView::new(month(2024, 12), HolidaySet::empty());
        view.show_next_month();
        assert_eq!(view.displayed_month(), month(2025, 1));
        assert_eq!(view.title(), "January 2025");
        view.show_previous_month();
        view.show_previous_month();
        assert_eq!(view.displayed_month(), month(2024, 11));
    }

    #[test]
    fn test_view_navigation_clamps_at_limits() {
        let mut view = CalendarView::new(month(9999, 12), HolidaySet::empty());
        view.show_next_month();
        assert_eq!(view.displayed_month(), month(9999, 12));

        let mut view = CalendarView::new(month(1, 1), HolidaySet::empty());
        view.show_previous_month();
        assert_eq!(view.displayed_month(), month(1, 1));
    }

    #[test]
    fn test_view_recomputes_disabled_dates_on_navigation() {
        let mut view = CalendarView::new(month(2024, 1), january_2024_holidays());
        assert!(view.disabled_dates().contains(&date(2024, 1, 7)));

        view.show_next_month();
        assert!(!view.disabled_dates().contains(&date(2024, 1, 7)));
        assert!(view.disabled_dates().contains(&date(2024, 2, 4)));
    }

    #[test]
    fn test_view_opens_on_clock_month() {
        let view = CalendarView::current(&FixedClock(date(2024, 3, 15)), HolidaySet::empty());
        assert_eq!(view.displayed_month(), month(2024, 3));
    }

    #[test]
    fn test_view_click_rejects_disabled_dates() {
        let view = CalendarView::new(month(2024, 1), january_2024_holidays());
        assert_eq!(view.click(date(2024, 1, 1)), None);
        assert_eq!(view.click(date(2024, 1, 7)), None);
        assert_eq!(view.click(date(2024, 1, 2)), Some(date(2024, 1, 2)));
        // Observances stay selectable
        assert_eq!(view.click(date(2024, 1, 22)), Some(date(2024, 1, 22)));
    }

    #[test]
    fn test_view_holiday_banner() {
        let mut view = CalendarView::new(month(2024, 1), january_2024_holidays());
        view.select_holiday_info(Some(date(2024, 1, 1)));
        assert_eq!(view.selected_date_holiday().map(|h| h.name.as_str()), Some("New Year"));

        view.select_holiday_info(Some(date(2024, 1, 2)));
        assert!(view.selected_date_holiday().is_none());

        view.select_holiday_info(Some(date(2024, 1, 1)));
        view.set_holidays(HolidaySet::empty());
        assert!(view.selected_date_holiday().is_none());
        assert!(!view.disabled_dates().contains(&date(2024, 1, 1)));
        assert!(view.disabled_dates().contains(&date(2024, 1, 7)));

        view.select_holiday_info(None);
        view.set_holidays(january_2024_holidays());
        assert!(view.selected_date_holiday().is_none());
    }

    #[test]
    fn test_view_banner_appears_when_holidays_arrive() {
        let mut view = CalendarView::new(month(2024, 1), HolidaySet::empty());
        view.select_holiday_info(Some(date(2024, 1, 1)));
        assert!(view.selected_date_holiday().is_none());

        view.set_holidays(january_2024_holidays());
        assert_eq!(view.selected_date_holiday().map(|h| h.name.as_str()), Some("New Year"));

        view.show_next_month();
        assert_eq!(view.selected_date_holiday().map(|h| h.name.as_str()), Some("New Year"));
    }
}
