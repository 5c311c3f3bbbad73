//! Form state, the controller that mutates it, and the submission payload.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::availability::{available_slots, is_slot_available};
use crate::calendar::is_disabled;
use crate::validation::validate;
use crate::{BookingConfig, CalendarDate, HolidaySet, TimeSlot, ValidationResult, DEFAULT_AGE, MAX_AGE, MIN_AGE};

/// Reference to a chosen photo file. The blob itself stays with the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub file_name:    String,
    pub content_type: Option<String>,
    pub size_bytes:   u64,
}

impl PhotoRef {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, size_bytes: u64) -> Self {
        Self { file_name: file_name.into(), content_type, size_bytes }
    }
}

/// Everything the user has entered so far.
///
/// `Default` is a completely blank form; [`FormState::initial`] is what a
/// freshly opened form shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name:    String,
    pub last_name:     String,
    pub email:         String,
    pub age:           Option<u8>,
    pub photo:         Option<PhotoRef>,
    pub selected_date: Option<CalendarDate>,
    pub selected_time: Option<TimeSlot>,
}

impl FormState {
    /// Blank form with the age slider at its starting position
    pub fn initial() -> Self {
        Self { age: Some(DEFAULT_AGE), ..Self::default() }
    }

    /// Sets the date and drops any time chosen for the previous one
    pub fn set_selected_date(&mut self, date: CalendarDate) {
        self.selected_date = Some(date);
        self.selected_time = None;
    }

    pub fn clear_selected_date(&mut self) {
        self.selected_date = None;
        self.selected_time = None;
    }
}

/// Validated form contents, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub first_name:    String,
    pub last_name:     String,
    pub email:         String,
    pub age:           u8,
    pub photo:         PhotoRef,
    pub selected_date: CalendarDate,
    pub selected_time: TimeSlot,
}

impl TryFrom<&FormState> for BookingSubmission {
    type Error = ValidationResult;

    fn try_from(form: &FormState) -> Result<Self, Self::Error> {
        let result = validate(form);
        if !result.is_valid() {
            return Err(result);
        }
        match (form.age, &form.photo, form.selected_date, form.selected_time) {
            (Some(age), Some(photo), Some(selected_date), Some(selected_time)) => Ok(Self {
                first_name: form.first_name.trim().to_owned(),
                last_name: form.last_name.trim().to_owned(),
                email: form.email.clone(),
                age,
                photo: photo.clone(),
                selected_date,
                selected_time,
            }),
            _ => Err(result),
        }
    }
}

/// Owns the form and the holiday snapshot, and keeps the form consistent
/// with what the engines allow.
#[derive(Debug, Clone)]
pub struct FormController {
    form:     FormState,
    holidays: HolidaySet,
    slots:    Vec<TimeSlot>,
}

impl FormController {
    pub fn new(config: &BookingConfig, holidays: HolidaySet) -> Self {
        Self::with_form(FormState::initial(), config, holidays)
    }

    pub fn with_form(form: FormState, config: &BookingConfig, holidays: HolidaySet) -> Self {
        Self { form, holidays, slots: config.slots.clone() }
    }

    pub const fn form(&self) -> &FormState {
        &self.form
    }

    pub const fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.form.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.form.last_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.form.email = value.into();
    }

    /// Takes a raw slider value, clamped to the slider bounds
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_age(&mut self, raw: i32) {
        let clamped = raw.clamp(i32::from(MIN_AGE), i32::from(MAX_AGE));
        self.form.age = Some(clamped as u8);
    }

    pub fn set_photo(&mut self, photo: Option<PhotoRef>) {
        self.form.photo = photo;
    }

    /// Selects `date` unless it is disabled. Any previously chosen time is
    /// cleared. Returns whether the selection was taken.
    pub fn select_date(&mut self, date: CalendarDate) -> bool {
        if is_disabled(&self.holidays, &date) {
            debug!(%date, "Rejected disabled date");
            return false;
        }
        self.form.set_selected_date(date);
        true
    }

    /// Selects `slot` if it is bookable on the selected date
    pub fn select_time(&mut self, slot: TimeSlot) -> bool {
        let Some(date) = self.form.selected_date else {
            return false;
        };
        if !is_slot_available(date, &self.holidays, &self.slots, slot) {
            debug!(%date, %slot, "Rejected unavailable slot");
            return false;
        }
        self.form.selected_time = Some(slot);
        true
    }

    /// Installs a new holiday snapshot. A selected time that is no longer
    /// bookable is cleared.
    pub fn set_holidays(&mut self, holidays: HolidaySet) {
        self.holidays = holidays;
        if let (Some(date), Some(slot)) = (self.form.selected_date, self.form.selected_time) {
            if !is_slot_available(date, &self.holidays, &self.slots, slot) {
                debug!(%date, %slot, "Cleared time invalidated by holiday update");
                self.form.selected_time = None;
            }
        }
    }

    /// Slots for the selected date; empty hides the time picker
    pub fn available_slots(&self) -> Vec<TimeSlot> {
        available_slots(self.form.selected_date, &self.holidays, &self.slots)
    }

    pub fn errors(&self) -> ValidationResult {
        validate(&self.form)
    }

    pub fn can_submit(&self) -> bool {
        self.errors().is_valid()
    }

    /// # Errors
    /// Returns the full validation result when any field is invalid.
    pub fn prepare_submission(&self) -> Result<BookingSubmission, ValidationResult> {
        let submission = BookingSubmission::try_from(&self.form)?;
        info!(
            date = %submission.selected_date,
            time = %submission.selected_time,
            "Booking ready for submission"
        );
        Ok(submission)
    }

    /// Back to a freshly opened form; the holiday snapshot is kept
    pub fn reset(&mut self) {
        self.form = FormState::initial();
    }
}
