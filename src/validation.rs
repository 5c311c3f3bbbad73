//! Submit gating for the booking form.
//!
//! Every field is checked on every call and every failure is reported, so a
//! form can show all of its messages at once.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::FormState;

/// One non-whitespace/non-`@` run, `@`, another run, `.`, and a final run.
pub(crate) const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_REGEX should compile - this is a bug"));

/// A form field, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Age,
    Photo,
    SelectedDate,
    SelectedTime,
}

impl Field {
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Age,
        Self::Photo,
        Self::SelectedDate,
        Self::SelectedTime,
    ];

    /// Field key as the form names it
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Age => "age",
            Self::Photo => "photo",
            Self::SelectedDate => "selectedDate",
            Self::SelectedTime => "selectedTime",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field is invalid. The display text is shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("First Name is required")]
    FirstNameRequired,
    #[error("Last Name is required")]
    LastNameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Age is required")]
    AgeRequired,
    #[error("Photo is required")]
    PhotoRequired,
    #[error("Select a date")]
    DateRequired,
    #[error("Select time")]
    TimeRequired,
}

impl Serialize for FieldError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Field → error mapping. A field without an entry is valid.
///
/// Serializes as `{ "email": "Invalid email format", ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationResult {
    /// No errors: the form may be submitted
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Message to render next to `field`, if any
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// Whether `email` has the shape `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Checks every field of `form`.
pub fn validate(form: &FormState) -> ValidationResult {
    let mut result = ValidationResult::default();

    if form.first_name.trim().is_empty() {
        result.insert(Field::FirstName, FieldError::FirstNameRequired);
    }
    if form.last_name.trim().is_empty() {
        result.insert(Field::LastName, FieldError::LastNameRequired);
    }

    // The email is checked as typed; only the names are trimmed.
    if form.email.is_empty() {
        result.insert(Field::Email, FieldError::EmailRequired);
    } else if !is_valid_email(&form.email) {
        result.insert(Field::Email, FieldError::InvalidEmail);
    }

    // Only an unset age is an error; no range rule applies.
    if form.age.is_none() {
        result.insert(Field::Age, FieldError::AgeRequired);
    }
    if form.photo.is_none() {
        result.insert(Field::Photo, FieldError::PhotoRequired);
    }
    if form.selected_date.is_none() {
        result.insert(Field::SelectedDate, FieldError::DateRequired);
    }
    if form.selected_time.is_none() {
        result.insert(Field::SelectedTime, FieldError::TimeRequired);
    }

    debug!(errors = result.len(), "Validated booking form");
    result
}
