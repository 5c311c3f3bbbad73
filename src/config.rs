//! Booking configuration: the slot grid and the holiday feed country.

use serde::{Deserialize, Serialize};

use crate::{default_slots, TimeSlot, DEFAULT_HOLIDAY_COUNTRY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingConfig {
    /// Bookable start times, strictly ascending
    pub slots:           Vec<TimeSlot>,
    /// Country code passed to the holiday feed
    pub holiday_country: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            slots:           default_slots(),
            holiday_country: DEFAULT_HOLIDAY_COUNTRY.to_owned(),
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid booking config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Booking config has no time slots")]
    EmptySlots,

    #[error("Time slots must be strictly ascending: {previous} is followed by {next}")]
    UnsortedSlots { previous: TimeSlot, next: TimeSlot },
}

impl BookingConfig {
    /// Parses a JSON config; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` for malformed JSON or an invalid slot list.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `EmptySlots` or `UnsortedSlots`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.is_empty() {
            return Err(ConfigError::EmptySlots);
        }
        if let Some(pair) = self.slots.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnsortedSlots { previous: pair[0], next: pair[1] });
        }
        Ok(())
    }
}
