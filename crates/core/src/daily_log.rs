//! Daily site log rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Summary returned when there is nothing to summarise.
pub const NO_LOGS_SUMMARY: &str = "No logs to summarize.";

/// Summary returned when the assistant fails.
pub const SUMMARY_FAILED: &str = "Failed to generate AI summary.";

/// Plausible site temperature range in degrees Celsius.
pub const MIN_TEMPERATURE_C: f64 = -60.0;
pub const MAX_TEMPERATURE_C: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rain,
    Windy,
    Snow,
}

impl Weather {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::Windy => "Windy",
            Self::Snow => "Snow",
        }
    }
}

pub fn validate_entry(temperature: f64, notes: &str) -> Result<(), CoreError> {
    if !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&temperature) {
        return Err(CoreError::Validation(format!(
            "Temperature {temperature}°C is outside {MIN_TEMPERATURE_C}..{MAX_TEMPERATURE_C}"
        )));
    }
    if notes.trim().is_empty() {
        return Err(CoreError::Validation("Log notes must not be empty".into()));
    }
    Ok(())
}
