use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TIMEZONE, MAX_TIMEZONE, MIN_TIMEZONE};
use crate::lunar::{LunarDate, solar_to_lunar};
use crate::{ParseError, SolarDate, can_chi_name};

/// Settings for a [`LunarConverter`].
///
/// Every field has a default, so an empty document deserializes to the
/// Vietnamese calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Hours east of UTC where new moons are dated
    pub timezone: f64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

/// Error type for converter configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Offset is not a finite number of hours inside the range civil time zones use.
    #[error(
        "Invalid time zone offset: {0} (must be {min} to {max} hours)",
        min = MIN_TIMEZONE,
        max = MAX_TIMEZONE
    )]
    InvalidTimezone(f64),
}

/// One converted date: the solar input, its lunar date and the year names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionResult {
    pub solar_day: u8,
    pub solar_month: u8,
    pub solar_year: i32,
    pub lunar_day: u8,
    pub lunar_month: u8,
    pub lunar_year: i32,
    pub is_leap_month: bool,
    /// Can Chi name of `lunar_year`
    pub lunar_year_name: String,
    pub buddhist_year: i32,
}

impl ConversionResult {
    pub const fn lunar_date(&self) -> LunarDate {
        LunarDate {
            day: self.lunar_day,
            month: self.lunar_month,
            year: self.lunar_year,
            is_leap_month: self.is_leap_month,
        }
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} (âm lịch {}/{}{} năm {}, Phật lịch {})",
            self.solar_day,
            self.solar_month,
            self.solar_year,
            self.lunar_day,
            self.lunar_month,
            if self.is_leap_month { " nhuận" } else { "" },
            self.lunar_year_name,
            self.buddhist_year
        )
    }
}

/// Solar to lunar converter for one time zone.
///
/// Stateless apart from its configuration; share it freely across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarConverter {
    timezone: f64,
}

impl Default for LunarConverter {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl LunarConverter {
    /// # Errors
    /// Returns `ConfigError::InvalidTimezone` for a non-finite offset or one
    /// outside `MIN_TIMEZONE..=MAX_TIMEZONE`.
    pub fn new(config: ConverterConfig) -> Result<Self, ConfigError> {
        let timezone = config.timezone;
        if !timezone.is_finite() || !(MIN_TIMEZONE..=MAX_TIMEZONE).contains(&timezone) {
            return Err(ConfigError::InvalidTimezone(timezone));
        }
        Ok(Self { timezone })
    }

    pub const fn timezone(&self) -> f64 {
        self.timezone
    }

    pub fn solar_to_lunar(&self, date: SolarDate) -> LunarDate {
        solar_to_lunar(date, self.timezone)
    }

    pub fn convert(&self, date: SolarDate) -> ConversionResult {
        let lunar = self.solar_to_lunar(date);
        #[cfg(feature = "log")]
        log::debug!("{date} -> lunar {lunar}");

        ConversionResult {
            solar_day: date.day(),
            solar_month: date.month(),
            solar_year: date.year(),
            lunar_day: lunar.day,
            lunar_month: lunar.month,
            lunar_year: lunar.year,
            is_leap_month: lunar.is_leap_month,
            lunar_year_name: can_chi_name(lunar.year),
            buddhist_year: date.buddhist_year(),
        }
    }

    /// Converts `YYYY-MM-DD`, optionally followed by a space and a time of
    /// day that is ignored.
    ///
    /// # Errors
    /// Returns `ParseError` when the text is not a valid calendar date.
    pub fn convert_str(&self, input: &str) -> Result<ConversionResult, ParseError> {
        match input.parse::<SolarDate>() {
            Ok(date) => Ok(self.convert(date)),
            Err(err) => {
                #[cfg(feature = "log")]
                log::debug!("rejecting date {input:?}: {err}");
                Err(err)
            }
        }
    }
}

/// Converts a `YYYY-MM-DD` string with the Vietnamese (UTC+7) calendar.
///
/// # Errors
/// Returns `ParseError` when the text is not a valid calendar date.
pub fn convert(input: &str) -> Result<ConversionResult, ParseError> {
    LunarConverter::default().convert_str(input)
}
