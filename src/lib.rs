//! Vietnamese lunar calendar (âm lịch) conversion.
//!
//! Turns a Gregorian date into its lunar day, month and year, tells whether
//! the month is a leap month, names the year in the Can Chi cycle and gives
//! the Buddhist era year.
//!
//! ```
//! let result = am_lich::convert("2025-05-02").unwrap();
//!
//! assert_eq!((5, 4, 2025), (result.lunar_day, result.lunar_month, result.lunar_year));
//! assert_eq!("Ất Tỵ", result.lunar_year_name);
//! assert_eq!(2569, result.buddhist_year);
//! ```

pub mod astro;
mod can_chi;
mod consts;
mod converter;
pub mod lunar;
mod prelude;
mod types;

pub use can_chi::{BRANCHES, STEMS, can_chi_name, stem_branch};
pub use consts::*;
pub use converter::{ConfigError, ConversionResult, ConverterConfig, LunarConverter, convert};
pub use lunar::LunarDate;
pub use types::{Day, Month, days_in_month, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;

/// A validated Gregorian (solar) calendar date.
///
/// Years are astronomical: 1 BC is `0`, 2 BC is `-1`, limited to
/// `MIN_YEAR..=MAX_YEAR`. Construction checks the month and the day against
/// the proleptic Gregorian calendar, so every `SolarDate` names a real day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year", "month.get()", "day.get()")]
pub struct SolarDate {
    year: i32,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {} to {})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl SolarDate {
    /// Creates a date from its components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` outside `MIN_YEAR..=MAX_YEAR`, and
    /// `ParseError::InvalidMonth` or `ParseError::InvalidDay` when the triple
    /// is not a calendar date.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year));
        }
        let month_nz = Month::new(month)?;
        let day_nz = Day::new(day, year, month)?;
        Ok(Self {
            year,
            month: month_nz,
            day: day_nz,
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Julian day number of this date
    pub fn jdn(&self) -> i64 {
        astro::jd_from_date(self.day(), self.month(), self.year)
    }

    /// Buddhist era year, a fixed offset from the solar year
    pub const fn buddhist_year(&self) -> i32 {
        self.year + BUDDHIST_ERA_OFFSET
    }
}

impl FromStr for SolarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // "2025-05-02 10:30:00": the time of day is dropped
        let date_part = trimmed
            .split_once(TIME_SEPARATOR)
            .map_or(trimmed, |(date, _)| date);

        // years before 1 BC carry a leading minus, "-0500-03-01"
        let (negative, unsigned) = date_part
            .strip_prefix(DATE_SEPARATOR)
            .map_or((false, date_part), |rest| (true, rest));

        let parts: Vec<&str> = unsigned.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {date_part}"
            )));
        };

        let year = Self::parse_year(year, negative)?;
        let month = Self::parse_u8(month)?;
        let day = Self::parse_u8(day)?;

        Self::new(year, month, day)
    }
}

impl SolarDate {
    /// Only plain ASCII digits count as a number; signs and spaces do not
    fn check_digits(s: &str) -> Result<(), ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        Ok(())
    }

    fn parse_year(s: &str, negative: bool) -> Result<i32, ParseError> {
        Self::check_digits(s)?;
        let magnitude = s
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;
        Ok(if negative { -magnitude } else { magnitude })
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        Self::check_digits(s)?;
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(i32, u8, u8)> for SolarDate {
    type Error = ParseError;

    /// `(year, month, day)`
    fn try_from(value: (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDate> for SolarDate {
    type Error = ParseError;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;
        // chrono keeps month in 1..=12 and day in 1..=31; only its years
        // reach past MIN_YEAR..=MAX_YEAR
        Self::new(date.year(), date.month() as u8, date.day() as u8)
    }
}

impl serde::Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
