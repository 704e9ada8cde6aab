//! Lunar months and years, built on the new moons and solar terms of
//! [`crate::astro`].
//!
//! A lunar year is framed by two "month 11" new moons, the months that hold
//! the winter solstice. Twelve lunations between them make an ordinary year;
//! thirteen mean one of them is a leap month, the first that contains no
//! solar term boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SolarDate;
use crate::astro::{jd_from_date, new_moon_day, sun_longitude};
use crate::consts::{
    COMMON_LUNAR_YEAR_SPAN, DECEMBER, LATE_MONTH_11_TERM, LUNATION_EPOCH, MAX_BRACKET_STEPS,
    MAX_LEAP_SEARCH, MAX_LUNAR_DAY, MAX_MONTH, MONTH_11_EPOCH, MONTH_OFFSET_DIVISOR, NOVEMBER,
    SYNODIC_MONTH, YEAR_BOUNDARY_MONTHS,
};

/// A date in the Vietnamese lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    /// Day of the lunar month, `1..=30`
    pub day: u8,
    /// Month number, `1..=12`; a leap month repeats the number before it
    pub month: u8,
    pub year: i32,
    pub is_leap_month: bool,
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)?;
        if self.is_leap_month {
            f.write_str(" (nhuận)")?;
        }
        Ok(())
    }
}

/// Day number of the new moon that starts lunar month 11 around the end of
/// solar `year`.
///
/// The lunation nearest 31 December is tried first; when the sun has already
/// passed the winter solstice term at that new moon, the month 11 began one
/// lunation earlier.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn lunar_month_11(year: i32, timezone: f64) -> i64 {
    let off = jd_from_date(31, DECEMBER, year) - MONTH_11_EPOCH;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i64;
    let new_moon = new_moon_day(k, timezone);
    if sun_longitude(new_moon, timezone) >= LATE_MONTH_11_TERM {
        #[cfg(feature = "log")]
        log::debug!("month 11 of {year}: new moon {new_moon} is past the solstice, stepping back");
        return new_moon_day(k - 1, timezone);
    }
    new_moon
}

/// Index, counted from the month 11 starting at `a11`, of the leap month in a
/// thirteen-month lunar year.
///
/// Walks lunation by lunation until two consecutive new moons fall in the
/// same solar term. Only meaningful when the year really has a leap month.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn leap_month_offset(a11: i64, timezone: f64) -> i64 {
    let k = ((a11 as f64 - LUNATION_EPOCH) / SYNODIC_MONTH + 0.5).floor() as i64;
    let term_at = |i: i64| sun_longitude(new_moon_day(k + i, timezone), timezone);

    let mut last = 0;
    let mut i = 1;
    let mut arc = term_at(i);
    while arc != last && i < MAX_LEAP_SEARCH {
        last = arc;
        i += 1;
        arc = term_at(i);
        #[cfg(feature = "log")]
        log::trace!("leap search from {a11}: lunation +{i} in term {arc}");
    }
    i - 1
}

/// New moon starting the lunar month that contains `day_number`.
///
/// Each direction of the search is capped at `MAX_BRACKET_STEPS` lunations;
/// for years in `MIN_YEAR..=MAX_YEAR` it settles well before that.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn month_start(day_number: i64, timezone: f64) -> i64 {
    let mut k = ((day_number as f64 - LUNATION_EPOCH) / SYNODIC_MONTH).floor() as i64 + 1;
    let mut start = new_moon_day(k, timezone);
    for _ in 0..MAX_BRACKET_STEPS {
        if start <= day_number {
            break;
        }
        k -= 1;
        start = new_moon_day(k, timezone);
    }
    for _ in 0..MAX_BRACKET_STEPS {
        let next = new_moon_day(k + 1, timezone);
        if next > day_number {
            break;
        }
        k += 1;
        start = next;
    }
    start
}

/// Converts a solar date into the lunar calendar observed at `timezone`
/// (hours east of UTC).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn solar_to_lunar(date: SolarDate, timezone: f64) -> LunarDate {
    let day_number = date.jdn();
    let month_start = month_start(day_number, timezone);
    let year = date.year();

    let mut a11 = lunar_month_11(year, timezone);
    let mut b11 = a11;
    let mut lunar_year = if a11 >= month_start {
        a11 = lunar_month_11(year.saturating_sub(1), timezone);
        year
    } else {
        b11 = lunar_month_11(year.saturating_add(1), timezone);
        year.saturating_add(1)
    };

    let day = day_number - month_start + 1;
    let diff = (month_start - a11).div_euclid(MONTH_OFFSET_DIVISOR);
    let mut month = diff + i64::from(NOVEMBER);
    let mut is_leap_month = false;
    if b11 - a11 > COMMON_LUNAR_YEAR_SPAN {
        let leap_diff = leap_month_offset(a11, timezone);
        if diff >= leap_diff {
            month = diff + i64::from(NOVEMBER) - 1;
            is_leap_month = diff == leap_diff;
        }
    }
    if month > i64::from(MAX_MONTH) {
        month -= i64::from(MAX_MONTH);
    }
    // Months 11 and 12 within four months of the anchor still belong to the
    // previous lunar year. Kept exactly as the published tables compute it.
    if month >= i64::from(NOVEMBER) && diff < YEAR_BOUNDARY_MONTHS {
        lunar_year = lunar_year.saturating_sub(1);
    }

    // holds for every year a SolarDate can carry
    debug_assert!((1..=i64::from(MAX_LUNAR_DAY)).contains(&day), "lunar day {day}");
    debug_assert!((1..=i64::from(MAX_MONTH)).contains(&month), "lunar month {month}");
    LunarDate {
        day: day as u8,
        month: month as u8,
        year: lunar_year,
        is_leap_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_TIMEZONE, MAX_YEAR, MIN_YEAR};

    fn lunar(year: i32, month: u8, day: u8) -> LunarDate {
        solar_to_lunar(SolarDate::new(year, month, day).unwrap(), DEFAULT_TIMEZONE)
    }

    fn expect(day: u8, month: u8, year: i32, is_leap_month: bool) -> LunarDate {
        LunarDate {
            day,
            month,
            year,
            is_leap_month,
        }
    }

    #[test]
    fn test_month_11_anchor() {
        assert_eq!(lunar_month_11(2024, DEFAULT_TIMEZONE), 2460646); // 2024-12-01
        assert_eq!(lunar_month_11(2025, DEFAULT_TIMEZONE), 2461030); // 2025-12-20
        assert_eq!(lunar_month_11(2016, DEFAULT_TIMEZONE), 2457722); // 2016-11-29
    }

    #[test]
    fn test_leap_month_offset() {
        // Ất Tỵ has a leap month 6, the 8th lunation after month 11 of 2024
        let a11 = lunar_month_11(2024, DEFAULT_TIMEZONE);
        assert!(lunar_month_11(2025, DEFAULT_TIMEZONE) - a11 > COMMON_LUNAR_YEAR_SPAN);
        assert_eq!(leap_month_offset(a11, DEFAULT_TIMEZONE), 8);

        let a11 = lunar_month_11(2016, DEFAULT_TIMEZONE);
        assert_eq!(leap_month_offset(a11, DEFAULT_TIMEZONE), 8);
    }

    #[test]
    fn test_leap_search_stops_at_cap() {
        // twelve-month years never repeat a term, so the walk runs to the cap
        for year in [2018, 2020, 2021, 2023, 2025] {
            let a11 = lunar_month_11(year, DEFAULT_TIMEZONE);
            assert!(lunar_month_11(year + 1, DEFAULT_TIMEZONE) - a11 <= COMMON_LUNAR_YEAR_SPAN);
            assert_eq!(
                leap_month_offset(a11, DEFAULT_TIMEZONE),
                MAX_LEAP_SEARCH - 1,
                "{year}"
            );
        }
    }

    #[test]
    fn test_reference_dates() {
        let cases = [
            ((2025, 5, 2), expect(5, 4, 2025, false)),
            ((2025, 12, 15), expect(26, 10, 2025, false)),
            ((2024, 1, 1), expect(20, 11, 2023, false)),
            ((2000, 1, 1), expect(25, 11, 1999, false)),
            ((1999, 12, 31), expect(24, 11, 1999, false)),
            ((1850, 6, 15), expect(6, 5, 1850, false)),
        ];
        for ((y, m, d), expected) in cases {
            assert_eq!(lunar(y, m, d), expected, "{y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_new_year_boundaries() {
        assert_eq!(lunar(2024, 2, 9), expect(30, 12, 2023, false));
        assert_eq!(lunar(2024, 2, 10), expect(1, 1, 2024, false));
        assert_eq!(lunar(2025, 1, 28), expect(29, 12, 2024, false));
        assert_eq!(lunar(2025, 1, 29), expect(1, 1, 2025, false));
        assert_eq!(lunar(2026, 2, 16), expect(29, 12, 2025, false));
        assert_eq!(lunar(2026, 2, 17), expect(1, 1, 2026, false));
    }

    #[test]
    fn test_leap_months() {
        let cases = [
            ((2017, 7, 23), expect(1, 6, 2017, true)),
            ((2017, 8, 21), expect(30, 6, 2017, true)),
            ((2020, 5, 23), expect(1, 4, 2020, true)),
            ((2020, 6, 21), expect(1, 5, 2020, false)),
            ((2023, 3, 22), expect(1, 2, 2023, true)),
            ((2023, 4, 19), expect(29, 2, 2023, true)),
            ((2023, 4, 20), expect(1, 3, 2023, false)),
            ((2025, 7, 24), expect(30, 6, 2025, false)),
            ((2025, 7, 25), expect(1, 6, 2025, true)),
            ((2025, 8, 22), expect(29, 6, 2025, true)),
            // leap month 11 straddling the solar new year
            ((2033, 12, 22), expect(1, 11, 2033, true)),
            ((2034, 1, 20), expect(1, 12, 2033, false)),
        ];
        for ((y, m, d), expected) in cases {
            assert_eq!(lunar(y, m, d), expected, "{y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_month_start_brackets_the_day() {
        // a single step back from the first estimate lands a month too late here
        assert_eq!(lunar(2054, 5, 7), expect(30, 3, 2054, false));
        assert_eq!(lunar(2054, 5, 8), expect(1, 4, 2054, false));
        assert_eq!(lunar(2062, 4, 9), expect(30, 2, 2062, false));
    }

    #[test]
    fn test_extreme_years_stay_in_range() {
        for year in [MIN_YEAR, MIN_YEAR + 1, -4713, -500, 0, 9999, MAX_YEAR - 1, MAX_YEAR] {
            for (month, day) in [(1, 1), (3, 15), (6, 30), (9, 9), (12, 31)] {
                let current = lunar(year, month, day);
                assert!((1..=MAX_LUNAR_DAY).contains(&current.day), "{year}: {current:?}");
                assert!((1..=MAX_MONTH).contains(&current.month), "{year}: {current:?}");
            }
        }
    }

    #[test]
    fn test_month_start_settles_at_the_year_bounds() {
        for year in [MIN_YEAR, MAX_YEAR] {
            for month in 1..=12 {
                let day_number = SolarDate::new(year, month, 1).unwrap().jdn();
                let start = month_start(day_number, DEFAULT_TIMEZONE);
                assert!(start <= day_number, "{year}-{month}");
                assert!(day_number - start < 30, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_timezone_changes_the_new_year() {
        // Vietnam celebrated Tết Ất Sửu a month before China
        let date = SolarDate::new(1985, 1, 21).unwrap();
        assert_eq!(solar_to_lunar(date, 7.0), expect(1, 1, 1985, false));
        assert_eq!(solar_to_lunar(date, 8.0), expect(1, 12, 1984, false));
    }

    #[test]
    fn test_day_by_day_sweep() {
        let mut prev: Option<LunarDate> = None;
        for year in 1900..=2100 {
            for month in 1..=12 {
                for day in 1..=crate::days_in_month(year, month) {
                    let current = lunar(year, month, day);
                    assert!((1..=MAX_LUNAR_DAY).contains(&current.day), "{current:?}");
                    assert!((1..=12).contains(&current.month), "{current:?}");
                    if let Some(prev) = prev {
                        let next_day = current.day == prev.day + 1
                            && current.month == prev.month
                            && current.is_leap_month == prev.is_leap_month;
                        assert!(
                            next_day || current.day == 1,
                            "{year}-{month:02}-{day:02}: {prev} then {current}"
                        );
                    }
                    prev = Some(current);
                }
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(expect(5, 4, 2025, false).to_string(), "5/4/2025");
        assert_eq!(expect(1, 6, 2025, true).to_string(), "1/6/2025 (nhuận)");
    }

    #[test]
    fn test_serde() {
        let date = expect(1, 6, 2025, true);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"day":1,"month":6,"year":2025,"is_leap_month":true}"#);
        let parsed: LunarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
