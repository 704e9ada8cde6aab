//! Low-precision astronomy behind the lunar calendar.
//!
//! Everything here works on integer Julian day numbers in local civil time:
//! the `timezone` argument (hours east of UTC) shifts each instant before it
//! is truncated to a day. Vietnam uses `7.0`.

use std::f64::consts::PI;

use crate::consts::{
    DELTA_T_SWITCH, J2000_MIDNIGHT, JULIAN_CENTURY, LUNATIONS_PER_CENTURY, SOLAR_TERMS,
};

const DEG: f64 = PI / 180.0;

/// Julian day number of a proleptic Gregorian date.
///
/// Every division floors, so the formula stays correct for years before
/// -4800 as well.
///
/// ```
/// use am_lich::astro::jd_from_date;
///
/// assert_eq!(2451545, jd_from_date(1, 1, 2000));
/// ```
pub fn jd_from_date(day: u8, month: u8, year: i32) -> i64 {
    let day = i64::from(day);
    let a = (14 - i64::from(month)).div_euclid(12);
    let y = i64::from(year) + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Secular correction (days) for the difference between dynamical and
/// universal time, `t` in Julian centuries from 1900.
///
/// The two polynomials do not meet at the switch point; callers rely on the
/// jump staying where it is.
fn delta_t(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    if t < DELTA_T_SWITCH {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    }
}

/// Day number of the `k`-th new moon after the one of 1900-01-01.
///
/// `k` may be negative for earlier lunations.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn new_moon_day(k: i64, timezone: f64) -> i64 {
    let k = k as f64;
    let t = k / LUNATIONS_PER_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;

    let mut jd1 = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd1 += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * DEG).cos();

    // sun's mean anomaly, moon's mean anomaly, moon's argument of latitude
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;

    let c1 = (0.1734 - 0.000393 * t) * (m * DEG).sin() + 0.0021 * (2.0 * DEG * m).sin()
        - 0.4068 * (mpr * DEG).sin()
        + 0.0161 * (2.0 * DEG * mpr).sin()
        - 0.0004 * (3.0 * DEG * mpr).sin()
        + 0.0104 * (2.0 * DEG * f).sin()
        - 0.0051 * ((m + mpr) * DEG).sin()
        - 0.0074 * ((m - mpr) * DEG).sin()
        + 0.0004 * ((2.0 * f + m) * DEG).sin()
        - 0.0004 * ((2.0 * f - m) * DEG).sin()
        - 0.0006 * ((2.0 * f + mpr) * DEG).sin()
        + 0.0010 * ((2.0 * f - mpr) * DEG).sin()
        + 0.0005 * ((2.0 * mpr + m) * DEG).sin();

    let jd_new = jd1 + c1 - delta_t(t);
    (jd_new + 0.5 + timezone / 24.0).floor() as i64
}

/// Sun's apparent longitude at local midnight starting day `jdn`, in
/// radians within `[0, 2π)`.
#[allow(clippy::cast_precision_loss)]
pub fn sun_longitude_radians(jdn: i64, timezone: f64) -> f64 {
    let t = (jdn as f64 - J2000_MIDNIGHT - timezone / 24.0) / JULIAN_CENTURY;
    let t2 = t * t;

    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * (DEG * m).sin()
        + (0.019993 - 0.000101 * t) * (DEG * 2.0 * m).sin()
        + 0.000290 * (DEG * 3.0 * m).sin();

    let l = (l0 + dl) * DEG;
    let turn = PI * 2.0;
    l - turn * (l / turn).floor()
}

/// Solar term bucket (`0..12`, 30° each) of the sun on day `jdn`.
///
/// Bucket 9 starts at the winter solstice.
#[allow(clippy::cast_possible_truncation)]
pub fn sun_longitude(jdn: i64, timezone: f64) -> i64 {
    let bucket = (sun_longitude_radians(jdn, timezone) / PI * 6.0).floor() as i64;
    // rounding can land exactly on 2π
    bucket.rem_euclid(SOLAR_TERMS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_TIMEZONE;

    #[test]
    fn test_jd_from_date() {
        assert_eq!(jd_from_date(1, 1, 2000), 2451545);
        assert_eq!(jd_from_date(31, 12, 2024), 2460676);
        // first day of the Gregorian reform
        assert_eq!(jd_from_date(15, 10, 1582), 2299161);
        assert_eq!(jd_from_date(1, 1, -100), 1684536);
    }

    #[test]
    fn test_jd_consecutive_days() {
        assert_eq!(jd_from_date(1, 3, 2024) - jd_from_date(28, 2, 2024), 2);
        assert_eq!(jd_from_date(1, 3, 2025) - jd_from_date(28, 2, 2025), 1);
        assert_eq!(jd_from_date(1, 1, 2025) - jd_from_date(31, 12, 2024), 1);
    }

    #[test]
    fn test_new_moon_day() {
        assert_eq!(new_moon_day(0, DEFAULT_TIMEZONE), 2415021);
        assert_eq!(new_moon_day(1500, DEFAULT_TIMEZONE), 2459317);
        // 2025-01-29, Tết Ất Tỵ
        let k = 1547;
        assert_eq!(new_moon_day(k, DEFAULT_TIMEZONE), jd_from_date(29, 1, 2025));
    }

    #[test]
    fn test_new_moons_are_a_lunation_apart() {
        for k in -2000..2000 {
            let gap = new_moon_day(k + 1, DEFAULT_TIMEZONE) - new_moon_day(k, DEFAULT_TIMEZONE);
            assert!((29..=30).contains(&gap), "lunation {k} lasted {gap} days");
        }
    }

    #[test]
    fn test_delta_t_branches() {
        let t: f64 = -12.0;
        let old = 0.001 + 0.000839 * t + 0.0002261 * t * t - 0.00000845 * t.powi(3)
            - 0.000000081 * t.powi(4);
        assert!((delta_t(t) - old).abs() < 1e-12);

        let t: f64 = 1.0;
        assert!((delta_t(t) - (-0.000278 + 0.000265 + 0.000262)).abs() < 1e-12);

        // the switch is a jump of about 0.00068 days, not a blend
        let below = delta_t(DELTA_T_SWITCH - 1e-9);
        let above = delta_t(DELTA_T_SWITCH);
        assert!((below - above).abs() > 0.0006);
    }

    #[test]
    fn test_sun_longitude() {
        // 2000-01-01 lies between the winter solstice and the next term
        assert_eq!(sun_longitude(2451545, DEFAULT_TIMEZONE), 9);
        // mid-April, after the March equinox
        assert_eq!(sun_longitude(jd_from_date(15, 4, 2025), DEFAULT_TIMEZONE), 0);
        // late June, after the summer solstice
        assert_eq!(sun_longitude(jd_from_date(25, 6, 2025), DEFAULT_TIMEZONE), 3);
    }

    #[test]
    fn test_sun_longitude_range() {
        let start = jd_from_date(1, 1, 1800);
        for jdn in (start..start + 146_097).step_by(7) {
            let radians = sun_longitude_radians(jdn, DEFAULT_TIMEZONE);
            assert!((0.0..2.0 * PI).contains(&radians));
            assert!((0..12).contains(&sun_longitude(jdn, DEFAULT_TIMEZONE)));
        }
    }
}
