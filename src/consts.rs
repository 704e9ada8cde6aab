/// Earliest astronomical year a `SolarDate` can hold (20001 BC)
///
/// Inside `MIN_YEAR..=MAX_YEAR` the lunation series keeps increasing with
/// the lunation index, so lunar months stay bracketed and in range.
pub const MIN_YEAR: i32 = -20_000;

/// Latest astronomical year a `SolarDate` can hold
pub const MAX_YEAR: i32 = 20_000;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;
/// Longest Gregorian month
pub const MAX_DAY: u8 = 31;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for November, the lunar month holding the winter solstice
pub const NOVEMBER: u8 = 11;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Longest possible lunar month
pub const MAX_LUNAR_DAY: u8 = 30;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separates the date from a trailing time-of-day fragment, which is ignored
pub const TIME_SEPARATOR: char = ' ';

/// Buddhist era year = Gregorian year + this offset
pub const BUDDHIST_ERA_OFFSET: i32 = 544;

/// Default time zone, in hours east of UTC (Indochina Time)
pub const DEFAULT_TIMEZONE: f64 = 7.0;
/// Accepted time zone offsets, in hours
pub const MIN_TIMEZONE: f64 = -12.0;
pub const MAX_TIMEZONE: f64 = 14.0;

/// Mean synodic month, in days
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Julian day of the new moon of 1900-01-01, lunation 0
pub(crate) const LUNATION_EPOCH: f64 = 2_415_021.076_998_695;
/// Day number used to estimate the lunation nearest 31 December
pub(crate) const MONTH_11_EPOCH: i64 = 2_415_021;
/// Lunations per Julian century, scales `k` into the time parameter `T`
pub(crate) const LUNATIONS_PER_CENTURY: f64 = 1236.85;
/// Below this `T` the older delta-T polynomial applies
pub(crate) const DELTA_T_SWITCH: f64 = -11.0;

/// J2000.0 as a Julian day at 0h
pub(crate) const J2000_MIDNIGHT: f64 = 2_451_545.5;
/// Days per Julian century
pub(crate) const JULIAN_CENTURY: f64 = 36525.0;

/// Solar terms used to bucket the sun's longitude (30 degrees each)
pub const SOLAR_TERMS: i64 = 12;
/// A month-11 new moon whose bucket reaches this value starts too late
pub(crate) const LATE_MONTH_11_TERM: i64 = 9;

/// More lunations than this never fit between two month-11 anchors
pub(crate) const MAX_LEAP_SEARCH: i64 = 14;
/// Lunations the month-start search may move away from its first estimate
pub(crate) const MAX_BRACKET_STEPS: i64 = 8;
/// Span between month-11 anchors beyond which a leap month exists
pub(crate) const COMMON_LUNAR_YEAR_SPAN: i64 = 365;
/// Days used to turn an anchor distance into a month offset
pub(crate) const MONTH_OFFSET_DIVISOR: i64 = 29;
/// A month 11/12 within this many months of the anchor belongs to the
/// previous lunar year
pub(crate) const YEAR_BOUNDARY_MONTHS: i64 = 4;
