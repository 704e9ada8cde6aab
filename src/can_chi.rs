//! Can Chi (stem-branch) year names of the 60-year cycle.
//!
//! 1984 is Giáp Tý, stem 0 and branch 0.

/// The ten heavenly stems (Thiên Can), Giáp first.
pub const STEMS: [&str; 10] = [
    "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm", "Quý",
];

/// The twelve earthly branches (Địa Chi), Tý first.
pub const BRANCHES: [&str; 12] = [
    "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất", "Hợi",
];

/// Year 4 CE opens a cycle, like 1984.
const CYCLE_ANCHOR: i32 = 4;

/// Verified names, authoritative over the arithmetic for these years.
/// Sorted by year.
const PINNED_NAMES: [(i32, &str); 26] = [
    (2015, "Ất Mùi"),
    (2016, "Bính Thân"),
    (2017, "Đinh Dậu"),
    (2018, "Mậu Tuất"),
    (2019, "Kỷ Hợi"),
    (2020, "Canh Tý"),
    (2021, "Tân Sửu"),
    (2022, "Nhâm Dần"),
    (2023, "Quý Mão"),
    (2024, "Giáp Thìn"),
    (2025, "Ất Tỵ"),
    (2026, "Bính Ngọ"),
    (2027, "Đinh Mùi"),
    (2028, "Mậu Thân"),
    (2029, "Kỷ Dậu"),
    (2030, "Canh Tuất"),
    (2031, "Tân Hợi"),
    (2032, "Nhâm Tý"),
    (2033, "Quý Sửu"),
    (2034, "Giáp Dần"),
    (2035, "Ất Mão"),
    (2036, "Bính Thìn"),
    (2037, "Đinh Tỵ"),
    (2038, "Mậu Ngọ"),
    (2039, "Kỷ Mùi"),
    (2040, "Canh Thân"),
];

fn pinned_name(year: i32) -> Option<&'static str> {
    PINNED_NAMES
        .binary_search_by_key(&year, |&(y, _)| y)
        .ok()
        .map(|idx| PINNED_NAMES[idx].1)
}

/// Stem and branch of `year` from the cycle arithmetic alone.
///
/// Years before the anchor wrap around instead of going negative.
///
/// ```
/// use am_lich::stem_branch;
///
/// assert_eq!(("Giáp", "Tý"), stem_branch(1984));
/// assert_eq!(("Quý", "Hợi"), stem_branch(1983));
/// ```
#[allow(clippy::cast_sign_loss)]
pub fn stem_branch(year: i32) -> (&'static str, &'static str) {
    let offset = i64::from(year) - i64::from(CYCLE_ANCHOR);
    // rem_euclid keeps both indices non-negative
    let stem = offset.rem_euclid(10) as usize;
    let branch = offset.rem_euclid(12) as usize;
    (STEMS[stem], BRANCHES[branch])
}

/// Can Chi name of a lunar year, e.g. `"Ất Tỵ"` for 2025.
///
/// Years 2015 to 2040 come from a fixed table; all others are computed.
pub fn can_chi_name(year: i32) -> String {
    if let Some(name) = pinned_name(year) {
        return name.to_owned();
    }
    let (stem, branch) = stem_branch(year);
    format!("{stem} {branch}")
}
