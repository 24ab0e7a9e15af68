//! Static browse lists.

use time::UtcDateTime;

use crate::models::{ListEntry, YearsRequest};

const GENRES: [&str; 5] = ["Kiếm hiệp", "Tình Cảm", "Hành Động", "Hài", "Phiêu Lưu"];
const COUNTRIES: [(&str, &str); 5] = [
    ("viet-nam", "Việt Nam"),
    ("thai-lan", "Thái Lan"),
    ("han-quoc", "Hàn Quốc"),
    ("trung-quoc", "Trung Quốc"),
    ("my", "Mỹ"),
];
const FIRST_YEAR: i32 = 2010;
/// Requested bounds are clamped to `[EARLIEST_YEAR, current year + 1]`.
const EARLIEST_YEAR: i32 = 1900;

pub fn list_genres() -> Vec<String> {
    GENRES.iter().map(|g| g.to_string()).collect()
}

pub fn list_countries() -> Vec<ListEntry> {
    COUNTRIES.iter().map(|(slug, name)| ListEntry::new(*slug, *name)).collect()
}

/// Years from `to` down to `from`, inclusive. Empty when `from > to`.
///
/// Both bounds are clamped to a plausible release window first.
pub fn list_years(request: YearsRequest) -> Vec<ListEntry> {
    let current = current_year();
    let latest = current + 1;
    let from = request.from.unwrap_or(FIRST_YEAR).clamp(EARLIEST_YEAR, latest);
    let to = request.to.unwrap_or(current).clamp(EARLIEST_YEAR, latest);
    (from..=to).rev().map(|y| ListEntry::new(y.to_string(), y.to_string())).collect()
}

pub(crate) fn current_year() -> i32 {
    UtcDateTime::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(2020), Some(2023), vec!["2023", "2022", "2021", "2020"])]
    #[case(Some(2023), Some(2023), vec!["2023"])]
    #[case(Some(2024), Some(2023), vec![])]
    fn test_list_years(#[case] from: Option<i32>, #[case] to: Option<i32>, #[case] expected: Vec<&str>) {
        let years: Vec<String> = list_years(YearsRequest { from, to }).into_iter().map(|e| e.slug).collect();
        assert_eq!(years, expected);
    }

    #[test]
    fn test_list_years_defaults() {
        let years = list_years(YearsRequest::default());
        assert_eq!(years.first().map(|e| e.name.clone()), Some(current_year().to_string()));
        assert_eq!(years.last().map(|e| e.slug.as_str()), Some("2010"));
    }

    #[rstest]
    #[case(Some(i32::MIN), Some(1901), vec!["1901", "1900"])]
    #[case(Some(i32::MIN), Some(i32::MIN), vec!["1900"])]
    fn test_list_years_clamps_extreme_bounds(
        #[case] from: Option<i32>,
        #[case] to: Option<i32>,
        #[case] expected: Vec<&str>,
    ) {
        let years: Vec<String> = list_years(YearsRequest { from, to }).into_iter().map(|e| e.slug).collect();
        assert_eq!(years, expected);
    }

    #[test]
    fn test_list_years_caps_far_future() {
        let years = list_years(YearsRequest { from: None, to: Some(i32::MAX) });
        assert_eq!(years.first().map(|e| e.slug.clone()), Some((current_year() + 1).to_string()));
        assert_eq!(years.last().map(|e| e.slug.as_str()), Some("2010"));
    }

    #[test]
    fn test_static_lists() {
        assert_eq!(list_genres()[0], "Kiếm hiệp");
        assert_eq!(list_countries()[0], ListEntry::new("viet-nam", "Việt Nam"));
    }
}
