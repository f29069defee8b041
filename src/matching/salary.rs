// src/matching/salary.rs
//! Salary overlap check against free-text, human-authored salary fields
//! such as "$70,000 - $90,000" or "up to 120k USD".

use once_cell::sync::Lazy;
use regex::Regex;

// Digit groups with optional embedded thousands separators,
// e.g. "70,000" or "1,000,000" or "95000".
static DIGIT_GROUPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:,\d+)*").expect("digit group pattern is valid"));

/// Check whether the salary advertised in `salary_text` is compatible
/// with the user's `[min, max]` range.
///
/// A single extracted number is treated as a point figure and must fall
/// inside the range. Two or more numbers form a band from the smallest
/// to the largest, matching when the band overlaps the range. Absent or
/// unparseable salary text never matches.
pub fn check_salary_match(salary_text: &str, min: i64, max: i64) -> bool {
    let values: Vec<i64> = DIGIT_GROUPS
        .find_iter(salary_text)
        .filter_map(|m| m.as_str().replace(',', "").parse::<i64>().ok())
        .collect();

    match values.as_slice() {
        [] => false,
        [figure] => *figure >= min && *figure <= max,
        _ => {
            let job_min = values.iter().copied().min().unwrap_or(i64::MAX);
            let job_max = values.iter().copied().max().unwrap_or(i64::MIN);
            !(job_max < min || job_min > max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_overlap_matches() {
        assert!(check_salary_match("$70,000 - $90,000", 80_000, 100_000));
    }

    #[test]
    fn test_disjoint_ranges_do_not_match() {
        assert!(!check_salary_match("$70,000 - $90,000", 100_000, 120_000));
        assert!(!check_salary_match("$70,000 - $90,000", 10_000, 60_000));
    }

    #[test]
    fn test_single_figure_must_be_inside_range() {
        assert!(check_salary_match("$85,000 per year", 80_000, 100_000));
        assert!(!check_salary_match("$75,000 per year", 80_000, 100_000));
    }

    #[test]
    fn test_missing_or_unparseable_salary_never_matches() {
        assert!(!check_salary_match("", 0, 1_000_000));
        assert!(!check_salary_match("competitive", 0, 1_000_000));
        assert!(!check_salary_match("DOE", 0, 1_000_000));
    }

    #[test]
    fn test_band_uses_extremes_of_all_extracted_numbers() {
        // Three figures: the band is [60k, 110k]
        assert!(check_salary_match(
            "base 60,000 / OTE 90,000 / cap 110,000",
            100_000,
            150_000
        ));
    }

    #[test]
    fn test_thousands_separators_are_stripped() {
        assert!(check_salary_match("1,000,000", 900_000, 1_100_000));
    }

    #[test]
    fn test_separator_free_numbers_parse_too() {
        assert!(check_salary_match("70000-90000 EUR", 80_000, 100_000));
    }
}
