use crate::domain::model::PersonalYear;
use crate::utils::error::{ReadingError, Result};
use chrono::{Datelike, NaiveDate};

/// Computes the numerological personal year for a birth date and a reference
/// year: `day + month + reference_year` reduced digit by digit to 1..=9.
/// Deterministic and total over valid dates; a non-positive reference year is
/// rejected rather than producing an arbitrary number.
pub fn personal_year(birth_date: NaiveDate, reference_year: i32) -> Result<PersonalYear> {
    if reference_year <= 0 {
        return Err(ReadingError::InvalidDateInput {
            message: format!("reference year must be positive, got {}", reference_year),
        });
    }

    let sum = i64::from(birth_date.day()) + i64::from(birth_date.month()) + i64::from(reference_year);
    PersonalYear::new(reduce_to_digit(sum))
}

/// Parses a `YYYY-MM-DD` birth date, mapping failures to the date-input error
/// so the caller can decide the UX.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ReadingError::InvalidDateInput {
        message: format!("'{}' is not a valid YYYY-MM-DD date: {}", value, e),
    })
}

fn reduce_to_digit(mut value: i64) -> u8 {
    while value > 9 {
        let mut digits = 0;
        while value > 0 {
            digits += value % 10;
            value /= 10;
        }
        value = digits;
    }
    value as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_documented_example() {
        // 15 + 3 + 2024 = 2042 -> 2+0+4+2 = 8
        let year = personal_year(date(1980, 3, 15), 2024).unwrap();
        assert_eq!(year.get(), 8);
    }

    #[test]
    fn test_multi_step_reduction() {
        // 20 + 5 + 2024 = 2049 -> 15 -> 6
        let year = personal_year(date(1990, 5, 20), 2024).unwrap();
        assert_eq!(year.get(), 6);
    }

    #[test]
    fn test_always_in_range() {
        for day in [1, 9, 15, 28, 31] {
            for month in [1, 6, 12] {
                if let Some(birth) = NaiveDate::from_ymd_opt(1975, month, day) {
                    let year = personal_year(birth, 2026).unwrap();
                    assert!((1..=9).contains(&year.get()));
                }
            }
        }
    }

    #[test]
    fn test_rejects_non_positive_reference_year() {
        assert!(personal_year(date(1990, 5, 20), 0).is_err());
        assert!(personal_year(date(1990, 5, 20), -3).is_err());
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(parse_birth_date("1990-05-20").unwrap(), date(1990, 5, 20));
        assert!(parse_birth_date("20/05/1990").is_err());
        assert!(parse_birth_date("1990-13-01").is_err());
        assert!(parse_birth_date("").is_err());
    }

    #[test]
    fn test_reduce_to_digit() {
        assert_eq!(reduce_to_digit(2042), 8);
        assert_eq!(reduce_to_digit(9), 9);
        assert_eq!(reduce_to_digit(10), 1);
        assert_eq!(reduce_to_digit(99), 9);
    }
}
