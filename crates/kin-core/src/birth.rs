//! Birth-date parsing and relative-age comparison.
//!
//! Family data records births as `DD-MON-YYYY` (`10-JAN-1980`), sometimes with a two-digit
//! year. Anything that does not parse degrades to [`AgeOrder::Unknown`] instead of failing.

use crate::graph::Person;
use chrono::{Datelike, Local, NaiveDate};
use std::cmp::Ordering;

/// Years this far past the current two-digit year are still read as 20YY.
const TWO_DIGIT_YEAR_WINDOW: i32 = 10;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Outcome of comparing the first person's age against the second's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeOrder {
    /// First person was born earlier.
    Older,
    Younger,
    /// Same birth date.
    Same,
    /// Either birth date is missing or unparseable.
    Unknown,
}

/// Parse a recorded birth date, pivoting two-digit years on today's date.
pub fn parse_birth(raw: &str) -> Option<NaiveDate> {
    parse_birth_with_pivot(raw, Local::now().year() % 100)
}

/// Parse a recorded birth date with an explicit current two-digit year.
///
/// A two-digit year `YY` is `19YY` when `YY > current + 10`, otherwise `20YY`.
pub fn parse_birth_with_pivot(raw: &str, current_two_digit_year: i32) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day: u32 = day.trim().parse().ok()?;
    let month_key: String = month.trim().chars().take(3).collect::<String>().to_uppercase();
    let month = MONTHS.iter().position(|m| *m == month_key)? as u32 + 1;
    let mut year: i32 = year.trim().parse().ok()?;
    if (0..100).contains(&year) {
        year += if year > current_two_digit_year + TWO_DIGIT_YEAR_WINDOW {
            1900
        } else {
            2000
        };
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Compare `first` against `second`: `Older` when `first` was born earlier.
pub fn compare_age(first: Option<&Person>, second: Option<&Person>) -> AgeOrder {
    let birth_of = |p: Option<&Person>| p.and_then(|p| p.birth.as_deref()).and_then(parse_birth);
    match (birth_of(first), birth_of(second)) {
        (Some(a), Some(b)) => match a.cmp(&b) {
            Ordering::Less => AgeOrder::Older,
            Ordering::Greater => AgeOrder::Younger,
            Ordering::Equal => AgeOrder::Same,
        },
        _ => AgeOrder::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_full_year() {
        assert_eq!(parse_birth("10-JAN-1980"), Some(date(1980, 1, 10)));
        assert_eq!(parse_birth("5-dec-2001"), Some(date(2001, 12, 5)));
        assert_eq!(parse_birth("05-September-1975"), Some(date(1975, 9, 5)));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        // current year 26: 36 and below are 20YY, above are 19YY
        assert_eq!(parse_birth_with_pivot("01-JAN-36", 26), Some(date(2036, 1, 1)));
        assert_eq!(parse_birth_with_pivot("01-JAN-37", 26), Some(date(1937, 1, 1)));
        assert_eq!(parse_birth_with_pivot("01-JAN-05", 26), Some(date(2005, 1, 1)));
        assert_eq!(parse_birth_with_pivot("01-JAN-85", 26), Some(date(1985, 1, 1)));
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(parse_birth(""), None);
        assert_eq!(parse_birth("1980-01-10"), None);
        assert_eq!(parse_birth("10/01/1980"), None);
        assert_eq!(parse_birth("10-XYZ-1980"), None);
        assert_eq!(parse_birth("31-FEB-1980"), None);
        assert_eq!(parse_birth("aa-JAN-1980"), None);
    }

    #[test]
    fn test_compare_age() {
        let home = Person::new("h", "Home").with_birth("10-JAN-1980");
        let sibling = Person::new("s", "Sibling").with_birth("05-JAN-1975");
        let twin = Person::new("t", "Twin").with_birth("10-jan-1980");
        let undated = Person::new("u", "Undated");

        assert_eq!(compare_age(Some(&sibling), Some(&home)), AgeOrder::Older);
        assert_eq!(compare_age(Some(&home), Some(&sibling)), AgeOrder::Younger);
        assert_eq!(compare_age(Some(&home), Some(&twin)), AgeOrder::Same);
        assert_eq!(compare_age(Some(&home), Some(&undated)), AgeOrder::Unknown);
        assert_eq!(compare_age(None, Some(&home)), AgeOrder::Unknown);
    }
}
