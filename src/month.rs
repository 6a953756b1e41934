// 📅 Month - "YYYY-MM" calendar months with serial arithmetic
// serial = year*12 + month, so consecutive months always differ by exactly 1

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// MONTH
// ============================================================================

/// A calendar month parsed from the "YYYY-MM" form.
///
/// Ordering and equality agree with `serial()`, so months sort
/// chronologically and lexicographic order of the string form matches.
/// Malformed input is rejected outright instead of being mapped to a
/// sentinel value that would corrupt axis ordering downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Build a month from parts. `month` must be in 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError {
                input: format!("{:04}-{:02}", year, month),
                reason: format!("month number {} is outside 1..=12", month),
            });
        }
        Ok(Month { year, month })
    }

    /// The wall-clock month, for runs that don't pin a reference month.
    pub fn now() -> Self {
        let today = chrono::Utc::now();
        Month {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Serial month number for chart arithmetic: `year*12 + month`.
    pub fn serial(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| MonthParseError {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        // Well-formed input is exactly 7 characters: "YYYY-MM".
        if s.len() != 7 {
            return Err(malformed("expected exactly 7 characters"));
        }
        if s.as_bytes()[4] != b'-' {
            return Err(malformed("expected '-' between year and month"));
        }

        let year: i32 = s[..4]
            .parse()
            .map_err(|_| malformed("year is not a number"))?;
        let month: u32 = s[5..]
            .parse()
            .map_err(|_| malformed("month is not a number"))?;

        Month::new(year, month).map_err(|_| malformed("month number is outside 1..=12"))
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError {
    pub input: String,
    pub reason: String,
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid month format \"{}\": {} (expected \"YYYY-MM\")",
            self.input, self.reason
        )
    }
}

impl std::error::Error for MonthParseError {}

// ============================================================================
// TESTS
// ============================================================================
