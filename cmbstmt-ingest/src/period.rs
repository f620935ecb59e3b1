//! Reference period: the statement (year, month) used to put a year on bare `MM/DD` dates.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::IngestError;
use crate::patterns::reference_period_captures;

/// How many leading fragments are searched for the statement period.
pub const PERIOD_SCAN_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferencePeriod {
    pub year: i32,
    pub month: u32,
}

impl ReferencePeriod {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Today's calendar month in local time.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    /// Year a transaction in `month` belongs to, relative to this period.
    ///
    /// Months more than two ahead of the reference month belong to the previous
    /// year (a January statement listing December purchases). Months more than
    /// two behind a November/December reference roll into the next year.
    pub fn resolve_year(&self, month: u32) -> i32 {
        let month = month as i64;
        let reference = self.month as i64;
        if month > reference + 2 {
            self.year - 1
        } else if month < reference - 2 && reference > 10 {
            self.year + 1
        } else {
            self.year
        }
    }

    /// Turn `MM/DD` into `YYYY-MM-DD`.
    ///
    /// Empty input stays empty. Anything that is not two `/`-separated parts is
    /// returned unchanged. Month and day text is kept as printed.
    pub fn format_date(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let parts: Vec<&str> = raw.split('/').collect();
        let [month, day] = parts.as_slice() else {
            return raw.to_string();
        };

        let year = match month.parse::<u32>() {
            Ok(m) => self.resolve_year(m),
            Err(_) => self.year,
        };

        format!("{year}-{month}-{day}")
    }
}

impl fmt::Display for ReferencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReferencePeriod {
    type Err = IngestError;

    /// Accepts `2025-11`, `2025/11` and `2025年11月`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IngestError::InvalidPeriod(s.to_string());

        let normalized = s
            .trim()
            .trim_end_matches('月')
            .replace(['/', '年'], "-");
        let (year, month) = normalized.split_once('-').ok_or_else(invalid)?;

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self::new(year, month))
    }
}

impl TryFrom<String> for ReferencePeriod {
    type Error = IngestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferencePeriod> for String {
    fn from(value: ReferencePeriod) -> Self {
        value.to_string()
    }
}

/// Find the statement period in the first [`PERIOD_SCAN_LIMIT`] fragments.
///
/// The first fragment containing a `20YY` year followed by `/` or a CJK character
/// and a one or two digit month wins.
pub fn detect_reference_period<S: AsRef<str>>(fragments: &[S]) -> Option<ReferencePeriod> {
    fragments
        .iter()
        .take(PERIOD_SCAN_LIMIT)
        .enumerate()
        .find_map(|(idx, fragment)| {
            let caps = reference_period_captures(fragment.as_ref())?;
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            debug!(idx, year, month, "reference period detected");
            Some(ReferencePeriod::new(year, month))
        })
}
