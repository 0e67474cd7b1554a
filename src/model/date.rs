//! Partial dates as they appear in JSON Resume documents.
//!
//! Résumé dates are frequently incomplete: a year alone, a year and month,
//! or a full calendar date. Strings are parsed once, at the data-model
//! boundary, so layout only ever sees a typed value.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A date with year precision or better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialDate {
    Year(i32),
    YearMonth { year: i32, month: u32 },
    Date(NaiveDate),
}

/// Why a date string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid year in date '{0}'")]
    InvalidYear(String),
    #[error("invalid month in date '{0}'")]
    InvalidMonth(String),
    #[error("invalid day in date '{0}'")]
    InvalidDay(String),
    #[error("too many components in date '{0}' (expected YYYY, YYYY-MM or YYYY-MM-DD)")]
    TooManyParts(String),
}

impl PartialDate {
    pub fn year(&self) -> i32 {
        match self {
            PartialDate::Year(year) => *year,
            PartialDate::YearMonth { year, .. } => *year,
            PartialDate::Date(date) => date.year(),
        }
    }

    /// The year as it appears in row labels (`2011-01-11` → `"2011"`).
    pub fn year_label(&self) -> String {
        format!("{:04}", self.year())
    }
}

impl FromStr for PartialDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('-').collect();
        let year = |p: &str| -> Result<i32, DateError> {
            if p.len() != 4 || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DateError::InvalidYear(s.to_string()));
            }
            p.parse().map_err(|_| DateError::InvalidYear(s.to_string()))
        };
        let month = |p: &str| -> Result<u32, DateError> {
            match p.parse::<u32>() {
                Ok(m) if (1..=12).contains(&m) && p.len() <= 2 => Ok(m),
                _ => Err(DateError::InvalidMonth(s.to_string())),
            }
        };

        match parts.as_slice() {
            [y] => Ok(PartialDate::Year(year(y)?)),
            [y, m] => Ok(PartialDate::YearMonth {
                year: year(y)?,
                month: month(m)?,
            }),
            [y, m, d] => {
                let (year, month) = (year(y)?, month(m)?);
                let day: u32 = d
                    .parse()
                    .map_err(|_| DateError::InvalidDay(s.to_string()))?;
                NaiveDate::from_ymd_opt(year, month, day)
                    .map(PartialDate::Date)
                    .ok_or_else(|| DateError::InvalidDay(s.to_string()))
            }
            _ => Err(DateError::TooManyParts(s.to_string())),
        }
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialDate::Year(year) => write!(f, "{:04}", year),
            PartialDate::YearMonth { year, month } => write!(f, "{:04}-{:02}", year, month),
            PartialDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Deserialize an optional date where `""`, `null` and a missing key all mean
/// "no date".
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<PartialDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `"{start}-{end}"` year span for row labels.
///
/// An open-ended span keeps its trailing dash; without a start there is no
/// label at all.
pub fn year_range(start: Option<&PartialDate>, end: Option<&PartialDate>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{}-{}", start.year_label(), end.year_label()),
        (Some(start), None) => format!("{}-", start.year_label()),
        (None, _) => String::new(),
    }
}

/// `"{start}-{end}"` with either year left blank when missing. Education
/// rows always carry a label, so an entry with only an end date reads
/// `"-2014"`.
pub fn year_span(start: Option<&PartialDate>, end: Option<&PartialDate>) -> String {
    let year = |date: Option<&PartialDate>| date.map(PartialDate::year_label).unwrap_or_default();
    format!("{}-{}", year(start), year(end))
}
