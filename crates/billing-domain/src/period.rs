//! Calendar year-month identifying one billing cycle.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const MAX_YEAR: i32 = 9999;

/// A calendar month, rendered canonically as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(PeriodParseError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The period that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar month immediately after the one containing `date`.
    pub fn following(date: NaiveDate) -> Self {
        Self::containing(date).next()
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingPeriod {
    type Err = PeriodParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let raw = value.trim();
        let (year, month) = raw
            .split_once('-')
            .ok_or_else(|| PeriodParseError::Malformed(raw.to_string()))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(PeriodParseError::Malformed(raw.to_string()));
        }
        let year = year
            .parse::<i32>()
            .map_err(|_| PeriodParseError::Malformed(raw.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| PeriodParseError::Malformed(raw.to_string()))?;
        Self::new(year, month)
    }
}

impl Serialize for BillingPeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BillingPeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised when a period cannot be constructed or parsed.
pub enum PeriodParseError {
    Malformed(String),
    YearOutOfRange(i32),
    MonthOutOfRange(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::Malformed(raw) => {
                write!(f, "`{raw}` is not a YYYY-MM period")
            }
            PeriodParseError::YearOutOfRange(year) => {
                write!(f, "year {year} is outside 0000-{MAX_YEAR}")
            }
            PeriodParseError::MonthOutOfRange(month) => {
                write!(f, "month {month} is outside 1-12")
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
