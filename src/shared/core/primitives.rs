// Value objects shared by every module.
//
// Purpose
// - Validate raw inputs once, at the edge, so aggregates only ever see legal values.
//
// Responsibilities
// - Hours are quantised to quarter hours and kept as an integer count so sums are exact.
// - Reasons are trimmed, non-blank and bounded.
// - Fiscal months are closed date ranges of at most 31 days.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrimitiveError {
    #[error("hours must be between 0.25 and 24.0, got {0}")]
    HoursOutOfRange(f64),

    #[error("hours must be a multiple of 0.25, got {0}")]
    HoursNotQuartered(f64),

    #[error("reason must not be blank")]
    BlankReason,

    #[error("reason must be at most {max} characters, got {length}")]
    ReasonTooLong { length: usize, max: usize },

    #[error("fiscal month {start}..{end} is not a valid period")]
    InvalidFiscalMonth { start: NaiveDate, end: NaiveDate },
}

pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A duration in quarter hours.
///
/// Serialised as the raw quarter-hour count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(u32);

impl Hours {
    pub const QUARTERS_PER_HOUR: u32 = 4;
    pub const ZERO: Hours = Hours(0);
    pub const DAILY_LIMIT: Hours = Hours(24 * Self::QUARTERS_PER_HOUR);

    pub fn from_hours(hours: f64) -> Result<Self, PrimitiveError> {
        if !hours.is_finite() || !(0.25..=24.0).contains(&hours) {
            return Err(PrimitiveError::HoursOutOfRange(hours));
        }
        let quarters = hours * f64::from(Self::QUARTERS_PER_HOUR);
        if (quarters - quarters.round()).abs() > 1e-9 {
            return Err(PrimitiveError::HoursNotQuartered(hours));
        }
        Ok(Hours(quarters.round() as u32))
    }

    pub fn from_quarters(quarters: u32) -> Self {
        Hours(quarters)
    }

    pub fn quarters(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::QUARTERS_PER_HOUR)
    }
}

impl Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0 + rhs.0)
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Hours>>(iter: I) -> Hours {
        iter.fold(Hours::ZERO, Add::add)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}h", self.as_f64())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reason(String);

impl Reason {
    pub const MAX_LENGTH: usize = 1000;

    pub fn parse(raw: impl Into<String>) -> Result<Self, PrimitiveError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PrimitiveError::BlankReason);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PrimitiveError::ReasonTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Reason(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed date range that is the unit of monthly approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalMonth {
    start: NaiveDate,
    end: NaiveDate,
}

impl FiscalMonth {
    pub const MAX_DAYS: i64 = 31;

    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PrimitiveError> {
        let days = (end - start).num_days() + 1;
        if days < 1 || days > Self::MAX_DAYS {
            return Err(PrimitiveError::InvalidFiscalMonth { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month `year-month`, first to last day.
    pub fn calendar(year: i32, month: u32) -> Result<Self, PrimitiveError> {
        let fallback = NaiveDate::MIN;
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(
            PrimitiveError::InvalidFiscalMonth {
                start: fallback,
                end: fallback,
            },
        )?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or(PrimitiveError::InvalidFiscalMonth { start, end: start })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

impl fmt::Display for FiscalMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02} ({}..{})",
            self.end.year(),
            self.end.month(),
            self.start,
            self.end
        )
    }
}
