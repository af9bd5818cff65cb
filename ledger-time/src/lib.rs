// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Unsigned time management
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod clock;
mod error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TimeError;

use serde::{Deserialize, Serialize};
use std::convert::{TryFrom, TryInto};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Time structure used everywhere.
/// milliseconds since 01/01/1970.
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LedgerTime(u64);

impl fmt::Display for LedgerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_millis())
    }
}

impl TryFrom<Duration> for LedgerTime {
    type Error = TimeError;

    /// Conversion from `std::time::Duration`.
    /// ```
    /// # use std::time::Duration;
    /// # use ledger_time::*;
    /// # use std::convert::TryFrom;
    /// let duration: Duration = Duration::from_millis(42);
    /// let time : LedgerTime = LedgerTime::from_millis(42);
    /// assert_eq!(time, LedgerTime::try_from(duration).unwrap());
    /// ```
    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Ok(LedgerTime(
            value
                .as_millis()
                .try_into()
                .map_err(|_| TimeError::ConversionError)?,
        ))
    }
}

impl From<LedgerTime> for Duration {
    fn from(value: LedgerTime) -> Self {
        value.to_duration()
    }
}

impl FromStr for LedgerTime {
    type Err = crate::TimeError;

    /// Conversion from `&str`, in milliseconds.
    ///
    /// ```
    /// # use ledger_time::*;
    /// # use std::str::FromStr;
    /// assert_eq!(LedgerTime::from_millis(42), LedgerTime::from_str("42").unwrap());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LedgerTime(
            u64::from_str(s).map_err(|_| Self::Err::ConversionError)?,
        ))
    }
}

impl LedgerTime {
    /// Conversion from `u64`, representing timestamp in milliseconds.
    pub const fn from_millis(value: u64) -> Self {
        LedgerTime(value)
    }

    /// Conversion from whole seconds.
    pub const fn from_secs(value: u64) -> Self {
        LedgerTime(value.saturating_mul(1000))
    }

    /// Smallest time interval
    pub const EPSILON: LedgerTime = LedgerTime(1);

    /// Gets current UNIX timestamp (resolution: milliseconds).
    pub fn now() -> Result<Self, TimeError> {
        let now: u64 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TimeError::TimeOverflowError)?
            .as_millis()
            .try_into()
            .map_err(|_| TimeError::TimeOverflowError)?;
        Ok(LedgerTime(now))
    }

    /// Conversion to `std::time::Duration`.
    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Conversion to `u64`, representing milliseconds.
    pub const fn to_millis(&self) -> u64 {
        self.0
    }

    /// Whole seconds, rounded down.
    pub const fn to_secs(&self) -> u64 {
        self.0 / 1000
    }

    /// ```
    /// # use ledger_time::*;
    /// let time_1 = LedgerTime::from_millis(42);
    /// let time_2 = LedgerTime::from_millis(7);
    /// assert_eq!(time_1.saturating_sub(time_2), LedgerTime::from_millis(42 - 7));
    /// assert_eq!(time_2.saturating_sub(time_1), LedgerTime::from_millis(0));
    /// ```
    #[must_use]
    pub fn saturating_sub(self, t: LedgerTime) -> Self {
        LedgerTime(self.0.saturating_sub(t.0))
    }

    /// ```
    /// # use ledger_time::*;
    /// let time_1 = LedgerTime::from_millis(42);
    /// let time_2 = LedgerTime::from_millis(7);
    /// assert_eq!(time_1.saturating_add(time_2), LedgerTime::from_millis(42 + 7));
    /// ```
    #[must_use]
    pub fn saturating_add(self, t: LedgerTime) -> Self {
        LedgerTime(self.0.saturating_add(t.0))
    }

    /// Checked subtraction
    pub fn checked_sub(self, t: LedgerTime) -> Result<Self, TimeError> {
        self.0
            .checked_sub(t.0)
            .ok_or_else(|| TimeError::CheckedOperationError("subtraction error".to_string()))
            .map(LedgerTime)
    }

    /// Checked addition
    pub fn checked_add(self, t: LedgerTime) -> Result<Self, TimeError> {
        self.0
            .checked_add(t.0)
            .ok_or_else(|| TimeError::CheckedOperationError("addition error".to_string()))
            .map(LedgerTime)
    }

    /// ```
    /// # use ledger_time::*;
    /// let time = LedgerTime::from_millis(1_640_995_200_000);
    /// assert_eq!(time.format_instant(), String::from("2022-01-01T00:00:00Z"))
    /// ```
    pub fn format_instant(&self) -> String {
        OffsetDateTime::from_unix_timestamp(self.to_secs() as i64)
            .ok()
            .and_then(|date_time| date_time.format(&Rfc3339).ok())
            .unwrap_or_else(|| format!("{}ms", self.0))
    }
}
