// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::constants::AMOUNT_DECIMAL_FACTOR;
use crate::ModelsError;
use rust_decimal::prelude::*;
use serde::de::Unexpected;
use std::fmt;
use std::str::FromStr;

/// Quantity of coins held by an account or moved by a transaction.
///
/// Stored as an unsigned count of micro-units (`AMOUNT_DECIMAL_FACTOR` per coin),
/// written as a decimal number of coins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    /// No coins
    pub const fn zero() -> Self {
        Amount(0)
    }

    /// Amount of `micro_units` micro-units
    pub const fn from_raw(micro_units: u64) -> Self {
        Amount(micro_units)
    }

    /// Number of micro-units
    pub const fn to_raw(&self) -> u64 {
        self.0
    }

    /// Amount of `coins` whole coins, capped at the largest amount
    pub const fn from_coins(coins: u64) -> Self {
        Amount(coins.saturating_mul(AMOUNT_DECIMAL_FACTOR))
    }

    /// Sum, capped at the largest amount
    #[must_use]
    pub fn saturating_add(self, other: Amount) -> Self {
        Amount(self.0.saturating_add(other.0))
    }

    /// Difference, floored at zero
    #[must_use]
    pub fn saturating_sub(self, other: Amount) -> Self {
        Amount(self.0.saturating_sub(other.0))
    }

    /// Sum, `None` when it does not fit
    pub fn checked_add(self, other: Amount) -> Option<Self> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Difference, `None` when `other` is larger.
    /// ```
    /// # use ledger_models::amount::Amount;
    /// # use std::str::FromStr;
    /// let balance = Amount::from_str("42").unwrap();
    /// assert_eq!(balance.checked_sub(Amount::from_str("7").unwrap()), Amount::from_str("35").ok());
    /// assert_eq!(balance.checked_sub(Amount::from_str("42.5").unwrap()), None);
    /// ```
    pub fn checked_sub(self, other: Amount) -> Option<Self> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

/// Decimal number of coins, without trailing zeros
///
/// ```
/// # use ledger_models::amount::Amount;
/// assert_eq!(Amount::from_raw(2_500_000).to_string(), "2.5");
/// ```
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coins = Decimal::from(self.0) / Decimal::from(AMOUNT_DECIMAL_FACTOR);
        write!(f, "{}", coins.normalize())
    }
}

/// Parses a decimal number of coins.
///
/// Negative values, values finer than a micro-unit and values beyond `u64`
/// micro-units are rejected.
///
/// ```
/// # use ledger_models::amount::Amount;
/// # use std::str::FromStr;
/// assert_eq!(Amount::from_str("0.000001").unwrap(), Amount::from_raw(1));
/// assert!(Amount::from_str("0.0000001").is_err());
/// assert!(Amount::from_str("-3").is_err());
/// assert!(Amount::from_str("99999999999999999999").is_err());
/// assert!(Amount::from_str("three").is_err());
/// ```
impl FromStr for Amount {
    type Err = ModelsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ModelsError::AmountParseError(format!("{}: {}", text, reason));
        let coins = Decimal::from_str(text).map_err(|err| invalid(&err.to_string()))?;
        if coins.is_sign_negative() && !coins.is_zero() {
            return Err(invalid("negative amount"));
        }
        let micro_units = coins
            .checked_mul(Decimal::from(AMOUNT_DECIMAL_FACTOR))
            .ok_or_else(|| invalid("out of range"))?;
        if !micro_units.fract().is_zero() {
            return Err(invalid("finer than a micro-unit"));
        }
        micro_units
            .to_u64()
            .map(Amount)
            .ok_or_else(|| invalid("out of range"))
    }
}

impl serde::Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_str(DecimalAmountVisitor)
    }
}

struct DecimalAmountVisitor;

impl<'de> serde::de::Visitor<'de> for DecimalAmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal number of coins")
    }

    fn visit_str<E>(self, value: &str) -> Result<Amount, E>
    where
        E: serde::de::Error,
    {
        Amount::from_str(value).map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}
