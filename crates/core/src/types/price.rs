//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are never negative and are kept at full precision. Rounding to two
//! decimal places happens only when a price is formatted for display, so
//! totals recomputed many times never accumulate rounding error.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quantity::Quantity;

/// Errors produced when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative amount in the store's single currency.
///
/// Serializes as a decimal string; deserializes from either a string or a
/// JSON number (the remote catalog sends numbers).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount rounded half away from zero to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.rounded())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<Quantity> for Price {
    type Output = Self;

    fn mul(self, rhs: Quantity) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(rhs.get())))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
