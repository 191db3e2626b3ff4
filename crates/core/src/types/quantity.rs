//! Cart line quantities.
//!
//! A [`Quantity`] is always at least one. Inputs that would produce a smaller
//! value are clamped to one rather than rejected.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a stored quantity is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quantity must be at least 1")]
pub struct QuantityError;

/// A positive number of units on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Coerce any integer into a quantity.
    ///
    /// Values below one become one; values beyond `u32::MAX` saturate.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        u32::try_from(value.max(1))
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self(NonZeroU32::MAX))
    }

    /// Coerce free-form text (e.g. a quantity input box) into a quantity.
    ///
    /// Leading whitespace and an optional sign are accepted, then as many
    /// digits as are present; trailing characters are ignored. Input with no
    /// leading digits is treated as non-numeric and becomes one.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
            Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
            _ => (false, trimmed),
        };
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() || negative {
            return Self::ONE;
        }
        // Overlong digit strings saturate instead of failing the parse.
        digits
            .parse::<i64>()
            .map_or(Self(NonZeroU32::MAX), Self::clamped)
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// One more unit, saturating at the maximum.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(QuantityError)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_floors_at_one() {
        assert_eq!(Quantity::clamped(0), Quantity::ONE);
        assert_eq!(Quantity::clamped(-5), Quantity::ONE);
        assert_eq!(Quantity::clamped(4).get(), 4);
        assert_eq!(Quantity::clamped(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Quantity::parse_lenient("3").get(), 3);
        assert_eq!(Quantity::parse_lenient("  12abc").get(), 12);
        assert_eq!(Quantity::parse_lenient("+2").get(), 2);
        assert_eq!(Quantity::parse_lenient("-4"), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient("0"), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient("abc"), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient(""), Quantity::ONE);
        assert_eq!(Quantity::parse_lenient("99999999999999999999999").get(), u32::MAX);
    }

    #[test]
    fn test_zero_rejected_on_deserialize() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }

    #[test]
    fn test_incremented_saturates() {
        let max = Quantity::clamped(i64::from(u32::MAX));
        assert_eq!(max.incremented(), max);
        assert_eq!(Quantity::ONE.incremented().get(), 2);
    }
}
