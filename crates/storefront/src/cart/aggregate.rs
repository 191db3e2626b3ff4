//! Derived cart totals.
//!
//! Totals are recomputed from the lines on demand and kept at full decimal
//! precision; rounding is left to display formatting.

use fakestore_core::{CartLineItem, Price};

/// Sum of `price * quantity` over all lines. Zero for an empty cart.
#[must_use]
pub fn total_price(lines: &[CartLineItem]) -> Price {
    lines.iter().map(CartLineItem::line_total).sum()
}

/// Sum of quantities over all lines.
#[must_use]
pub fn total_item_count(lines: &[CartLineItem]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity.get())).sum()
}

/// Both totals, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub total_price: Price,
    pub item_count: u64,
}

impl CartTotals {
    #[must_use]
    pub fn of(lines: &[CartLineItem]) -> Self {
        Self {
            total_price: total_price(lines),
            item_count: total_item_count(lines),
        }
    }
}
