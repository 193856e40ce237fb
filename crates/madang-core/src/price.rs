//! # Price Module
//!
//! Provides the `Price` type for sale prices.
//!
//! ## Whole Won Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Orders.saleprice is an INTEGER number of won.                          │
//! │                                                                         │
//! │  Operator types     "13000"   → Price(13000)   ✓                        │
//! │                     "13,000"  → InvalidFormat  ✗ (digits only)          │
//! │                     "-500"    → InvalidFormat  ✗ (no sign)              │
//! │                     "99.5"    → InvalidFormat  ✗ (no fraction)          │
//! │                                                                         │
//! │  Negative and fractional prices are not representable.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use madang_core::price::Price;
//!
//! let price: Price = "13000".parse().unwrap();
//! assert_eq!(price.won(), 13_000);
//! assert_eq!(price.to_string(), "13,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::parse_price;

// =============================================================================
// Price Type
// =============================================================================

/// A non-negative sale price in whole won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    /// Creates a price from a whole-won amount.
    ///
    /// Returns `None` for negative amounts.
    #[inline]
    pub const fn from_won(won: i64) -> Option<Self> {
        if won < 0 {
            None
        } else {
            Some(Price(won))
        }
    }

    /// Returns the amount in won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_price(s)
    }
}

impl Add for Price {
    type Output = Price;

    /// Saturates at `i64::MAX` instead of overflowing.
    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::zero(), Add::add)
    }
}

/// Formats with comma thousands separators, no currency symbol.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        f.write_str(&grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
