//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As binary floats:                                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    35.35 has no exact binary representation                             │
//! │                                                                         │
//! │  The points rules ask EXACT questions ("is this a round dollar?",      │
//! │  "is this a multiple of 0.25?"), so amounts must be exact too.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3535 % 100 == 35   → not a round dollar                             │
//! │    3535 % 25  == 10   → not a quarter multiple                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use reward_core::money::Money;
//!
//! let price = Money::from_cents(1225); // $12.25
//! assert!(!price.is_round_dollar());
//! assert!(price.is_multiple_of_quarter());
//! assert_eq!(price.fifth_rounded_up(), 3); // ceil(12.25 * 0.2)
//! ```

use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are representable so the validator can
///   reject them, even though the wire pattern never produces one
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use reward_core::money::Money;
    ///
    /// let price = Money::from_cents(649); // Represents $6.49
    /// assert_eq!(price.cents(), 649);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// Returns `None` if the value does not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use reward_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(35, 35), Some(Money::from_cents(3535)));
    /// assert_eq!(Money::from_major_minor(i64::MAX, 0), None);
    /// ```
    pub fn from_major_minor(major: i64, minor: i64) -> Option<Self> {
        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// True when there are no cents (`100.00`, `0.00`).
    #[inline]
    pub const fn is_round_dollar(&self) -> bool {
        self.0 % 100 == 0
    }

    /// True when the amount divides evenly by $0.25.
    #[inline]
    pub const fn is_multiple_of_quarter(&self) -> bool {
        self.0 % 25 == 0
    }

    /// Returns `ceil(amount * 0.2)` in whole units.
    ///
    /// One fifth of a dollar amount is `cents / 500` whole units, so the
    /// ceiling is computed without leaving integer arithmetic. Only
    /// meaningful for non-negative amounts.
    ///
    /// ## Example
    /// ```rust
    /// use reward_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1200).fifth_rounded_up(), 3); // 2.4 → 3
    /// assert_eq!(Money::from_cents(500).fifth_rounded_up(), 1);  // 1.0 → 1
    /// assert_eq!(Money::zero().fifth_rounded_up(), 0);
    /// ```
    #[inline]
    pub const fn fifth_rounded_up(&self) -> i64 {
        let whole = self.0 / 500;
        if self.0 % 500 > 0 {
            whole + 1
        } else {
            whole
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount the way it arrives on the wire (`35.35`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
