//! # Points Calculator
//!
//! Maps a validated receipt to its reward points.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule                 Condition                          Points         │
//! │  ───────────────────  ─────────────────────────────────  ─────────────  │
//! │  Alphanumeric         per ASCII letter/digit in retailer  +1 each       │
//! │  Round dollar         total has no cents                  +50           │
//! │  Quarter multiple     total divisible by 0.25             +25           │
//! │  Item pairs           every two items                     +5 per pair   │
//! │  Description length   trimmed length % 3 == 0             ceil(p * 0.2) │
//! │  Odd day              purchase day is odd                 +6            │
//! │  Afternoon            14:00 <= time < 16:00               +10           │
//! │                                                                         │
//! │  Rules are independent. A whole-dollar total earns both the round      │
//! │  dollar and the quarter bonus (75).                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All amount checks run on integer cents, so they are exact.

use chrono::{Datelike, Timelike};

use crate::types::Receipt;

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const POINTS_PER_ITEM_PAIR: i64 = 5;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;

/// Start (inclusive) and end (exclusive) hour of the afternoon bonus window.
const AFTERNOON_HOURS: std::ops::Range<u32> = 14..16;

/// Points earned by each rule for one receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub alphanumeric: i64,
    pub round_dollar: i64,
    pub quarter_multiple: i64,
    pub item_pairs: i64,
    pub description_length: i64,
    pub odd_day: i64,
    pub afternoon: i64,
}

impl PointsBreakdown {
    /// Applies every rule to `receipt`.
    pub fn for_receipt(receipt: &Receipt) -> Self {
        PointsBreakdown {
            alphanumeric: alphanumeric_points(&receipt.retailer),
            round_dollar: if receipt.total.is_round_dollar() {
                ROUND_DOLLAR_POINTS
            } else {
                0
            },
            quarter_multiple: if receipt.total.is_multiple_of_quarter() {
                QUARTER_MULTIPLE_POINTS
            } else {
                0
            },
            item_pairs: (receipt.items.len() / 2) as i64 * POINTS_PER_ITEM_PAIR,
            description_length: description_points(receipt),
            odd_day: if receipt.purchase_date.day() % 2 == 1 {
                ODD_DAY_POINTS
            } else {
                0
            },
            afternoon: if AFTERNOON_HOURS.contains(&receipt.purchase_time.hour()) {
                AFTERNOON_POINTS
            } else {
                0
            },
        }
    }

    /// Sum of all rules, saturating at `i64::MAX`.
    pub fn total(&self) -> i64 {
        [
            self.alphanumeric,
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.description_length,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0, i64::saturating_add)
    }
}

/// Calculates the reward points for a receipt.
///
/// Deterministic: the same receipt value always yields the same points.
/// Receipts whose prices add up past `i64::MAX` points score `i64::MAX`.
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, NaiveTime};
/// use reward_core::{calculate_points, Item, Money, Receipt};
///
/// let receipt = Receipt::new(
///     "Shop#42",
///     NaiveDate::from_ymd_opt(2024, 12, 13).unwrap(),
///     NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
///     vec![Item::new("Juice", Money::from_cents(375))],
///     Money::from_cents(9999),
/// );
///
/// // "Shop42" (6) + odd day (6)
/// assert_eq!(calculate_points(&receipt), 12);
/// ```
pub fn calculate_points(receipt: &Receipt) -> i64 {
    PointsBreakdown::for_receipt(receipt).total()
}

fn alphanumeric_points(retailer: &str) -> i64 {
    retailer
        .trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .count() as i64
}

fn description_points(receipt: &Receipt) -> i64 {
    receipt
        .items
        .iter()
        .filter(|item| item.short_description.trim().len() % 3 == 0)
        .map(|item| item.price.fifth_rounded_up())
        .fold(0, i64::saturating_add)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Item;
    use chrono::{NaiveDate, NaiveTime};

    fn receipt(
        retailer: &str,
        day: u32,
        (hour, minute): (u32, u32),
        items: &[(&str, i64)],
        total_cents: i64,
    ) -> Receipt {
        Receipt::new(
            retailer,
            NaiveDate::from_ymd_opt(2022, 1, day).unwrap(),
            NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
            items
                .iter()
                .map(|(desc, cents)| Item::new(*desc, Money::from_cents(*cents)))
                .collect(),
            Money::from_cents(total_cents),
        )
    }

    #[test]
    fn test_target_receipt() {
        let r = receipt(
            "Target",
            1,
            (13, 1),
            &[
                ("Mountain Dew 12PK", 649),
                ("Emils Cheese Pizza", 1225),
                ("Knorr Creamy Chicken", 126),
                ("Doritos Nacho Cheese", 335),
                ("   Klarbrunn 12-PK 12 FL OZ  ", 1200),
            ],
            3535,
        );

        let breakdown = PointsBreakdown::for_receipt(&r);
        assert_eq!(
            breakdown,
            PointsBreakdown {
                alphanumeric: 6,
                round_dollar: 0,
                quarter_multiple: 0,
                item_pairs: 10,
                description_length: 6,
                odd_day: 6,
                afternoon: 0,
            }
        );
        assert_eq!(calculate_points(&r), 28);
    }

    #[test]
    fn test_round_total_with_afternoon_bonus() {
        let r = receipt(
            "Retailer123",
            13,
            (15, 0),
            &[("Milk", 250), ("Bread", 150)],
            10000,
        );

        // 11 + 50 + 25 + 5 + 6 + 10
        assert_eq!(calculate_points(&r), 107);
    }

    #[test]
    fn test_no_bonus_at_four_pm() {
        let r = receipt("Shop#42", 13, (16, 0), &[("Juice", 375)], 9999);
        assert_eq!(calculate_points(&r), 12);
    }

    #[test]
    fn test_corner_market_receipt() {
        let r = receipt(
            "M&M Corner Market",
            20,
            (14, 33),
            &[
                ("Gatorade", 225),
                ("Gatorade", 225),
                ("Gatorade", 225),
                ("Gatorade", 225),
            ],
            900,
        );

        // 14 + 50 + 25 + 10 + 10
        assert_eq!(calculate_points(&r), 109);
    }

    #[test]
    fn test_afternoon_window_bounds() {
        let points = |hour, minute| {
            let r = receipt("A", 2, (hour, minute), &[("Ab", 1)], 1);
            PointsBreakdown::for_receipt(&r).afternoon
        };

        assert_eq!(points(13, 59), 0);
        assert_eq!(points(14, 0), 10);
        assert_eq!(points(15, 59), 10);
        assert_eq!(points(16, 0), 0);
    }

    #[test]
    fn test_item_pairs_floor() {
        for (count, expected) in [(1, 0), (2, 5), (3, 5), (4, 10), (5, 10)] {
            let items: Vec<(&str, i64)> = (0..count).map(|_| ("Ab", 100)).collect();
            let r = receipt("A", 2, (9, 0), &items, 1);
            assert_eq!(PointsBreakdown::for_receipt(&r).item_pairs, expected);
        }
    }

    #[test]
    fn test_many_maximum_prices_saturate() {
        let items: Vec<(&str, i64)> = (0..600).map(|_| ("Abc", i64::MAX)).collect();
        let r = receipt("Target", 1, (15, 0), &items, 0);

        let breakdown = PointsBreakdown::for_receipt(&r);
        assert_eq!(breakdown.description_length, i64::MAX);
        assert_eq!(breakdown.total(), i64::MAX);
        assert_eq!(calculate_points(&r), i64::MAX);

        // A single maximum price still scores exactly
        let r = receipt("Target", 1, (15, 0), &[("Abc", i64::MAX)], 0);
        assert_eq!(
            PointsBreakdown::for_receipt(&r).description_length,
            i64::MAX / 500 + 1
        );
    }

    #[test]
    fn test_description_length_uses_trimmed_bytes() {
        let r = receipt("A", 2, (9, 0), &[("  abc  ", 1000), ("abcd", 1000)], 1);
        assert_eq!(PointsBreakdown::for_receipt(&r).description_length, 2);
    }

    #[test]
    fn test_alphanumeric_ignores_punctuation_and_spaces() {
        assert_eq!(alphanumeric_points("M&M Corner Market"), 14);
        assert_eq!(alphanumeric_points("  Shop#42 "), 6);
        assert_eq!(alphanumeric_points("my_shop-1"), 7);
    }

    #[test]
    fn test_deterministic() {
        let r = receipt("Walgreens", 2, (8, 13), &[("Pepsi 12PK", 125)], 125);
        let first = calculate_points(&r);
        for _ in 0..10 {
            assert_eq!(calculate_points(&r.clone()), first);
        }
    }
}
