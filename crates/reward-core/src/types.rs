//! # Domain Types
//!
//! The receipt model and the input types it is assembled from.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Receipt Assembly                                │
//! │                                                                         │
//! │  ┌───────────────────┐   into_draft()   ┌───────────────────┐          │
//! │  │ ReceiptSubmission │ ───────────────► │   ReceiptDraft    │          │
//! │  │  (wire, serde)    │  price / total   │  (not validated)  │          │
//! │  │  every field      │  must be present │  Money, Option<>  │          │
//! │  │  Option<_>        │                  │  date/time/items  │          │
//! │  └───────────────────┘                  └─────────┬─────────┘          │
//! │                                                   │ into_receipt(now)   │
//! │                                                   ▼ (validator)         │
//! │                                         ┌───────────────────┐          │
//! │                                         │      Receipt      │          │
//! │                                         │  id (UUID v4)     │          │
//! │                                         │  Vec<Item>        │          │
//! │                                         └───────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Receipts and items get a UUID v4 at creation. The id never changes after
//! that; the store refuses a second insert with the same id.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::fields::{Amount, PurchaseDate, PurchaseTime, Retailer, ShortDescription};
use crate::money::Money;
use crate::validation::validate_receipt;

// =============================================================================
// Item
// =============================================================================

/// One line entry on a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Trimmed description.
    pub short_description: String,

    /// Price, never negative once validated.
    pub price: Money,
}

impl Item {
    /// Creates an item with a fresh id and timestamps.
    pub fn new(short_description: impl Into<String>, price: Money) -> Self {
        let now = Utc::now();
        Item {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            short_description: short_description.into(),
            price,
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A validated purchase record.
///
/// A receipt exclusively owns its items. Item order is the order they were
/// submitted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Unique identifier (UUID v4), immutable after creation.
    pub id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Trimmed retailer name.
    pub retailer: String,

    /// Calendar date of purchase (UTC).
    pub purchase_date: NaiveDate,

    /// Wall-clock time of purchase (UTC, minute precision).
    pub purchase_time: NaiveTime,

    pub items: Vec<Item>,

    pub total: Money,
}

impl Receipt {
    /// Creates a receipt with a fresh id and timestamps.
    ///
    /// No validation happens here. Submissions go through
    /// [`ReceiptDraft::into_receipt`] instead.
    pub fn new(
        retailer: impl Into<String>,
        purchase_date: NaiveDate,
        purchase_time: NaiveTime,
        items: Vec<Item>,
        total: Money,
    ) -> Self {
        let now = Utc::now();
        Receipt {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            retailer: retailer.into(),
            purchase_date,
            purchase_time,
            items,
            total,
        }
    }
}

// =============================================================================
// Submission (wire input)
// =============================================================================

/// One item as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemSubmission {
    pub short_description: Option<ShortDescription>,

    /// `None` when the key is missing or `null`.
    pub price: Option<Amount>,
}

/// A receipt as it arrives on the wire.
///
/// Every field is already format-checked by its field type during
/// deserialization. Presence is checked by [`ReceiptSubmission::into_draft`]
/// and the structural validator.
///
/// ## Wire Format
/// ```json
/// {
///   "retailer": "Target",
///   "purchaseDate": "2022-01-01",
///   "purchaseTime": "13:01",
///   "items": [{ "shortDescription": "Mountain Dew 12PK", "price": "6.49" }],
///   "total": "6.49"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReceiptSubmission {
    pub retailer: Option<Retailer>,
    pub purchase_date: Option<PurchaseDate>,
    pub purchase_time: Option<PurchaseTime>,
    pub items: Option<Vec<ItemSubmission>>,

    /// `None` when the key is missing or `null`.
    pub total: Option<Amount>,
}

impl ReceiptSubmission {
    /// Checks that `total` and every item `price` were supplied and builds a draft.
    ///
    /// ## Errors
    /// - [`CoreError::MissingTotal`] when `total` is absent
    /// - [`CoreError::MissingPrice`] for the first item without a price
    ///
    /// An explicit `"0.00"` is a present value and passes.
    pub fn into_draft(self) -> CoreResult<ReceiptDraft> {
        let total = self.total.ok_or(CoreError::MissingTotal)?.money();

        let items = match self.items {
            Some(items) => Some(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let price = item.price.ok_or(CoreError::MissingPrice { index })?;
                        Ok(ItemDraft {
                            short_description: item
                                .short_description
                                .map(ShortDescription::into_inner)
                                .unwrap_or_default(),
                            price: price.money(),
                        })
                    })
                    .collect::<CoreResult<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(ReceiptDraft {
            retailer: self
                .retailer
                .map(Retailer::into_inner)
                .unwrap_or_default(),
            purchase_date: self.purchase_date.map(|d| d.date()),
            purchase_time: self.purchase_time.map(|t| t.time()),
            items,
            total,
        })
    }
}

// =============================================================================
// Draft (assembled, not yet validated)
// =============================================================================

/// An item of a draft receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub short_description: String,
    pub price: Money,
}

/// A receipt assembled from a submission, waiting for structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDraft {
    /// Empty when the submission had no retailer.
    pub retailer: String,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_time: Option<NaiveTime>,
    pub items: Option<Vec<ItemDraft>>,
    pub total: Money,
}

impl ReceiptDraft {
    /// Validates the draft against `now` and turns it into a [`Receipt`].
    ///
    /// Every structural rule is checked; all violations are returned together
    /// in [`CoreError::InvalidReceipt`].
    pub fn into_receipt(self, now: DateTime<Utc>) -> CoreResult<Receipt> {
        let violations = validate_receipt(&self, now);
        if !violations.is_empty() {
            return Err(CoreError::InvalidReceipt { violations });
        }

        // The validator guarantees these are present.
        let (Some(purchase_date), Some(purchase_time), Some(items)) =
            (self.purchase_date, self.purchase_time, self.items)
        else {
            return Err(CoreError::InvalidReceipt {
                violations: Vec::new(),
            });
        };

        let items = items
            .into_iter()
            .map(|item| Item::new(item.short_description, item.price))
            .collect();

        Ok(Receipt::new(
            self.retailer,
            purchase_date,
            purchase_time,
            items,
            self.total,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn submission(value: serde_json::Value) -> ReceiptSubmission {
        serde_json::from_value(value).unwrap()
    }

    fn target_receipt_json() -> serde_json::Value {
        json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [
                { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
                { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
                { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
                { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
                { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
            ],
            "total": "35.35"
        })
    }

    #[test]
    fn test_submission_to_receipt() {
        let receipt = submission(target_receipt_json())
            .into_draft()
            .unwrap()
            .into_receipt(now())
            .unwrap();

        assert_eq!(receipt.retailer, "Target");
        assert_eq!(receipt.total, Money::from_cents(3535));
        assert_eq!(receipt.items.len(), 5);
        assert_eq!(receipt.items[4].short_description, "Klarbrunn 12-PK 12 FL OZ");
        assert_eq!(receipt.items[0].short_description, "Mountain Dew 12PK");
        assert!(Uuid::parse_str(&receipt.id).is_ok());
        assert_eq!(receipt.purchase_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(receipt.purchase_time, NaiveTime::from_hms_opt(13, 1, 0).unwrap());
    }

    #[test]
    fn test_missing_total_rejected() {
        let mut value = target_receipt_json();
        value.as_object_mut().unwrap().remove("total");

        let err = submission(value).into_draft().unwrap_err();
        assert_eq!(err, CoreError::MissingTotal);
    }

    #[test]
    fn test_null_total_counts_as_missing() {
        let mut value = target_receipt_json();
        value["total"] = json!(null);

        let err = submission(value).into_draft().unwrap_err();
        assert_eq!(err, CoreError::MissingTotal);
    }

    #[test]
    fn test_missing_price_rejected() {
        let mut value = target_receipt_json();
        value["items"][3].as_object_mut().unwrap().remove("price");

        let err = submission(value).into_draft().unwrap_err();
        assert_eq!(err, CoreError::MissingPrice { index: 3 });
    }

    #[test]
    fn test_zero_amounts_are_present() {
        let mut value = target_receipt_json();
        value["total"] = json!("0.00");
        value["items"][0]["price"] = json!("0.00");

        let draft = submission(value).into_draft().unwrap();
        assert_eq!(draft.total, Money::zero());
        assert_eq!(draft.items.unwrap()[0].price, Money::zero());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut value = target_receipt_json();
        value["cashier"] = json!("Bob");

        assert!(serde_json::from_value::<ReceiptSubmission>(value).is_err());
    }

    #[test]
    fn test_malformed_field_rejected() {
        let mut value = target_receipt_json();
        value["purchaseTime"] = json!("1:01 PM");

        let err = serde_json::from_value::<ReceiptSubmission>(value).unwrap_err();
        assert!(err.to_string().contains(&FieldError::InvalidTimeFormat.to_string()));
    }

    #[test]
    fn test_empty_items_fail_validation() {
        let mut value = target_receipt_json();
        value["items"] = json!([]);

        let err = submission(value)
            .into_draft()
            .unwrap()
            .into_receipt(now())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidReceipt { .. }));
    }

    #[test]
    fn test_missing_retailer_fails_validation() {
        let mut value = target_receipt_json();
        value.as_object_mut().unwrap().remove("retailer");

        let draft = submission(value).into_draft().unwrap();
        assert_eq!(draft.retailer, "");

        match draft.into_receipt(now()).unwrap_err() {
            CoreError::InvalidReceipt { violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field(), "retailer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
