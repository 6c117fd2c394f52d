//! # Validation Module
//!
//! Structural validation of an assembled receipt.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field parsing (fields.rs)                                    │
//! │  ├── Wire format of each value (patterns, calendar, amounts)           │
//! │  └── Runs during deserialization                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Presence of price / total (ReceiptSubmission::into_draft)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE: cross-field structural rules                    │
//! │  ├── Every rule is evaluated, nothing short-circuits                   │
//! │  └── Each failure adds one named ValidationError                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The boundary only cares whether the set is empty. The individual entries
//! exist for logging and tests.

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ValidationError;
use crate::types::ReceiptDraft;
use crate::MAX_RETAILER_BYTES;

// =============================================================================
// Validator
// =============================================================================

/// Accumulates validation failures.
///
/// ## Example
/// ```rust
/// use reward_core::validation::Validator;
/// use reward_core::ValidationError;
///
/// let mut v = Validator::new();
/// v.check(1 + 1 == 2, || ValidationError::Required { field: "a".into() });
/// v.check(false, || ValidationError::Required { field: "b".into() });
///
/// assert!(!v.is_valid());
/// assert_eq!(v.into_errors()[0].field(), "b");
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn new() -> Self {
        Validator::default()
    }

    /// Records the error built by `error` unless `ok` holds.
    pub fn check(&mut self, ok: bool, error: impl FnOnce() -> ValidationError) {
        if !ok {
            self.errors.push(error());
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

// =============================================================================
// Receipt Rules
// =============================================================================

/// Checks every structural rule on a draft and returns all violations.
///
/// ## Rules
/// - retailer: non-empty, at most 500 bytes
/// - purchaseDate: present, its UTC midnight not after `now`
/// - purchaseTime: present
/// - items: present, at least one
/// - total: not negative
/// - each item: description non-empty, price not negative
///
/// An empty vector means the draft is valid.
pub fn validate_receipt(draft: &ReceiptDraft, now: DateTime<Utc>) -> Vec<ValidationError> {
    let mut v = Validator::new();

    v.check(!draft.retailer.is_empty(), || required("retailer"));
    v.check(draft.retailer.len() <= MAX_RETAILER_BYTES, || {
        ValidationError::TooLong {
            field: "retailer".to_string(),
            max: MAX_RETAILER_BYTES,
        }
    });

    v.check(draft.purchase_date.is_some(), || required("purchaseDate"));
    if let Some(date) = draft.purchase_date {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        v.check(midnight <= now, || ValidationError::InFuture {
            field: "purchaseDate".to_string(),
        });
    }

    v.check(draft.purchase_time.is_some(), || required("purchaseTime"));

    v.check(draft.items.is_some(), || required("items"));
    if let Some(items) = &draft.items {
        v.check(!items.is_empty(), || ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    v.check(!draft.total.is_negative(), || negative("total"));

    for (index, item) in draft.items.iter().flatten().enumerate() {
        v.check(!item.short_description.is_empty(), || {
            required(&format!("items[{index}].shortDescription"))
        });
        v.check(!item.price.is_negative(), || {
            negative(&format!("items[{index}].price"))
        });
    }

    v.into_errors()
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn negative(field: &str) -> ValidationError {
    ValidationError::Negative {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
