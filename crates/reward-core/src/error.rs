//! # Error Types
//!
//! Domain-specific error types for reward-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  reward-core errors (this file)                                        │
//! │  ├── FieldError       - A single wire field failed its format          │
//! │  ├── ValidationError  - One structural rule violated by a draft        │
//! │  └── CoreError        - Anything that stops a submission               │
//! │                                                                         │
//! │  reward-store errors (separate crate)                                  │
//! │  └── StoreError       - Not found / duplicate                          │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What the client sees                           │
//! │                                                                         │
//! │  Flow: FieldError/ValidationError → CoreError → ApiError (generic 400) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field and validation errors stay internal. The boundary collapses every one
//! of them into a single "invalid receipt" response.

use thiserror::Error;

// =============================================================================
// Field Error
// =============================================================================

/// A raw wire value did not match its field's format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid retailer format")]
    InvalidRetailerFormat,

    #[error("invalid shortDescription format")]
    InvalidDescriptionFormat,

    #[error("invalid purchaseDate format")]
    InvalidDateFormat,

    #[error("invalid purchaseTime format")]
    InvalidTimeFormat,

    #[error("invalid amount format")]
    InvalidAmountFormat,
}

// =============================================================================
// Validation Error
// =============================================================================

/// A structural rule violated by an assembled receipt.
///
/// The validator collects every violation rather than stopping at the first
/// one, so a single draft can produce several of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} must be provided")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must not be more than {max} bytes long")]
    TooLong { field: String, max: usize },

    /// A date lies after the processing time.
    #[error("{field} must not be in the future")]
    InFuture { field: String },

    /// A collection has no elements.
    #[error("{field} must contain at least 1 item")]
    Empty { field: String },

    /// A monetary value is below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InFuture { field }
            | ValidationError::Empty { field }
            | ValidationError::Negative { field } => field,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors that stop a receipt submission from becoming a [`Receipt`](crate::Receipt).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A field failed its wire format.
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// The submission has no `total`.
    #[error("total is missing")]
    MissingTotal,

    /// An item in the submission has no `price`.
    #[error("price is missing for item {index}")]
    MissingPrice { index: usize },

    /// The assembled receipt violates one or more structural rules.
    #[error("receipt is invalid: {} violation(s)", violations.len())]
    InvalidReceipt { violations: Vec<ValidationError> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for single-field parsing.
pub type FieldResult<T> = Result<T, FieldError>;

// =============================================================================
// Unit Tests
// =============================================================================
