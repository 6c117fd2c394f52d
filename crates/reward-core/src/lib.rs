//! # reward-core: Pure Business Logic for Reward Points
//!
//! This crate is the **heart** of the reward points service. It contains the
//! receipt model, the wire-format field parsers, the structural validator and
//! the points rules, all as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reward Points Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    reward-api (axum)                            │   │
//! │  │    POST /receipts/process   GET /receipts/{id}/points          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ reward-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  fields   │  │   types   │  │validation │  │  points   │  │   │
//! │  │   │ per-field │─►│  Receipt  │─►│ structural│─►│ six rules │  │   │
//! │  │   │  parsing  │  │   Item    │  │  checks   │  │   → i64   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 reward-store (Receipt Store)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`fields`] - Wire-format parsers for individual receipt fields
//! - [`types`] - Receipt, Item and the submission/draft input types
//! - [`validation`] - Structural receipt validation
//! - [`points`] - The points calculator
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use reward_core::{calculate_points, Item, Money, Receipt};
//!
//! let receipt = Receipt::new(
//!     "Retailer123",
//!     NaiveDate::from_ymd_opt(2024, 12, 13).unwrap(),
//!     NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
//!     vec![
//!         Item::new("Milk", Money::from_cents(250)),
//!         Item::new("Bread", Money::from_cents(150)),
//!     ],
//!     Money::from_cents(10000),
//! );
//!
//! assert_eq!(calculate_points(&receipt), 107);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fields;
pub mod money;
pub mod points;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldError, ValidationError};
pub use money::Money;
pub use points::{calculate_points, PointsBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum retailer name length in bytes.
pub const MAX_RETAILER_BYTES: usize = 500;
