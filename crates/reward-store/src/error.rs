//! # Store Error Types
//!
//! Error types for receipt store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ├── NotFound on points query  ──► 404 "No receipt found"          │
//! │       │                                                                 │
//! │       └── Duplicate / LockPoisoned  ──► 500 (should never happen)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Receipt store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No receipt with this id.
    ///
    /// ## When This Occurs
    /// - `get`, `update` or `delete` with an unknown id
    /// - The receipt was already deleted
    #[error("record not found: {id}")]
    NotFound { id: String },

    /// A receipt with this id already exists.
    ///
    /// Ids are fresh UUIDs, so this signals a programming error rather than
    /// bad input.
    #[error("record with same ID exist: {id}")]
    Duplicate { id: String },

    /// A writer panicked while holding the lock.
    #[error("receipt store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Creates a NotFound error for the given id.
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    /// Creates a Duplicate error for the given id.
    pub fn duplicate(id: impl Into<String>) -> Self {
        StoreError::Duplicate { id: id.into() }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
