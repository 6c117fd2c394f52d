//! # reward-store: Receipt Storage for Reward Points
//!
//! This crate stores submitted receipts for later points queries. Storage is
//! volatile: the store starts empty and is discarded when the process exits.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Reward Points Data Flow                            │
//! │                                                                         │
//! │  POST /receipts/process        GET /receipts/{id}/points               │
//! │       │                               │                                 │
//! │       ▼                               ▼                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  reward-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │     insert(receipt)                 get(id) ──► Arc<Receipt>    │   │
//! │  │                                                                 │   │
//! │  │            RwLock<HashMap<String, Arc<Receipt>>>                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::receipt::ReceiptStore;
