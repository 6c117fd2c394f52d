//! # Repository Module
//!
//! Storage repositories for the reward points service.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.receipts.get(&id)                                       │
//! │       ▼                                                                 │
//! │  ReceiptStore                                                          │
//! │  ├── insert(&self, receipt)                                            │
//! │  ├── get(&self, id)                                                    │
//! │  ├── update(&self, receipt)                                            │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HashMap behind an RwLock (process memory only)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ReceiptStore`](receipt::ReceiptStore) - Receipt CRUD

pub mod receipt;
