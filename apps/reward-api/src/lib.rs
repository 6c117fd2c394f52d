//! # Reward API
//!
//! HTTP server that accepts purchase receipts and reports the reward points
//! each one earns.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Reward API Server                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Middleware: trace · catch panic · timeout · per-IP rate limit   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                │                                        │
//! │  ┌────────────────┐  ┌─────────┴──────┐  ┌────────────────────────────┐│
//! │  │  healthcheck   │  │ process_receipt│  │  get_points                ││
//! │  │                │  │                │  │                            ││
//! │  │ • status       │  │ • read_json    │  │ • id check                 ││
//! │  │ • environment  │  │ • validate     │  │ • store lookup             ││
//! │  │ • version      │  │ • store insert │  │ • calculate_points         ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                │                                        │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState: ApiConfig · ReceiptStore · RateLimiter                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - Listen port (default: 4000)
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0)
//! - `APP_ENV` - development | staging | production (default: development)
//! - `LIMITER_ENABLED` - Per-IP rate limiting (default: true)
//! - `LIMITER_RPS` - Token refill rate (default: 2)
//! - `LIMITER_BURST` - Bucket capacity (default: 4)
//! - `REQUEST_TIMEOUT_SECS` - Per-request deadline (default: 10)

use std::sync::Arc;

use reward_store::ReceiptStore;

pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod middleware;
pub mod routes;

// Re-exports
pub use config::{ApiConfig, ConfigError, Environment, LimiterConfig};
pub use error::ApiError;
pub use middleware::RateLimiter;
pub use routes::create_router;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub config: ApiConfig,
    pub receipts: ReceiptStore,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.limiter.rps, config.limiter.burst));
        AppState {
            config,
            receipts: ReceiptStore::new(),
            limiter,
        }
    }
}
