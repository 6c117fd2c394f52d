//! # Router
//!
//! ## Layer Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Request Path (outermost first)                         │
//! │                                                                         │
//! │  TraceLayer ──► CatchPanicLayer ──► TimeoutLayer ──► rate_limit        │
//! │       ──► DefaultBodyLimit ──► routes / fallbacks                      │
//! │                                                                         │
//! │  GET  /healthcheck              ──► healthcheck                        │
//! │  POST /receipts/process         ──► process_receipt                    │
//! │  GET  /receipts/{id}/points     ──► get_points                         │
//! │  *    (unknown path)            ──► 404                                │
//! │  *    (known path, bad method)  ──► 405                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::handlers::{get_points, healthcheck, method_not_allowed, not_found, process_receipt};
use crate::json::MAX_BODY_BYTES;
use crate::middleware::{handle_panic, rate_limit};
use crate::AppState;

/// Builds the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/{id}/points", get(get_points))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(timeout_layer(timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answers 408 when a request outlives `timeout`.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
