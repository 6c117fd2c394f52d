//! # Middleware
//!
//! Per-client rate limiting and panic recovery.
//!
//! ## Token Bucket
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Per-IP Token Bucket                                 │
//! │                                                                         │
//! │  request from 10.0.0.7                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Mutex<HashMap<IpAddr, Bucket>>                                        │
//! │       │                                                                 │
//! │       ├── refill: tokens = min(burst, tokens + elapsed × rps)          │
//! │       │                                                                 │
//! │       ├── tokens ≥ 1 ──► take one, pass request on                     │
//! │       │                                                                 │
//! │       └── tokens < 1 ──► 429 "rate limit exceeded"                     │
//! │                                                                         │
//! │  Pruner task (every 1 min): drop clients idle for more than 3 min      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{rejection::ExtensionRejection, ConnectInfo, Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, Instant};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Constants
// =============================================================================

/// How often idle clients are swept.
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Clients unseen for longer than this are forgotten.
pub const CLIENT_IDLE_TIMEOUT: Duration = Duration::from_secs(180);

// =============================================================================
// Rate Limiter
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    last_seen: Instant,
}

/// Token-bucket rate limiter keyed by client IP.
#[derive(Debug)]
pub struct RateLimiter {
    rps: f64,
    burst: f64,
    clients: Mutex<HashMap<IpAddr, Bucket>>,
}

impl RateLimiter {
    pub fn new(rps: f64, burst: u32) -> Self {
        RateLimiter {
            rps,
            burst: f64::from(burst),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Takes one token for `ip`, returning false when its bucket is empty.
    pub fn allow(&self, ip: IpAddr) -> bool {
        self.allow_at(ip, Instant::now())
    }

    fn allow_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut clients = self.lock();

        let bucket = clients.entry(ip).or_insert(Bucket {
            tokens: self.burst,
            last_seen: now,
        });

        let elapsed = now.saturating_duration_since(bucket.last_seen).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.rps).min(self.burst);
        bucket.last_seen = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Forgets clients idle for longer than `max_idle`. Returns how many were dropped.
    pub fn prune(&self, max_idle: Duration) -> usize {
        self.prune_at(max_idle, Instant::now())
    }

    fn prune_at(&self, max_idle: Duration, now: Instant) -> usize {
        let mut clients = self.lock();
        let before = clients.len();
        clients.retain(|_, bucket| now.saturating_duration_since(bucket.last_seen) <= max_idle);
        before - clients.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    /// Spawns the background sweep of idle clients.
    pub fn spawn_pruner(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(PRUNE_INTERVAL);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let dropped = self.prune(CLIENT_IDLE_TIMEOUT);
                if dropped > 0 {
                    debug!(dropped, "Pruned idle rate limiter clients");
                }
            }
        })
    }

    // A poisoned map still holds valid counters.
    fn lock(&self) -> MutexGuard<'_, HashMap<IpAddr, Bucket>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Rejects clients that exceed their request budget.
///
/// Needs the peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    peer: Result<ConnectInfo<SocketAddr>, ExtensionRejection>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.limiter.enabled {
        return next.run(request).await;
    }

    let Ok(ConnectInfo(addr)) = peer else {
        return ApiError::Internal("peer address unavailable for rate limiting".to_string())
            .into_response();
    };

    if !state.limiter.allow(addr.ip()) {
        warn!(ip = %addr.ip(), path = %request.uri().path(), "Rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }

    next.run(request).await
}

// =============================================================================
// Panic Recovery
// =============================================================================

/// Turns a handler panic into the generic 500 and closes the connection.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    let mut response = ApiError::Internal(format!("handler panicked: {detail}")).into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}
