//! # HTTP Handlers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Request Handling                                   │
//! │                                                                         │
//! │  POST /receipts/process                                                │
//! │    bytes ──► read_json ──► ReceiptSubmission                           │
//! │          ──► into_draft (total / prices present)                       │
//! │          ──► into_receipt (structural rules)                           │
//! │          ──► ReceiptStore::insert ──► {"id": ...}                      │
//! │                                                                         │
//! │  GET /receipts/{id}/points                                             │
//! │    id ──► ReceiptStore::get ──► calculate_points ──► {"points": ...}   │
//! │                                                                         │
//! │  Every decode or validation failure is logged at debug level and       │
//! │  answered with the same 400 "The receipt is invalid".                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::Method,
    Json,
};
use chrono::{DateTime, Utc};
use reward_core::{calculate_points, CoreError, Receipt, ReceiptSubmission};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Environment;
use crate::error::ApiError;
use crate::json::{read_json, BodyError};
use crate::AppState;

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub environment: Environment,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub system_info: SystemInfo,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: i64,
}

// =============================================================================
// Submission Decoding
// =============================================================================

/// Why a submitted receipt was turned away.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Receipt(#[from] CoreError),
}

/// Decodes and validates a receipt body, stamping it as received at `now`.
pub fn decode_receipt(body: &[u8], now: DateTime<Utc>) -> Result<Receipt, SubmissionError> {
    let submission: ReceiptSubmission = read_json(body)?;
    let receipt = submission.into_draft()?.into_receipt(now)?;
    Ok(receipt)
}

/// Ids are opaque, but never empty and never contain whitespace.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.bytes().any(|b| b.is_ascii_whitespace())
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /healthcheck
pub async fn healthcheck(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "available",
        system_info: SystemInfo {
            environment: state.config.env,
            version: env!("CARGO_PKG_VERSION"),
        },
    })
}

/// POST /receipts/process
pub async fn process_receipt(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let receipt = body
        .map_err(|rejection| SubmissionError::from(BodyError::from(rejection)))
        .and_then(|body| decode_receipt(&body, Utc::now()))
        .map_err(|e| {
            debug!(error = %e, "Rejected receipt");
            ApiError::invalid_receipt()
        })?;

    let id = receipt.id.clone();
    state.receipts.insert(receipt)?;

    info!(id = %id, "Receipt processed");
    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/{id}/points
pub async fn get_points(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<PointsResponse>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::receipt_not_found());
    };

    if !is_valid_id(&id) {
        debug!(id = %id, "Rejected malformed receipt id");
        return Err(ApiError::receipt_not_found());
    }

    let receipt = state.receipts.get(&id)?;
    let points = calculate_points(&receipt);

    debug!(id = %id, points, "Points calculated");
    Ok(Json(PointsResponse { points }))
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::route_not_found()
}

/// Fallback for known paths hit with the wrong method.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("7fb1377b-b223-49d9-a31a-5a02701dd310"));
        assert!(is_valid_id("anything-without-spaces"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("has space"));
        assert!(!is_valid_id("tab\there"));
    }

    #[test]
    fn test_decode_receipt_ok() {
        let body = br#"{
            "retailer": "Retailer123",
            "purchaseDate": "2024-03-13",
            "purchaseTime": "15:00",
            "items": [
                {"shortDescription": "Milk", "price": "2.50"},
                {"shortDescription": "Bread", "price": "1.50"}
            ],
            "total": "100.00"
        }"#;

        let receipt = decode_receipt(body, now()).unwrap();
        assert_eq!(receipt.retailer, "Retailer123");
        assert_eq!(calculate_points(&receipt), 107);
    }

    #[test]
    fn test_decode_receipt_failures() {
        let missing_total = br#"{
            "retailer": "Target", "purchaseDate": "2022-01-01", "purchaseTime": "13:01",
            "items": [{"shortDescription": "Pepsi", "price": "1.25"}]
        }"#;
        assert!(matches!(
            decode_receipt(missing_total, now()),
            Err(SubmissionError::Receipt(CoreError::MissingTotal))
        ));

        let empty_items = br#"{
            "retailer": "Target", "purchaseDate": "2022-01-01", "purchaseTime": "13:01",
            "items": [], "total": "1.25"
        }"#;
        assert!(matches!(
            decode_receipt(empty_items, now()),
            Err(SubmissionError::Receipt(CoreError::InvalidReceipt { .. }))
        ));

        assert!(matches!(
            decode_receipt(b"", now()),
            Err(SubmissionError::Body(BodyError::Empty))
        ));
    }
}
