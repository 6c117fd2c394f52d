//! # Request Body Decoding
//!
//! Strict JSON decoding for request bodies.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Body Checks                                     │
//! │                                                                         │
//! │  bytes ──► size ≤ 1 MiB ──► not blank ──► one JSON value ──► T         │
//! │              │                 │              │                         │
//! │              ▼                 ▼              ▼                         │
//! │          TooLarge            Empty      Syntax / UnexpectedEof /        │
//! │                                         Data / TrailingData             │
//! │                                                                         │
//! │  Unknown keys and wrong types surface as Data through the target       │
//! │  type's serde attributes.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Reasons a request body was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyError {
    #[error("body must not be empty")]
    Empty,

    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },

    #[error("body contains badly-formed JSON (at line {line}, column {column})")]
    Syntax { line: usize, column: usize },

    #[error("body contains badly-formed JSON")]
    UnexpectedEof,

    #[error("body contains invalid data: {0}")]
    Data(String),

    #[error("body must only contain a single JSON value")]
    TrailingData,

    #[error("failed to read body: {0}")]
    Read(String),
}

impl From<serde_json::Error> for BodyError {
    fn from(error: serde_json::Error) -> Self {
        match error.classify() {
            Category::Syntax => BodyError::Syntax {
                line: error.line(),
                column: error.column(),
            },
            Category::Eof => BodyError::UnexpectedEof,
            Category::Data => BodyError::Data(error.to_string()),
            Category::Io => BodyError::Read(error.to_string()),
        }
    }
}

impl From<BytesRejection> for BodyError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            BodyError::TooLarge {
                limit: MAX_BODY_BYTES,
            }
        } else {
            BodyError::Read(rejection.body_text())
        }
    }
}

/// Decodes exactly one JSON value of type `T` from `body`.
pub fn read_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, BodyError> {
    if body.len() > MAX_BODY_BYTES {
        return Err(BodyError::TooLarge {
            limit: MAX_BODY_BYTES,
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyError::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let value = T::deserialize(&mut de)?;

    // Anything but whitespace after the first value is a second value
    de.end().map_err(|_| BodyError::TrailingData)?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Probe {
        name: String,
    }

    #[test]
    fn test_read_json_ok() {
        let probe: Probe = read_json(b"  {\"name\": \"Target\"}\n").unwrap();
        assert_eq!(probe.name, "Target");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(read_json::<Probe>(b""), Err(BodyError::Empty));
        assert_eq!(read_json::<Probe>(b" \r\n\t"), Err(BodyError::Empty));
    }

    #[test]
    fn test_badly_formed() {
        assert!(matches!(
            read_json::<Probe>(b"{\"name\" \"x\"}"),
            Err(BodyError::Syntax { line: 1, .. })
        ));
        assert_eq!(
            read_json::<Probe>(b"{\"name\": \"x\""),
            Err(BodyError::UnexpectedEof)
        );
    }

    #[test]
    fn test_unknown_key_and_wrong_type() {
        let unknown = read_json::<Probe>(b"{\"name\": \"x\", \"extra\": 1}");
        assert!(matches!(unknown, Err(BodyError::Data(msg)) if msg.contains("extra")));

        let wrong = read_json::<Probe>(b"{\"name\": 7}");
        assert!(matches!(wrong, Err(BodyError::Data(_))));
    }

    #[test]
    fn test_trailing_value() {
        assert_eq!(
            read_json::<Probe>(b"{\"name\": \"a\"}{\"name\": \"b\"}"),
            Err(BodyError::TrailingData)
        );
        assert_eq!(
            read_json::<Probe>(b"{\"name\": \"a\"} x"),
            Err(BodyError::TrailingData)
        );
    }

    #[test]
    fn test_too_large() {
        let body = vec![b' '; MAX_BODY_BYTES + 1];
        assert_eq!(
            read_json::<Probe>(&body),
            Err(BodyError::TooLarge {
                limit: MAX_BODY_BYTES
            })
        );
    }
}
