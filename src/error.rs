// SPDX-License-Identifier: GPL-3.0-only

//! Error types shared by every layer of the crate.
//!
//! Payloads are kept as strings so a single failure can be cloned and handed
//! to every caller waiting on the same de-duplicated request.

use thiserror::Error;

/// The main error type for Dexplorer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} while requesting {url}")]
    Http { status: u16, url: String },

    /// The requested resource does not exist upstream.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The response body could not be mapped to the expected record.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration is invalid or could not be read/written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem operation failed.
    #[error("IO error: {0}")]
    Io(String),

    /// Every retry attempt for a query failed.
    #[error("Query {key} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        key: String,
        attempts: u32,
        last: Box<DexError>,
    },
}

impl DexError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            DexError::Network(_) => true,
            DexError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return DexError::Decode(err.to_string());
        }

        match err.status() {
            Some(status) => DexError::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => DexError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DexError {
    fn from(err: serde_json::Error) -> Self {
        DexError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for DexError {
    fn from(err: std::io::Error) -> Self {
        DexError::Io(err.to_string())
    }
}

/// A specialized `Result` type for Dexplorer operations.
pub type Result<T> = std::result::Result<T, DexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_and_rate_limits_are_retryable() {
        let server = DexError::Http {
            status: 503,
            url: "https://pokeapi.co/api/v2/pokemon/1".to_string(),
        };
        let limited = DexError::Http {
            status: 429,
            url: String::new(),
        };
        assert!(server.is_retryable());
        assert!(limited.is_retryable());
        assert!(DexError::Network("connection reset".to_string()).is_retryable());
    }

    #[test]
    fn client_side_failures_are_not_retried() {
        assert!(!DexError::NotFound("pokemon/missingno".to_string()).is_retryable());
        assert!(!DexError::Decode("missing field `id`".to_string()).is_retryable());
        assert!(
            !DexError::Http {
                status: 400,
                url: String::new()
            }
            .is_retryable()
        );
    }

    #[test]
    fn exhausted_retries_mention_the_last_failure() {
        let err = DexError::RetriesExhausted {
            key: "pokemon/bulbasaur".to_string(),
            attempts: 4,
            last: Box::new(DexError::Network("timed out".to_string())),
        };
        let message = err.to_string();
        assert!(message.contains("pokemon/bulbasaur"));
        assert!(message.contains("4 attempts"));
        assert!(message.contains("timed out"));
    }
}
