//! Record source abstraction for loading the trade collection.

use crate::domain::TradeRecord;
use async_trait::async_trait;
use std::fmt;

pub mod http;
pub mod mock;

pub use http::HttpRecordSource;
pub use mock::{generate_mock_trades, MockConfig, MockRecordSource};

/// Read-only source of trade records.
///
/// There is no write side: all mutation happens on the in-memory store.
#[async_trait]
pub trait RecordSource: Send + Sync + fmt::Debug {
    /// Fetch every trade record the source knows about.
    ///
    /// # Returns
    /// Records in source order; callers sort for display.
    async fn fetch_trades(&self) -> Result<Vec<TradeRecord>, RecordSourceError>;
}

/// Error type for record source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSourceError {
    /// Network error (e.g., connection refused, DNS failure)
    NetworkError(String),
    /// Non-success HTTP status
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed record)
    ParseError(String),
}

impl fmt::Display for RecordSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RecordSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            RecordSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for RecordSourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_source_error_display() {
        let err = RecordSourceError::NetworkError("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = RecordSourceError::HttpError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 503: Service Unavailable");

        let err = RecordSourceError::ParseError("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Parse error: invalid JSON");
    }
}
