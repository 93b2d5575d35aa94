//! HTTP record source reading `GET {base_url}/api/trades`.

use super::{RecordSource, RecordSourceError};
use crate::domain::TradeRecord;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Record source backed by the trades endpoint. No retry or timeout policy.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
}

impl HttpRecordSource {
    /// Create a new HTTP record source.
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn trades_url(&self) -> String {
        format!("{}/api/trades", self.base_url)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_trades(&self) -> Result<Vec<TradeRecord>, RecordSourceError> {
        let url = self.trades_url();
        debug!("Fetching trades from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RecordSourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecordSourceError::HttpError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string(),
            });
        }

        response
            .json::<Vec<TradeRecord>>()
            .await
            .map_err(|e| RecordSourceError::ParseError(e.to_string()))
    }
}
