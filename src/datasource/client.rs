use crate::database::enums::Resolution;
use crate::datasource::models::{
    ApiResponse, CandleList, CandlePayload, ErrorPayload, MarketInstrument, MarketInstrumentList,
};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the market-data API
///
/// Only `RateLimited` and `Unexpected` are recovered by the jobs; every
/// other variant propagates and aborts the run.
#[derive(Debug, Error)]
pub enum DatasourceError {
    /// HTTP 429 - recovered with a fixed pause and retry of the same unit
    #[error("rate limit exceeded")]
    RateLimited,

    /// HTTP 5xx - the failing unit is recorded and skipped for this run
    #[error("unexpected API error: {0}")]
    Unexpected(String),

    /// Any other non-success status (bad request, auth failure, ...)
    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport failure or malformed response body
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Market-data API seam consumed by the sync jobs
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Fetch the complete current tradable-instrument list
    async fn list_stocks(&self) -> Result<Vec<MarketInstrument>, DatasourceError>;

    /// Fetch OHLC candles for one instrument over a bounded time range
    async fn get_candles(
        &self,
        figi: &str,
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
        resolution: Resolution,
    ) -> Result<Vec<CandlePayload>, DatasourceError>;
}

/// reqwest implementation speaking the broker's OpenAPI REST surface
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RestClient {
    /// Create a new client for the given REST base and bearer token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Map non-success statuses onto the error taxonomy
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DatasourceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DatasourceError::RateLimited);
        }

        // Error envelopes carry {"payload": {"message", "code"}}; fall back
        // to the bare status when the body is not parseable.
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiResponse<ErrorPayload>>(&body).ok())
            .map(|envelope| envelope.payload.message)
            .unwrap_or_else(|| "no error payload".to_string());

        if status.is_server_error() {
            Err(DatasourceError::Unexpected(message))
        } else {
            Err(DatasourceError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl MarketDataApi for RestClient {
    async fn list_stocks(&self) -> Result<Vec<MarketInstrument>, DatasourceError> {
        let url = format!("{}/market/stocks", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let envelope: ApiResponse<MarketInstrumentList> =
            Self::check_status(response).await?.json().await?;

        tracing::debug!(
            total = envelope.payload.instruments.len(),
            "Fetched instrument list"
        );

        Ok(envelope.payload.instruments)
    }

    async fn get_candles(
        &self,
        figi: &str,
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
        resolution: Resolution,
    ) -> Result<Vec<CandlePayload>, DatasourceError> {
        let url = format!("{}/market/candles", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("figi", figi),
                ("from", &from.to_rfc3339()),
                ("to", &to.to_rfc3339()),
                ("interval", resolution.as_str()),
            ])
            .send()
            .await?;

        let envelope: ApiResponse<CandleList> =
            Self::check_status(response).await?.json().await?;

        Ok(envelope.payload.candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = RestClient::new("https://example.test/openapi/", "token");
        assert_eq!(client.base_url, "https://example.test/openapi");
    }
}
