// Price feed passthrough
// Fetches the configured BTC price endpoint and hands the body back untouched
//
// Numan Thabit 2025 Nov

use crate::errors::GatewayError;
use crate::metrics::{REQ_ERRORS, REQ_LATENCY};
use bytes::Bytes;
use reqwest::Client;
use url::Url;

/// Upstream body plus the content type it was served with.
#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct PriceFeed {
    http: Client,
    url: Url,
}

impl PriceFeed {
    pub fn new(url: Url) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| GatewayError::Transport(format!("build http client: {e}")))?;
        Ok(Self { http, url })
    }

    pub fn endpoint(&self) -> &Url {
        &self.url
    }

    pub async fn fetch(&self) -> Result<PriceQuote, GatewayError> {
        let _timer = REQ_LATENCY
            .with_label_values(&["pricefeed", "get"])
            .start_timer();
        let outcome = self.get().await;
        if outcome.is_err() {
            REQ_ERRORS.with_label_values(&["pricefeed", "get"]).inc();
        }
        outcome
    }

    async fn get(&self) -> Result<PriceQuote, GatewayError> {
        let resp = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("price feed send: {e}")))?;
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(format!("price feed read: {e}")))?;
        Ok(PriceQuote { content_type, body })
    }
}
