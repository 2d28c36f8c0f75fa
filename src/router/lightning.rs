// Lightning and price feed routes
//
// Numan Thabit 2025 Nov

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router as AxumRouter,
};
use std::sync::Arc;

use super::response::{ApiError, ApiResult, Envelope};
use crate::lnd::LndClient;
use crate::transport::pricefeed::PriceFeed;

pub(crate) const LND_PATHS: &[&str] = &["GET /api/lnd/info"];
pub(crate) const PRICE_PATHS: &[&str] = &["GET /api/btcprice"];

pub fn lnd_routes(lnd: LndClient) -> AxumRouter {
    AxumRouter::new()
        .route("/api/lnd/info", get(node_info))
        .with_state(lnd)
}

pub fn price_routes(feed: Arc<PriceFeed>) -> AxumRouter {
    AxumRouter::new()
        .route("/api/btcprice", get(btc_price))
        .with_state(feed)
}

async fn node_info(State(lnd): State<LndClient>) -> ApiResult {
    let info = lnd
        .info()
        .await
        .map_err(|e| ApiError::backend("Can't get lightning node info", e))?;
    Envelope::ok("info", &info)
}

/// Upstream body is passed through byte for byte.
async fn btc_price(State(feed): State<Arc<PriceFeed>>) -> Result<Response, ApiError> {
    let quote = feed
        .fetch()
        .await
        .map_err(|e| ApiError::backend("Can't fetch price feed", e))?;
    let content_type = quote
        .content_type
        .unwrap_or_else(|| "application/json".to_string());
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        quote.body,
    )
        .into_response())
}
