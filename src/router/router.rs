// Router HTTP API implementation
// This file assembles the API from whichever backends are enabled and
// applies the shared middleware
//
// Numan Thabit 2025 Nov

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeFile, trace::TraceLayer,
};

use super::{bitcoin, device, lightning, login};
use crate::bitcoind::BitcoindClient;
use crate::lnd::LndClient;
use crate::sensors::Sensors;
use crate::signing::JwtAuth;
use crate::transport::pricefeed::PriceFeed;

/// Backends the API is built from; a `None` backend registers no routes.
#[derive(Clone, Default)]
pub struct Backends {
    pub bitcoind: Option<Arc<BitcoindClient>>,
    pub lnd: Option<LndClient>,
    pub price_feed: Option<Arc<PriceFeed>>,
    pub sensors: Option<Arc<Sensors>>,
    pub auth: Option<Arc<JwtAuth>>,
    /// index.html served at `/`
    pub static_index: Option<PathBuf>,
}

/// Create the HTTP router with API endpoints
pub fn create_api_router(backends: Backends) -> AxumRouter {
    let mut paths: Vec<&'static str> =
        vec!["GET /api", "GET /api/", "GET /api/info", "GET /metrics"];
    let mut app = AxumRouter::new()
        .route("/api/info", get(info))
        .route("/metrics", get(metrics));

    if let Some(btc) = backends.bitcoind {
        app = app.merge(bitcoin::routes(btc));
        paths.extend_from_slice(bitcoin::PATHS);
    }
    if let Some(lnd) = backends.lnd {
        app = app.merge(lightning::lnd_routes(lnd));
        paths.extend_from_slice(lightning::LND_PATHS);
    }
    if let Some(feed) = backends.price_feed {
        app = app.merge(lightning::price_routes(feed));
        paths.extend_from_slice(lightning::PRICE_PATHS);
    }
    if let Some(sensors) = backends.sensors {
        app = app.merge(device::routes(sensors));
        paths.extend_from_slice(device::PATHS);
    }
    if let Some(auth) = backends.auth {
        app = app.merge(login::routes(auth));
        paths.extend_from_slice(login::PATHS);
    }
    if let Some(index) = backends.static_index {
        app = app.route_service("/", ServeFile::new(index));
        paths.push("GET /");
    }

    let index = AxumRouter::new()
        .route("/api", get(list_routes))
        .route("/api/", get(list_routes))
        .with_state(Arc::new(paths));

    app.merge(index)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Liveness check
async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "pong" }))
}

async fn list_routes(State(paths): State<Arc<Vec<&'static str>>>) -> Json<Vec<&'static str>> {
    Json(paths.as_ref().clone())
}

async fn metrics() -> Response {
    match crate::metrics::render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
