// Library root module for lncm-gateway
// This file defines the public API and module structure for the gateway:
// backend clients, the HTTP dispatch layer and shared plumbing
//
// Numan Thabit 2025 Nov

pub mod bitcoind;
pub mod config;
pub mod errors;
pub mod lnd;
pub mod metrics;
pub mod probe;
pub mod router;
pub mod sensors;
pub mod signing;
pub mod transport;
