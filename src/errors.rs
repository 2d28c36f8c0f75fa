// Error types and error handling module
// This file defines the error types shared by the backend clients
// (bitcoind, lnd, price feed), the sysfs sensors and the token helper
//
// Numan Thabit 2025 Nov

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http status {0}")]
    Http(u16),
    #[error("bitcoind error ({code}): {message}")]
    Rpc { code: i64, message: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("can't connect to {endpoint}: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: Box<GatewayError>,
    },
    #[error("lightning error: {0}")]
    Lightning(String),
    #[error("config error: {0}")]
    Config(String),
}

impl GatewayError {
    /// True when the backend answered with an error object of its own.
    pub fn is_rpc(&self) -> bool {
        matches!(self, GatewayError::Rpc { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, GatewayError::Decode(_))
    }
}

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor file {} unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sensor file {} holds non-numeric value {value:?}", path.display())]
    Parse { path: PathBuf, value: String },
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("can't read key file {}: {source}", path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("can't sign token: {0}")]
    Signing(String),
    #[error("not a token")]
    Malformed,
    #[error("not active")]
    NotActive,
    #[error("unhandled token")]
    Other(String),
    #[error("invalid credentials")]
    Credentials,
}
