// JSON-RPC transport layer implementation
// This file implements the JSON-RPC 1.0 client used to talk to bitcoind
// over HTTP with basic authentication
//
// Numan Thabit 2025 Nov

use crate::errors::GatewayError;
use crate::metrics::{REQ_ERRORS, REQ_LATENCY};
use reqwest::header::{CONNECTION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

const JSONRPC_VERSION: &str = "1.0";

/// A node call with a fixed method name, typed output and positional params.
pub trait RpcMethod {
    const NAME: &'static str;
    type Output: DeserializeOwned;

    /// Parameters in the order the node expects them.
    fn params(&self) -> Vec<Value> {
        Vec::new()
    }
}

#[derive(Debug, Serialize)]
struct RequestEnvelope<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a [Value],
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    result: Option<Box<RawValue>>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct JsonRpc {
    http: Client,
    url: String,
    user: String,
    pass: String,
}

impl JsonRpc {
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        // One request per connection, nothing pooled between calls.
        let http = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| GatewayError::Transport(format!("build http client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            user: user.into(),
            pass: pass.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// Call `request` and decode its result into the method's output type.
    pub async fn call<M: RpcMethod>(&self, request: &M) -> Result<M::Output, GatewayError> {
        let raw = self.call_raw(M::NAME, &request.params()).await?;
        serde_json::from_str(raw.get()).map_err(|e| {
            REQ_ERRORS.with_label_values(&["bitcoind", M::NAME]).inc();
            GatewayError::Decode(format!("{} result: {e}", M::NAME))
        })
    }

    /// Perform one round trip and hand back the still-undecoded result.
    pub async fn call_raw(
        &self,
        method: &str,
        params: &[Value],
    ) -> Result<Box<RawValue>, GatewayError> {
        let _timer = REQ_LATENCY
            .with_label_values(&["bitcoind", method])
            .start_timer();
        let outcome = self.round_trip(method, params).await;
        if outcome.is_err() {
            REQ_ERRORS.with_label_values(&["bitcoind", method]).inc();
        }
        outcome
    }

    async fn round_trip(
        &self,
        method: &str,
        params: &[Value],
    ) -> Result<Box<RawValue>, GatewayError> {
        let payload = RequestEnvelope {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        };
        let resp = self
            .http
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.pass))
            .header(CONTENT_TYPE, "application/json")
            .header(CONNECTION, "close")
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("jsonrpc send: {e}")))?;

        // bitcoind reports RPC failures with a non-2xx status and a JSON body,
        // so the body is inspected before the status.
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(format!("jsonrpc read: {e}")))?;

        let envelope: ResponseEnvelope = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(GatewayError::Http(status.as_u16())),
            Err(e) => return Err(GatewayError::Decode(format!("{method} response: {e}"))),
        };

        if let Some(err) = envelope.error {
            return Err(GatewayError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        match envelope.result {
            Some(raw) => Ok(raw),
            None => RawValue::from_string("null".to_string())
                .map_err(|e| GatewayError::Decode(e.to_string())),
        }
    }
}
