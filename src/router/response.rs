// Uniform JSON envelope returned by every API route
//
// Success: 200 {"message": "OK", "<key>": payload}
// Failure: 500 {"message": "<what failed>: <why>"}
//
// Numan Thabit 2025 Nov

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Display;
use tracing::warn;

pub type ApiResult = Result<Envelope, ApiError>;

#[derive(Debug)]
pub struct Envelope {
    key: &'static str,
    payload: Value,
}

impl Envelope {
    pub fn ok<T: Serialize>(key: &'static str, payload: &T) -> ApiResult {
        let payload = serde_json::to_value(payload)
            .map_err(|e| ApiError::backend("Can't encode response", e))?;
        Ok(Self { key, payload })
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let mut body = Map::with_capacity(2);
        body.insert("message".to_string(), Value::from("OK"));
        body.insert(self.key.to_string(), self.payload);
        (StatusCode::OK, Json(Value::Object(body))).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A backend call failed; the cause is appended to `context`.
    pub fn backend(context: &str, err: impl Display) -> Self {
        let message = format!("{context}: {err}");
        warn!(error = %err, "{context}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    /// Request parameters could not be used. Reported as 500 like backend
    /// failures; existing clients only look at the message.
    pub fn input(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(reason = %message, "rejected request input");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "message": self.message })),
        )
            .into_response()
    }
}
