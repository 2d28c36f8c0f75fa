// Sign-in route
//
// A `JWT` header is validated; otherwise the form credentials are checked
// and a fresh token is issued.
//
// Numan Thabit 2025 Nov

use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    routing::post,
    Form, Router as AxumRouter,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::response::{ApiError, ApiResult, Envelope};
use crate::signing::JwtAuth;

pub(crate) const PATHS: &[&str] = &["POST /api/login"];

pub fn routes(auth: Arc<JwtAuth>) -> AxumRouter {
    AxumRouter::new()
        .route("/api/login", post(login))
        .with_state(auth)
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

async fn login(
    State(auth): State<Arc<JwtAuth>>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult {
    if let Some(token) = headers.get("JWT") {
        let token = token
            .to_str()
            .map_err(|_| ApiError::input("not a token"))?;
        let claims = auth
            .validate(token)
            .map_err(|e| ApiError::backend("Token rejected", e))?;
        debug!(user = %claims.user, "token validated");
        return Envelope::ok("status", &"valid");
    }

    let Form(form) = form.map_err(|e| ApiError::input(format!("Can't read form: {e}")))?;
    let token = auth
        .login(&form.username, &form.password)
        .map_err(|e| ApiError::backend("Login failed", e))?;
    Envelope::ok("token", &token)
}
