// Token signing module
// This file handles HS256 sign-in tokens: issuing a two-hour token for a
// user and classifying why a presented token is rejected
//
// Numan Thabit 2025 Nov

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::config::{expand_path, JwtConfig};
use crate::errors::TokenError;

pub const TOKEN_LIFETIME: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user: String,
    pub exp: u64,
}

impl Claims {
    /// Claims for `user` expiring `TOKEN_LIFETIME` from now.
    pub fn for_user(user: &str) -> Self {
        Self {
            user: user.to_string(),
            exp: jsonwebtoken::get_current_timestamp() + TOKEN_LIFETIME.as_secs(),
        }
    }
}

pub fn sign_claims(key: &[u8], claims: &Claims) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(key),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

pub fn sign_token(key: &[u8], user: &str) -> Result<String, TokenError> {
    sign_claims(key, &Claims::for_user(user))
}

pub fn validate_token(key: &[u8], token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_nbf = true;
    match decode::<Claims>(token, &DecodingKey::from_secret(key), &validation) {
        Ok(data) => Ok(data.claims),
        Err(err) => Err(classify(err.kind())),
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            TokenError::Malformed
        }
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => TokenError::NotActive,
        other => TokenError::Other(format!("{other:?}")),
    }
}

pub fn read_key(path: &Path) -> Result<Vec<u8>, TokenError> {
    std::fs::read(path).map_err(|source| TokenError::KeyFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Login backend: the configured user, their password and the signing key.
#[derive(Clone)]
pub struct JwtAuth {
    key: Vec<u8>,
    username: String,
    password: String,
}

impl JwtAuth {
    pub fn new(key: Vec<u8>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            key,
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(conf: &JwtConfig) -> Result<Self, TokenError> {
        let key = read_key(&expand_path(&conf.key_file))?;
        Ok(Self::new(key, &conf.username, &conf.password))
    }

    /// Issue a token when the credentials match the configured user.
    pub fn login(&self, username: &str, password: &str) -> Result<String, TokenError> {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        if !bool::from(user_ok & pass_ok) {
            debug!(user = %username, "rejected login");
            return Err(TokenError::Credentials);
        }
        sign_token(&self.key, username)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        validate_token(&self.key, token)
    }
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
