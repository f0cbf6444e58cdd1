//! Bearer-token to user-id resolution against the hosted backend.
//!
//! The backend exposes `GET {BACKEND_URL}/auth/v1/user`, which answers with the
//! signed-in user for a valid access token and 401 otherwise.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

const USER_PATH: &str = "/auth/v1/user";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth backend error (status {status}): {message}")]
    Backend { status: u16, message: String },
}

/// Who, if anyone, a token belongs to.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` for an invalid or expired token.
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AuthError>;
}

#[derive(Debug, Deserialize)]
struct BackendUser {
    id: Uuid,
}

#[derive(Clone)]
pub struct BackendAuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl BackendAuthClient {
    pub fn new(base_url: &str, anon_key: String) -> Result<Self, AuthError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

#[async_trait]
impl SessionResolver for BackendAuthClient {
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AuthError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, USER_PATH))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("Auth backend rejected token ({status})");
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Auth backend returned {status}: {message}");
            return Err(AuthError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let user: BackendUser = response.json().await?;
        Ok(Some(user.id))
    }
}

/// Fixed token table. With no entries every request is anonymous, which is
/// what runs without a configured backend get.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionResolver {
    tokens: HashMap<String, Uuid>,
}

impl StaticSessionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_token(mut self, token: &str, user_id: Uuid) -> Self {
        self.tokens.insert(token.to_string(), user_id);
        self
    }
}

#[async_trait]
impl SessionResolver for StaticSessionResolver {
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AuthError> {
        Ok(self.tokens.get(token).copied())
    }
}
