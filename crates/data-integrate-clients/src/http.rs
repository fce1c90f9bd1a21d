// crates/data-integrate-clients/src/http.rs
// ============================================================================
// Module: HTTP Endpoint
// Description: Shared JSON-over-HTTP plumbing for service clients.
// Purpose: Build timeouts, URLs, and status handling once.
// Dependencies: reqwest, serde, thiserror
// ============================================================================

//! ## Overview
//! [`HttpEndpoint`] wraps a `reqwest::Client` bound to one `http://host:port`
//! base. Non-success statuses become [`HttpFailure::Status`] carrying a
//! truncated response body so error messages stay bounded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::Response;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum characters of a response body kept in error messages.
pub const MAX_ERROR_BODY_CHARS: usize = 256;
/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("data-integrate/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// SECTION: Types
// ============================================================================

/// Failure of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpFailure {
    /// The request could not be sent or the client could not be built.
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("status {code}{}", body_suffix(.body))]
    Status {
        /// HTTP status code.
        code: u16,
        /// Truncated response body.
        body: String,
    },
    /// The response body did not decode.
    #[error("{0}")]
    Decode(String),
}

/// Renders `: body` for non-empty bodies.
fn body_suffix(body: &str) -> String {
    if body.is_empty() { String::new() } else { format!(": {body}") }
}

/// JSON service endpoint.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    /// `http://host:port` without trailing slash.
    base_url: String,
    /// Shared client.
    client: Client,
}

impl HttpEndpoint {
    /// Builds an endpoint for `host:port` with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFailure::Transport`] when the client cannot be built.
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self, HttpFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(|err| HttpFailure::Transport(format!("http client build failed: {err}")))?;
        Ok(Self { base_url: format!("http://{host}:{port}"), client })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts `body` as JSON to `path` and decodes a JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFailure`] on transport, status, or decoding failures.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, HttpFailure>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| HttpFailure::Transport(err.to_string()))?;
        let response = ensure_success(response).await?;
        response.json::<T>().await.map_err(|err| HttpFailure::Decode(err.to_string()))
    }

    /// Sends `DELETE` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFailure`] on transport or status failures.
    pub async fn delete(&self, path: &str) -> Result<(), HttpFailure> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|err| HttpFailure::Transport(err.to_string()))?;
        ensure_success(response).await.map(|_| ())
    }

    /// Joins the base URL and an absolute path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Converts non-success statuses into [`HttpFailure::Status`].
async fn ensure_success(response: Response) -> Result<Response, HttpFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(HttpFailure::Status {
        code: status.as_u16(),
        body: body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
    })
}
