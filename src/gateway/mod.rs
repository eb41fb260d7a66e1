//! HTTP access to the NullClaw gateway.
//!
//! One [`GatewayClient`] is shared by every service in the crate. It owns a
//! single `reqwest::Client` (fixed timeouts, identical for all calls) and a
//! single mutable [`GatewayConfig`]; every outgoing request is built by
//! combining that configuration with a request-specific path.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use crate::core::error::ClientError;
use crate::utils::url::{construct_api_url, normalize_base_url};

const GATEWAY_HTTP_TIMEOUT_SECONDS: u64 = 60;

/// Mutable view the client holds of the current session: where to talk and
/// which credential to present. Pushed by the session layer; never mutated
/// anywhere else.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
}

/// Shared HTTP client for the gateway's endpoints.
///
/// The configuration is guarded by a mutex, but a mutation that races an
/// in-flight request is still observable either way: the Authorization
/// header is read once when the request is built. That is acceptable here
/// since token updates only happen at session boundaries (pair/logout), not
/// during concurrent chat traffic.
pub struct GatewayClient {
    http: reqwest::Client,
    config: Mutex<GatewayConfig>,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(GATEWAY_HTTP_TIMEOUT_SECONDS))
            .timeout(Duration::from_secs(GATEWAY_HTTP_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            http,
            config: Mutex::new(GatewayConfig {
                base_url: normalize_base_url(base_url),
                bearer_token: None,
            }),
        })
    }

    fn config(&self) -> MutexGuard<'_, GatewayConfig> {
        self.config.lock().unwrap_or_else(|err| err.into_inner())
    }

    pub fn set_base_url(&self, url: &str) {
        self.config().base_url = normalize_base_url(url);
    }

    pub fn set_bearer_token(&self, token: Option<&str>) {
        self.config().bearer_token = token.map(str::to_string);
    }

    pub fn base_url(&self) -> String {
        self.config().base_url.clone()
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.config().bearer_token.clone()
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let (url, token) = {
            let config = self.config();
            (
                construct_api_url(&config.base_url, path),
                config.bearer_token.clone(),
            )
        };

        debug!(%method, url = %url, "Sending gateway request");
        let mut request = self.http.request(method, url);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// GET request for `path`, with the Authorization header attached when a
    /// bearer token is currently configured.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    /// POST request for `path`, with the Authorization header attached when a
    /// bearer token is currently configured.
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }

    /// Send a prepared request, mapping connection errors and timeouts into
    /// [`ClientError::Transport`]. Status handling stays with the caller.
    pub async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        debug!(status = %response.status(), "Gateway response received");
        Ok(response)
    }
}
