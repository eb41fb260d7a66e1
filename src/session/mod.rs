//! Credential lifecycle for the gateway session.
//!
//! [`SessionService`] is the single writer for the persisted session record
//! (server URL, bearer token, session ID) and the only component that pushes
//! credential changes into the shared [`GatewayClient`]. Everything else
//! reads authentication state through it.

use std::sync::Arc;

use uuid::Uuid;

use crate::api::{PairResponse, PairStatus};
use crate::core::config::Config;
use crate::core::constants::DEFAULT_SERVER_URL;
use crate::core::error::ClientError;
use crate::core::secure_store::SecureStore;
use crate::gateway::GatewayClient;
use crate::utils::url::normalize_base_url;

// Persisted key layout. SessionService is the only SecureStore caller.
const KEY_BEARER_TOKEN: &str = "bearer_token";
const KEY_SERVER_URL: &str = "server_url";
const KEY_SESSION_ID: &str = "session_id";
const KEY_PAIRING_CODE: &str = "pairing_code";

const PAIR_PATH: &str = "pair";
const PAIRING_CODE_HEADER: &str = "X-Pairing-Code";
const PAIRING_CODE_LEN: usize = 6;

pub struct SessionService {
    store: Arc<dyn SecureStore>,
    gateway: Arc<GatewayClient>,
    default_server_url: String,
}

impl SessionService {
    pub fn new(store: Arc<dyn SecureStore>, gateway: Arc<GatewayClient>) -> Self {
        Self::with_default_server_url(store, gateway, DEFAULT_SERVER_URL)
    }

    /// Construct with the default gateway URL taken from the config file.
    pub fn from_config(
        store: Arc<dyn SecureStore>,
        gateway: Arc<GatewayClient>,
        config: &Config,
    ) -> Self {
        Self::with_default_server_url(store, gateway, config.default_server_url())
    }

    pub fn with_default_server_url(
        store: Arc<dyn SecureStore>,
        gateway: Arc<GatewayClient>,
        default_server_url: &str,
    ) -> Self {
        Self {
            store,
            gateway,
            default_server_url: normalize_base_url(default_server_url),
        }
    }

    /// Push the persisted server URL and bearer token into the gateway
    /// client. Must run once before any networked operation; calling it
    /// again is harmless.
    pub fn bootstrap(&self) -> Result<(), ClientError> {
        let server_url = self
            .store
            .get(KEY_SERVER_URL)
            .map_err(ClientError::store)?
            .unwrap_or_else(|| self.default_server_url.clone());
        self.gateway.set_base_url(&server_url);

        let token = self
            .store
            .get(KEY_BEARER_TOKEN)
            .map_err(ClientError::store)?;
        self.gateway.set_bearer_token(token.as_deref());
        Ok(())
    }

    /// Purely local check: a bearer token in the store is the sole
    /// authentication predicate. A store read failure reads as
    /// unauthenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.get(KEY_BEARER_TOKEN), Ok(Some(_)))
    }

    /// Currently persisted server URL, or the configured default.
    pub fn server_url(&self) -> String {
        self.store
            .get(KEY_SERVER_URL)
            .ok()
            .flatten()
            .unwrap_or_else(|| self.default_server_url.clone())
    }

    /// Exchange a one-time pairing code for a bearer token.
    ///
    /// The code must be exactly six ASCII digits; anything else fails
    /// locally without touching the network. On success the token is
    /// persisted and immediately attached to subsequent gateway requests.
    pub async fn pair(&self, pairing_code: &str) -> Result<String, ClientError> {
        let code = pairing_code.trim();
        if code.len() != PAIRING_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ClientError::invalid_input(
                "pairing code must be exactly six digits",
            ));
        }

        // Transient record of the attempt; cleared again on logout.
        self.store
            .set(KEY_PAIRING_CODE, code)
            .map_err(ClientError::store)?;

        let request = self
            .gateway
            .post(PAIR_PATH)
            .header(PAIRING_CODE_HEADER, code);
        let response = self.gateway.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::transport_status(
                status.as_u16(),
                response.text().await.ok(),
            ));
        }

        let body: PairResponse = response.json().await?;
        let token = match (&body.status, body.token.as_deref()) {
            (PairStatus::Paired, Some(token)) if !token.is_empty() => token.to_string(),
            _ => {
                return Err(ClientError::Backend(
                    body.error.unwrap_or_else(|| "Pairing failed".to_string()),
                ))
            }
        };

        self.store
            .set(KEY_BEARER_TOKEN, &token)
            .map_err(ClientError::store)?;
        self.gateway.set_bearer_token(Some(&token));
        Ok(token)
    }

    /// Persist a new server URL and point the gateway client at it.
    ///
    /// Only a trailing path separator is stripped; no well-formedness
    /// validation happens here. A malformed URL surfaces as a transport
    /// failure on the next request.
    pub fn update_server_url(&self, url: &str) -> Result<(), ClientError> {
        let normalized = normalize_base_url(url);
        self.store
            .set(KEY_SERVER_URL, &normalized)
            .map_err(ClientError::store)?;
        self.gateway.set_base_url(&normalized);
        Ok(())
    }

    /// Drop the bearer token and any transient pairing code, locally and in
    /// the gateway client. The server URL and session ID survive so a fresh
    /// pairing resumes the same conversation with the same gateway.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.store
            .remove(KEY_BEARER_TOKEN)
            .map_err(ClientError::store)?;
        self.store
            .remove(KEY_PAIRING_CODE)
            .map_err(ClientError::store)?;
        self.gateway.set_bearer_token(None);
        Ok(())
    }

    /// Stable per-installation conversation ID, generated and persisted on
    /// first access.
    pub fn session_id(&self) -> Result<String, ClientError> {
        if let Some(id) = self
            .store
            .get(KEY_SESSION_ID)
            .map_err(ClientError::store)?
        {
            return Ok(id);
        }

        let id = Uuid::new_v4().to_string();
        self.store
            .set(KEY_SESSION_ID, &id)
            .map_err(ClientError::store)?;
        Ok(id)
    }
}
