//! Domain operations against the gateway: health checks and message
//! exchange. Each call is an independent request/response pass-through with
//! no retry, caching, or rate limiting; failures are normalized into
//! [`ClientError`].

use std::sync::Arc;

use crate::api::{ChatRequest, ChatResponse, HealthResponse};
use crate::core::error::ClientError;
use crate::gateway::GatewayClient;
use crate::session::SessionService;

const HEALTH_PATH: &str = "health";
const WEBHOOK_PATH: &str = "webhook";

pub struct ChatService {
    gateway: Arc<GatewayClient>,
    session: Arc<SessionService>,
}

impl ChatService {
    pub fn new(gateway: Arc<GatewayClient>, session: Arc<SessionService>) -> Self {
        Self { gateway, session }
    }

    /// Ask the gateway whether it is healthy.
    ///
    /// Returns `Ok(false)` when the gateway answers with any status other
    /// than the literal `ok`: a reachable-but-degraded gateway is not an
    /// error. Unreachable or non-2xx responses are.
    pub async fn check_health(&self) -> Result<bool, ClientError> {
        let response = self.gateway.send(self.gateway.get(HEALTH_PATH)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::transport_status(
                status.as_u16(),
                response.text().await.ok(),
            ));
        }

        let body: HealthResponse = response.json().await?;
        Ok(body.status.is_ok())
    }

    /// Relay one user message to the backend conversation and return the
    /// reply text.
    ///
    /// Fails with [`ClientError::NotAuthenticated`] before any network call
    /// when no bearer token is present.
    pub async fn send_message(&self, text: &str) -> Result<String, ClientError> {
        if !self.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }

        let request_body = ChatRequest {
            message: text.to_string(),
            session_id: Some(self.session.session_id()?),
        };
        let request = self.gateway.post(WEBHOOK_PATH).json(&request_body);
        let response = self.gateway.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::transport_status(
                status.as_u16(),
                response.text().await.ok(),
            ));
        }

        let body: ChatResponse = response.json().await?;
        if !body.status.is_ok() {
            return Err(ClientError::Backend(
                body.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        Ok(body.response.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::secure_store::MemoryStore;
    use mockito::Matcher;
    use serde_json::json;

    fn services_for(base_url: &str) -> (Arc<SessionService>, ChatService) {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(GatewayClient::new(base_url).unwrap());
        let session = Arc::new(SessionService::with_default_server_url(
            store,
            gateway.clone(),
            base_url,
        ));
        let chat = ChatService::new(gateway, session.clone());
        (session, chat)
    }

    #[tokio::test]
    async fn check_health_reports_ok_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_body(r#"{"status":"ok"}"#)
            .create_async()
            .await;

        let (_session, chat) = services_for(&server.url());
        assert!(chat.check_health().await.unwrap());
    }

    #[tokio::test]
    async fn check_health_degraded_is_false_not_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_body(r#"{"status":"degraded"}"#)
            .create_async()
            .await;

        let (_session, chat) = services_for(&server.url());
        assert!(!chat.check_health().await.unwrap());
    }

    #[tokio::test]
    async fn check_health_http_failure_carries_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let (_session, chat) = services_for(&server.url());
        let err = chat.check_health().await.unwrap_err();
        match err {
            ClientError::Transport { status, detail, .. } => {
                assert_eq!(status, Some(500));
                assert_eq!(detail.as_deref(), Some("boom"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_message_requires_authentication() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/webhook")
            .expect(0)
            .create_async()
            .await;

        let (_session, chat) = services_for(&server.url());
        let err = chat.send_message("hi").await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn paired_send_carries_token_and_session_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/pair")
            .match_header("x-pairing-code", "482913")
            .with_body(r#"{"status":"paired","token":"abc123"}"#)
            .create_async()
            .await;

        let (session, chat) = services_for(&server.url());
        session.bootstrap().unwrap();
        session.pair("482913").await.unwrap();
        let session_id = session.session_id().unwrap();

        let mock = server
            .mock("POST", "/webhook")
            .match_header("authorization", "Bearer abc123")
            .match_body(Matcher::Json(json!({
                "message": "hi",
                "session_id": session_id,
            })))
            .with_body(r#"{"status":"ok","response":"hello there"}"#)
            .create_async()
            .await;

        let reply = chat.send_message("hi").await.unwrap();
        assert_eq!(reply, "hello there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn backend_rejection_surfaces_error_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/pair")
            .with_body(r#"{"status":"paired","token":"abc123"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/webhook")
            .with_body(r#"{"status":"error","error":"rate limited"}"#)
            .create_async()
            .await;

        let (session, chat) = services_for(&server.url());
        session.pair("482913").await.unwrap();

        let err = chat.send_message("hi").await.unwrap_err();
        match err {
            ClientError::Backend(message) => assert_eq!(message, "rate limited"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn backend_failure_without_text_gets_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/pair")
            .with_body(r#"{"status":"paired","token":"abc123"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/webhook")
            .with_body(r#"{"status":"error"}"#)
            .create_async()
            .await;

        let (session, chat) = services_for(&server.url());
        session.pair("482913").await.unwrap();

        let err = chat.send_message("hi").await.unwrap_err();
        match err {
            ClientError::Backend(message) => assert_eq!(message, "Unknown error"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_reply_without_response_field_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/pair")
            .with_body(r#"{"status":"paired","token":"abc123"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/webhook")
            .with_body(r#"{"status":"ok"}"#)
            .create_async()
            .await;

        let (session, chat) = services_for(&server.url());
        session.pair("482913").await.unwrap();
        assert_eq!(chat.send_message("hi").await.unwrap(), "");
    }

    #[tokio::test]
    async fn logout_blocks_further_sends_without_network() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/pair")
            .with_body(r#"{"status":"paired","token":"abc123"}"#)
            .create_async()
            .await;
        let webhook = server
            .mock("POST", "/webhook")
            .expect(0)
            .create_async()
            .await;

        let (session, chat) = services_for(&server.url());
        session.pair("482913").await.unwrap();
        session.logout().unwrap();

        let err = chat.send_message("hi").await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
        webhook.assert_async().await;
    }
}
