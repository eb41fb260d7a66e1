use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub status: WebhookStatus,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct PairResponse {
    pub status: PairStatus,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
}

/// Health endpoint status field. Anything but the literal `ok` means the
/// gateway answered but is not healthy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HealthStatus {
    Ok,
    Other(String),
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthStatus::Ok)
    }
}

impl From<String> for HealthStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ok" => HealthStatus::Ok,
            _ => HealthStatus::Other(value),
        }
    }
}

/// Pair endpoint status field; only `paired` grants a token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PairStatus {
    Paired,
    Other(String),
}

impl PairStatus {
    pub fn is_paired(&self) -> bool {
        matches!(self, PairStatus::Paired)
    }
}

impl From<String> for PairStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "paired" => PairStatus::Paired,
            _ => PairStatus::Other(value),
        }
    }
}

/// Webhook endpoint status field; `ok` means the backend accepted and
/// answered the message, anything else is a logical failure even on HTTP 2xx.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum WebhookStatus {
    Ok,
    Other(String),
}

impl WebhookStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, WebhookStatus::Ok)
    }
}

impl From<String> for WebhookStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ok" => WebhookStatus::Ok,
            _ => WebhookStatus::Other(value),
        }
    }
}
