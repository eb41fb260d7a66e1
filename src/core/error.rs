use std::error::Error as StdError;
use std::fmt;

use crate::core::secure_store::StoreError;

/// Uniform failure type returned by every public service operation.
///
/// Nothing in this crate raises across the module boundary: pairing, health
/// checks, and message exchange all surface one of these variants and leave
/// user-visible wording to the presentation layer.
#[derive(Debug)]
pub enum ClientError {
    /// Input failed local validation; no request was made.
    InvalidInput(String),
    /// A chat call was attempted without a bearer token.
    NotAuthenticated,
    /// HTTP-level failure: non-2xx status, timeout, connection error, or an
    /// undecodable response body.
    Transport {
        status: Option<u16>,
        detail: Option<String>,
        source: Option<reqwest::Error>,
    },
    /// HTTP 2xx whose body reports a logical failure (status field not the
    /// expected literal). Carries the backend's error text.
    Backend(String),
    /// Secure storage access failed.
    Store(StoreError),
}

impl ClientError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ClientError::InvalidInput(message.into())
    }

    pub fn store(err: StoreError) -> Self {
        ClientError::Store(err)
    }

    /// Transport failure for a non-2xx response, keeping the error body (if
    /// any) as human-readable detail.
    pub fn transport_status(status: u16, body: Option<String>) -> Self {
        let detail = body
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        ClientError::Transport {
            status: Some(status),
            detail,
            source: None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidInput(message) => write!(f, "invalid input: {message}"),
            ClientError::NotAuthenticated => {
                write!(f, "not authenticated: pair with the gateway first")
            }
            ClientError::Transport {
                status: Some(status),
                detail,
                ..
            } => match detail {
                Some(detail) => write!(f, "gateway request failed (HTTP {status}): {detail}"),
                None => write!(f, "gateway request failed (HTTP {status})"),
            },
            ClientError::Transport {
                source: Some(source),
                ..
            } => write!(f, "gateway request failed: {source}"),
            ClientError::Transport { .. } => write!(f, "gateway request failed"),
            ClientError::Backend(message) => write!(f, "gateway error: {message}"),
            ClientError::Store(err) => write!(f, "secure storage error: {err}"),
        }
    }
}

impl StdError for ClientError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ClientError::Transport {
                source: Some(source),
                ..
            } => Some(source),
            ClientError::Store(err) => Some(&**err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport {
            status: err.status().map(|status| status.as_u16()),
            detail: None,
            source: Some(err),
        }
    }
}
