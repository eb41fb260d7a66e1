//! Client core for chat apps that pair with a remote NullClaw gateway.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the error taxonomy, secure key/value storage, the
//!   transcript message model, and file-based configuration.
//! - [`gateway`] holds the one shared HTTP client configuration (base URL +
//!   bearer token) and builds every outgoing request from it.
//! - [`session`] is the single authority for the credential lifecycle:
//!   pairing, logout, server-URL changes, and session bootstrap.
//! - [`chat`] performs the domain operations (health check, message
//!   exchange) and normalizes failures into [`core::error::ClientError`].
//! - [`api`] defines the wire payloads exchanged with the gateway.
//!
//! There is no runtime entrypoint here: a presentation layer constructs the
//! services, drives them, and renders their results. A typical setup wires a
//! [`core::secure_store::KeyringStore`] into a [`session::SessionService`],
//! calls `bootstrap()`, and hands a [`chat::ChatService`] to the UI.

pub mod api;
pub mod chat;
pub mod core;
pub mod gateway;
pub mod session;
pub mod utils;
