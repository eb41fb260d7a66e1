//! Shared constants used across the crate

/// Gateway base URL used when neither the config file nor the secure store
/// has one. Matches the gateway's default listen address on a dev machine.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
