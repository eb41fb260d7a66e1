//! URL utilities for consistent URL handling
//!
//! This module provides utilities for normalizing server URLs to prevent
//! issues with trailing slashes when constructing gateway endpoints.

/// Normalize a server URL by removing trailing slashes
///
/// This ensures consistent URL construction when appending endpoints,
/// preventing double slashes in the final URLs.
///
/// # Examples
///
/// ```
/// use nullclaw_client::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://gw.example"), "https://gw.example");
/// assert_eq!(normalize_base_url("https://gw.example/"), "https://gw.example");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a server URL and endpoint path
///
/// This function normalizes the server URL and safely appends the endpoint,
/// ensuring there are no double slashes in the result.
///
/// # Examples
///
/// ```
/// use nullclaw_client::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://gw.example", "health"),
///     "https://gw.example/health"
/// );
/// assert_eq!(
///     construct_api_url("https://gw.example/", "/webhook"),
///     "https://gw.example/webhook"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        // No trailing slash - should remain unchanged
        assert_eq!(
            normalize_base_url("https://gw.example"),
            "https://gw.example"
        );

        // Single trailing slash - should be removed
        assert_eq!(
            normalize_base_url("https://gw.example/"),
            "https://gw.example"
        );

        // Multiple trailing slashes - should all be removed
        assert_eq!(
            normalize_base_url("https://gw.example///"),
            "https://gw.example"
        );

        // Host with port
        assert_eq!(
            normalize_base_url("http://127.0.0.1:3000/"),
            "http://127.0.0.1:3000"
        );

        // Empty string
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn test_construct_api_url() {
        // Normal case - no trailing slash on server URL
        assert_eq!(
            construct_api_url("https://gw.example", "health"),
            "https://gw.example/health"
        );

        // Server URL with trailing slash
        assert_eq!(
            construct_api_url("https://gw.example/", "pair"),
            "https://gw.example/pair"
        );

        // Endpoint with leading slash
        assert_eq!(
            construct_api_url("https://gw.example", "/webhook"),
            "https://gw.example/webhook"
        );

        // Both sides decorated
        assert_eq!(
            construct_api_url("https://gw.example///", "///health"),
            "https://gw.example/health"
        );
    }
}
