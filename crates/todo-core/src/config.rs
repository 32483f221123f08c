//! Client Configuration
//!
//! Endpoint and cache settings shared by the browser app and the tests.

use std::time::Duration;

use chrono::TimeDelta;

/// Public demo backend used when no override is compiled in.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the bearer token lives in client-side storage.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Route the app navigates to after a 401.
pub const LOGIN_ROUTE: &str = "/login";

/// Settings for talking to the todo API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub auth_token_key: String,
    pub login_route: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Build from the compile-time `TODO_API_BASE_URL`, falling back to DummyJSON.
    pub fn from_build_env() -> Self {
        match option_env!("TODO_API_BASE_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Full URL for an API path such as `/todos/1`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            auth_token_key: AUTH_TOKEN_KEY.to_string(),
            login_route: LOGIN_ROUTE.to_string(),
        }
    }
}

/// Freshness and retention windows for the cached todo list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachePolicy {
    /// Data younger than this is served without refetching
    pub stale_time: TimeDelta,
    /// Data older than this is dropped when nothing is in flight
    pub gc_time: TimeDelta,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_time: TimeDelta::minutes(5),
            gc_time: TimeDelta::minutes(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_dummyjson() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://dummyjson.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.url("/todos"), "https://dummyjson.com/todos");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ApiConfig::new("http://localhost:3000/");
        assert_eq!(config.url("/todos/add"), "http://localhost:3000/todos/add");
    }

    #[test]
    fn test_cache_windows() {
        let policy = CachePolicy::default();
        assert_eq!(policy.stale_time, TimeDelta::minutes(5));
        assert_eq!(policy.gc_time, TimeDelta::minutes(10));
    }
}
