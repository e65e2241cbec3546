//! Backend endpoints, resolved once and injected into each networking collaborator.

use crate::error::SdkError;
use crate::network::{API_BASE_ENV, DEFAULT_API_URL, DEFAULT_WS_URL, WS_BASE_ENV};

/// Base URLs for the REST and WebSocket backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base: String,
    pub ws_base: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_URL.to_string(),
            ws_base: DEFAULT_WS_URL.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Build from explicit base URLs.
    pub fn new(api_base: &str, ws_base: &str) -> Result<Self, SdkError> {
        Ok(Self {
            api_base: normalize(api_base, &["http://", "https://"])?,
            ws_base: normalize(ws_base, &["ws://", "wss://"])?,
        })
    }

    /// Read `API_BASE` / `WS_BASE`, falling back to the local backend defaults.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SdkError> {
        let api_base = lookup(API_BASE_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let ws_base = lookup(WS_BASE_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WS_URL.to_string());

        tracing::debug!(api_base = %api_base, ws_base = %ws_base, "Resolved dashboard config");
        Self::new(&api_base, &ws_base)
    }
}

fn normalize(url: &str, schemes: &[&str]) -> Result<String, SdkError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !schemes.iter().any(|s| trimmed.starts_with(s)) {
        return Err(SdkError::Config(format!(
            "'{}' must start with one of {:?}",
            url, schemes
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_env_missing() {
        let config = DashboardConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.ws_base, "ws://localhost:8000");
    }

    #[test]
    fn test_env_override_and_trailing_slash() {
        let vars: HashMap<&str, &str> = [
            ("API_BASE", "https://api.example.com/"),
            ("WS_BASE", "wss://api.example.com"),
        ]
        .into_iter()
        .collect();
        let config =
            DashboardConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.ws_base, "wss://api.example.com");
    }

    #[test]
    fn test_blank_env_value_uses_default() {
        let config = DashboardConfig::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let err = DashboardConfig::new("ws://localhost:8000", "ws://localhost:8000").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }
}
