//! Network URL constants and the environment keys that override them.

/// Default REST API base URL (local backend).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default WebSocket base URL (local backend).
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000";

/// Environment variable overriding the REST API base URL.
pub const API_BASE_ENV: &str = "API_BASE";

/// Environment variable overriding the WebSocket base URL.
pub const WS_BASE_ENV: &str = "WS_BASE";
