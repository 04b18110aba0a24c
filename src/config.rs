//! API configuration resolved at build time.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Client configuration for the REST backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned() }
    }
}

impl AppConfig {
    /// Build the config from compile-time environment variables.
    ///
    /// Optional:
    /// - `API_BASE_URL`: overrides the default backend URL
    pub fn from_env() -> Self {
        Self {
            api_base_url: normalize_base_url(option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL)),
        }
    }
}

/// Trim trailing slashes so request paths can always start with `/`.
fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_owned()
}
