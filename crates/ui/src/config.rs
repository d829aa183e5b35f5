//! Installation configuration
//!
//! Loaded once at startup from `config.json` next to the app shell. Every
//! key is optional; a missing or unreadable file leaves the defaults in
//! place.

use std::time::Duration;

use buzz_router::RouterConfig;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Result, UiError};
use crate::fetch::Fetch;

/// Where the configuration is fetched from.
pub const CONFIG_URL: &str = "config.json";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Site title shown in the header and the document title.
    pub title: String,
    /// Redirect target of `/`.
    pub home: String,
    /// Course ids, in routing order.
    pub courses: Vec<String>,
    /// URL prefix under which course directories live.
    pub course_url_prefix: String,
    /// Toast lifetime; `0` keeps toasts until clicked.
    pub toast_timeout_ms: u64,
    /// Preferred language; empty to ask the browser.
    pub language: String,
    /// Enables the `/500/` route.
    pub development_mode: bool,
    /// `tracing` filter directive, e.g. `info` or `buzz_router=debug`.
    pub log_level: String,
    pub router: RouterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Buzz Light".to_string(),
            home: "/course/example/".to_string(),
            courses: vec!["example".to_string()],
            course_url_prefix: "courses".to_string(),
            toast_timeout_ms: 8000,
            language: String::new(),
            development_mode: false,
            log_level: "info".to_string(),
            router: RouterConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON configuration document.
    ///
    /// # Errors
    /// Returns `UiError::Config` if the document is not valid JSON or a key
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Fetch and parse [`CONFIG_URL`], falling back to the defaults.
    pub async fn load(fetch: &dyn Fetch) -> Self {
        match fetch.text(CONFIG_URL).await.and_then(|json| Self::from_json(&json)) {
            Ok(config) => {
                info!(courses = config.courses.len(), "Configuration loaded");
                config
            }
            Err(e) => {
                warn!(error = %e, "Using default configuration");
                Self::default()
            }
        }
    }

    #[must_use]
    pub const fn toast_timeout(&self) -> Duration {
        Duration::from_millis(self.toast_timeout_ms)
    }

    /// Directory holding the artifacts of a course, with trailing slash.
    #[must_use]
    pub fn course_content_url(&self, course_id: &str) -> String {
        let prefix = self.course_url_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            format!("{course_id}/")
        } else {
            format!("{prefix}/{course_id}/")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn given_empty_document_when_parsed_then_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.toast_timeout(), Duration::from_millis(8000));
    }

    #[test]
    fn given_partial_document_when_parsed_then_rest_defaulted() {
        let config = AppConfig::from_json(
            r#"{
                "title": "Programming 101",
                "courses": ["python", "rust"],
                "developmentMode": true,
                "router": { "hashBang": true }
            }"#,
        )
        .unwrap();

        assert_eq!(config.title, "Programming 101");
        assert_eq!(config.courses, vec!["python", "rust"]);
        assert!(config.development_mode);
        assert!(config.router.hash_bang);
        assert_eq!(config.router.max_redirects, 10);
        assert_eq!(config.home, "/course/example/");
    }

    #[test]
    fn given_wrong_type_when_parsed_then_config_error() {
        let result = AppConfig::from_json(r#"{"courses": "python"}"#);
        assert!(matches!(result, Err(UiError::Config(_))));
    }

    #[test]
    fn given_prefix_when_building_content_url_then_single_slash() {
        let mut config = AppConfig::default();
        assert_eq!(config.course_content_url("example"), "courses/example/");

        config.course_url_prefix = "/static/courses/".to_string();
        assert_eq!(config.course_content_url("x"), "/static/courses/x/");

        config.course_url_prefix = String::new();
        assert_eq!(config.course_content_url("x"), "x/");
    }
}
