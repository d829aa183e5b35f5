//! Router configuration.

use std::time::Duration;

use serde::Deserialize;

/// How navigable paths are carried in the browser URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Real pathname minus the base path. Needs a server that serves the app
    /// shell for every sub-path.
    Path,
    /// The URL fragment after `#`. Works without server cooperation.
    Hash,
}

/// Router construction options.
///
/// Deserializes from camelCase keys; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterConfig {
    /// URL prefix stripped from and prepended to every path.
    pub base_path: String,
    /// Hash-fragment addressing instead of path addressing.
    pub hash_bang: bool,
    /// Write a history entry for each settled navigation.
    pub push_history: bool,
    /// Class set on every surface while a navigation is in flight.
    pub loading_class: String,
    /// Marker class of in-app links (path addressing only).
    pub internal_link_class: String,
    /// Upper bound on redirect hops within one navigation.
    pub max_redirects: usize,
    /// Delay between restoring the old document title and the history write.
    pub title_delay_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            hash_bang: false,
            push_history: true,
            loading_class: "loading".to_string(),
            internal_link_class: "internal".to_string(),
            max_redirects: 10,
            title_delay_ms: 50,
        }
    }
}

impl RouterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    #[must_use]
    pub fn with_hash_bang(mut self, hash_bang: bool) -> Self {
        self.hash_bang = hash_bang;
        self
    }

    #[must_use]
    pub fn with_push_history(mut self, push_history: bool) -> Self {
        self.push_history = push_history;
        self
    }

    #[must_use]
    pub fn with_loading_class(mut self, class: impl Into<String>) -> Self {
        self.loading_class = class.into();
        self
    }

    #[must_use]
    pub fn with_internal_link_class(mut self, class: impl Into<String>) -> Self {
        self.internal_link_class = class.into();
        self
    }

    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    #[must_use]
    pub fn with_title_delay_ms(mut self, delay: u64) -> Self {
        self.title_delay_ms = delay;
        self
    }

    #[must_use]
    pub const fn addressing_mode(&self) -> AddressingMode {
        if self.hash_bang {
            AddressingMode::Hash
        } else {
            AddressingMode::Path
        }
    }

    #[must_use]
    pub const fn title_delay(&self) -> Duration {
        Duration::from_millis(self.title_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn should_use_documented_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.base_path, "");
        assert!(!config.hash_bang);
        assert!(config.push_history);
        assert_eq!(config.loading_class, "loading");
        assert_eq!(config.internal_link_class, "internal");
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.addressing_mode(), AddressingMode::Path);
    }

    #[test]
    fn should_deserialize_partial_camel_case_json() {
        let config: RouterConfig =
            serde_json::from_str(r#"{"basePath": "/app", "hashBang": true}"#).unwrap();
        assert_eq!(config.base_path, "/app");
        assert_eq!(config.addressing_mode(), AddressingMode::Hash);
        assert!(config.push_history);
        assert_eq!(config.title_delay(), Duration::from_millis(50));
    }

    #[test]
    fn should_build_with_overrides() {
        let config = RouterConfig::new()
            .with_push_history(false)
            .with_loading_class("busy")
            .with_max_redirects(3);
        assert!(!config.push_history);
        assert_eq!(config.loading_class, "busy");
        assert_eq!(config.max_redirects, 3);
    }
}
