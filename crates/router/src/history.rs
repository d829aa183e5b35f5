//! Browser history integration: host trait, persisted entry state and the
//! mapping between navigable paths and browser URLs.

use std::time::Duration;

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::{AddressingMode, RouterConfig};
use crate::error::{Result, RouterError};

/// The parts of `window.location` the router reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            hash: hash.into(),
        }
    }
}

/// State serialized into each history entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub path: String,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl HistoryState {
    pub fn new(path: impl Into<String>, scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            path: path.into(),
            scroll_x,
            scroll_y,
        }
    }

    /// # Errors
    /// Returns `RouterError::InvalidHistoryState` if serialization fails.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| RouterError::InvalidHistoryState {
            reason: e.to_string(),
        })
    }

    /// # Errors
    /// Returns `RouterError::InvalidHistoryState` if `raw` is not a state object.
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| RouterError::InvalidHistoryState {
            reason: e.to_string(),
        })
    }
}

/// Window, document and history operations the router needs.
pub trait HistoryHost {
    fn location(&self) -> Location;

    /// Raw state of the current history entry, if any.
    fn state(&self) -> Option<String>;

    /// # Errors
    /// Returns `RouterError::HistoryWrite` if the browser rejects the entry.
    fn push_state(&self, state: &str, url: &str) -> Result<()>;

    /// # Errors
    /// Returns `RouterError::HistoryWrite` if the browser rejects the entry.
    fn replace_state(&self, state: &str, url: &str) -> Result<()>;

    fn document_title(&self) -> String;

    fn set_document_title(&self, title: &str);

    fn scroll_position(&self) -> (f64, f64);

    fn scroll_to(&self, x: f64, y: f64);

    fn set_manual_scroll_restoration(&self);

    /// Resolve after `delay`.
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;
}

/// URL shown in the browser for `path`.
#[must_use]
pub fn url_for(config: &RouterConfig, path: &str) -> String {
    match config.addressing_mode() {
        AddressingMode::Hash => format!("{}#{path}", config.base_path),
        AddressingMode::Path => format!("{}{path}", config.base_path),
    }
}

/// Navigable path encoded in `location`.
#[must_use]
pub fn path_from_location(config: &RouterConfig, location: &Location) -> String {
    match config.addressing_mode() {
        AddressingMode::Hash => location
            .hash
            .strip_prefix('#')
            .unwrap_or(&location.hash)
            .to_string(),
        AddressingMode::Path => location
            .pathname
            .strip_prefix(config.base_path.as_str())
            .unwrap_or(&location.pathname)
            .to_string(),
    }
}
