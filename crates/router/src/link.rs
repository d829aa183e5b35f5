//! Link interception decisions.
//!
//! The browser layer walks from a click target up to the nearest anchor and
//! hands its parts to the router, which decides whether the click stays
//! inside the app.

use crate::config::{AddressingMode, RouterConfig};

/// The parts of an anchor element the router inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    pub pathname: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
    pub classes: Vec<String>,
}

/// What to do with a clicked link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    /// Not an in-app link: let the browser follow it.
    Ignore,
    /// In-app link while routing is inactive: only prevent the default.
    Suppress,
    /// Prevent the default and navigate to the path.
    Navigate(String),
}

/// In-app path targeted by `anchor`, if it is an internal link.
#[must_use]
pub fn internal_path(config: &RouterConfig, anchor: &Anchor) -> Option<String> {
    match config.addressing_mode() {
        AddressingMode::Hash => {
            let path = anchor.hash.strip_prefix('#').unwrap_or(&anchor.hash);
            (!path.is_empty()).then(|| path.to_string())
        }
        AddressingMode::Path => {
            if !anchor
                .classes
                .iter()
                .any(|class| *class == config.internal_link_class)
            {
                return None;
            }
            let path = anchor
                .pathname
                .strip_prefix(config.base_path.as_str())
                .unwrap_or(&anchor.pathname);
            Some(if path.is_empty() { "/" } else { path }.to_string())
        }
    }
}
