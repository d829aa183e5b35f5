//! Error types for the browser application
//!
//! Every fallible operation in the UI returns [`UiError`]. Nothing here is
//! shown to the user directly: screens turn failures into toasts or into the
//! 404/500 screens.

use buzz_router::RouterError;
use thiserror::Error;

/// Errors that can occur in the browser application
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// HTTP request failed or returned a non-success status
    #[error("failed to fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    /// Course manifest has an unexpected shape
    #[error("invalid manifest of course '{course}': {reason}")]
    Manifest { course: String, reason: String },

    /// Browser API unavailable or rejected a call
    #[error("DOM access failed: {0}")]
    Dom(String),

    /// No view registered under the component name
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// The router was dropped while a screen still referenced it
    #[error("router is no longer available")]
    RouterGone,

    /// Router operation failed
    #[error(transparent)]
    Router(#[from] RouterError),
}

impl UiError {
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn manifest(course: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Manifest {
            course: course.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a JavaScript exception raised by a DOM call.
    pub fn dom(context: &str, value: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{context}: {value:?}"))
    }

    /// Short reason suitable for a toast, without the wrapping context.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Fetch { reason, .. } | Self::Manifest { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for UI operations
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_error_display() {
        let error = UiError::fetch("courses/x/course.json", "404 Not Found");
        assert_eq!(
            error.to_string(),
            "failed to fetch 'courses/x/course.json': 404 Not Found"
        );

        let error = UiError::UnknownComponent("the-404-screen-main".to_string());
        assert_eq!(error.to_string(), "unknown component 'the-404-screen-main'");
    }

    #[test]
    fn test_reason_strips_context() {
        assert_eq!(UiError::fetch("a", "timeout").reason(), "timeout");
        assert_eq!(
            UiError::Config("bad".to_string()).reason(),
            "invalid configuration: bad"
        );
    }

    #[test]
    fn test_router_error_converts() {
        let error: UiError = RouterError::NoMatchingRoute {
            path: "/x".to_string(),
        }
        .into();
        assert!(matches!(error, UiError::Router(_)));
        assert_eq!(error.to_string(), "no route matches path '/x'");
    }
}
