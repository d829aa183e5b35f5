//! Error types for router operations.
//!
//! The router has no error channel towards the user: failures are turned into
//! screens by the handler layer. These errors exist for the caller that drives
//! navigation, so it can decide which screen to force onto the surfaces.

use thiserror::Error;

/// Errors returned by the router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("no route matches path '{path}'")]
    NoMatchingRoute { path: String },

    #[error("redirect limit of {limit} hops exceeded while resolving '{path}'")]
    RedirectLimit { path: String, limit: usize },

    #[error("route handler failed: {0}")]
    Handler(#[from] HandlerError),

    #[error("failed to write history entry for '{url}': {reason}")]
    HistoryWrite { url: String, reason: String },

    #[error("failed to mount component '{component}' into surface '{surface}': {reason}")]
    Mount {
        surface: String,
        component: String,
        reason: String,
    },

    #[error("invalid history state: {reason}")]
    InvalidHistoryState { reason: String },
}

impl RouterError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a history write error.
    pub fn history_write(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HistoryWrite {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a mount error.
    pub fn mount(
        surface: impl Into<String>,
        component: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Mount {
            surface: surface.into(),
            component: component.into(),
            reason: reason.into(),
        }
    }
}

/// Failure reported by a route handler while resolving its screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl From<String> for HandlerError {
    fn from(reason: String) -> Self {
        Self(reason)
    }
}

impl From<&str> for HandlerError {
    fn from(reason: &str) -> Self {
        Self(reason.to_string())
    }
}

/// Result type for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RouterError::NoMatchingRoute {
            path: "/invalid".to_string(),
        };
        assert_eq!(error.to_string(), "no route matches path '/invalid'");

        let error = RouterError::RedirectLimit {
            path: "/loop".to_string(),
            limit: 10,
        };
        assert_eq!(
            error.to_string(),
            "redirect limit of 10 hops exceeded while resolving '/loop'"
        );

        let error = RouterError::from(HandlerError::new("manifest missing"));
        assert_eq!(error.to_string(), "route handler failed: manifest missing");
    }

    #[test]
    fn test_constructors() {
        let error = RouterError::mount("main-content", "the-404-screen-main", "no document");
        assert!(matches!(error, RouterError::Mount { ref surface, .. } if surface == "main-content"));

        let error = RouterError::invalid_pattern("(", "unclosed group");
        assert!(error.to_string().contains("unclosed group"));
    }

    #[test]
    fn test_handler_error_conversions() {
        assert_eq!(HandlerError::from("x"), HandlerError::from("x".to_string()));
    }
}
