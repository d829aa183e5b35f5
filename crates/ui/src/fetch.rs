//! HTTP access to static artifacts (configuration, manifests, page fragments).

use async_trait::async_trait;
use gloo_net::http::Request;
use tracing::debug;

use crate::error::{Result, UiError};

/// Fetches text resources relative to the app shell.
#[async_trait(?Send)]
pub trait Fetch {
    /// # Errors
    /// Returns `UiError::Fetch` on network failure or a non-success status.
    async fn text(&self, url: &str) -> Result<String>;
}

/// [`Fetch`] over the browser's `fetch` API.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetch;

#[async_trait(?Send)]
impl Fetch for HttpFetch {
    async fn text(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching");
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| UiError::fetch(url, e.to_string()))?;

        if !response.ok() {
            return Err(UiError::fetch(
                url,
                format!("{} {}", response.status(), response.status_text()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| UiError::fetch(url, e.to_string()))
    }
}
