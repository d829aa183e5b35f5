//! Browser bindings
//!
//! Implementations of the router's host traits on top of `web-sys`, plus
//! the document-level event listeners that feed navigations back in.

pub mod history;
pub mod listeners;
pub mod surfaces;

use web_sys::{Document, Window};

use crate::error::{Result, UiError};

pub use history::BrowserHistory;
pub use listeners::{install, BrowserNavigation, Listeners};
pub use surfaces::DomSurfaces;

/// The global `window`.
///
/// # Errors
/// Returns `UiError::Dom` outside a browser main thread.
pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| UiError::Dom("no global window".to_string()))
}

/// # Errors
/// Returns `UiError::Dom` if the window has no document.
pub fn document(window: &Window) -> Result<Document> {
    window
        .document()
        .ok_or_else(|| UiError::Dom("window has no document".to_string()))
}

/// Preferred languages of the browser, most preferred first.
#[must_use]
pub fn browser_languages(window: &Window) -> Vec<String> {
    let navigator = window.navigator();
    let mut languages: Vec<String> = navigator
        .languages()
        .iter()
        .filter_map(|value| value.as_string())
        .collect();

    if let Some(language) = navigator.language() {
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    languages
}
