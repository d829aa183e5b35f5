//! [`HistoryHost`] over `window.history`, `window.location` and the document.

use std::time::Duration;

use buzz_router::{HistoryHost, Location, Result, RouterError};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use wasm_bindgen::JsValue;
use web_sys::{History, ScrollRestoration, Window};

use tracing::warn;

#[derive(Debug, Clone)]
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn history(&self, url: &str) -> Result<History> {
        self.window
            .history()
            .map_err(|e| RouterError::history_write(url, format!("{e:?}")))
    }
}

impl HistoryHost for BrowserHistory {
    fn location(&self) -> Location {
        let location = self.window.location();
        Location::new(
            location.pathname().unwrap_or_default(),
            location.hash().unwrap_or_default(),
        )
    }

    fn state(&self) -> Option<String> {
        self.window.history().ok()?.state().ok()?.as_string()
    }

    fn push_state(&self, state: &str, url: &str) -> Result<()> {
        self.history(url)?
            .push_state_with_url(&JsValue::from_str(state), "", Some(url))
            .map_err(|e| RouterError::history_write(url, format!("{e:?}")))
    }

    fn replace_state(&self, state: &str, url: &str) -> Result<()> {
        self.history(url)?
            .replace_state_with_url(&JsValue::from_str(state), "", Some(url))
            .map_err(|e| RouterError::history_write(url, format!("{e:?}")))
    }

    fn document_title(&self) -> String {
        self.window
            .document()
            .map(|document| document.title())
            .unwrap_or_default()
    }

    fn set_document_title(&self, title: &str) {
        if let Some(document) = self.window.document() {
            document.set_title(title);
        }
    }

    fn scroll_position(&self) -> (f64, f64) {
        (
            self.window.scroll_x().unwrap_or_default(),
            self.window.scroll_y().unwrap_or_default(),
        )
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.window.scroll_to_with_x_and_y(x, y);
    }

    fn set_manual_scroll_restoration(&self) {
        let result = self
            .window
            .history()
            .and_then(|history| history.set_scroll_restoration(ScrollRestoration::Manual));
        if let Err(e) = result {
            warn!(error = ?e, "Cannot disable browser scroll restoration");
        }
    }

    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(delay).boxed_local()
    }
}
