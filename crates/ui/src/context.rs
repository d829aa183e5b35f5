//! Shared services handed to every screen plugin.

use std::fmt;
use std::rc::{Rc, Weak};

use buzz_router::{history, Router};

use crate::components::registry::ComponentRegistry;
use crate::config::AppConfig;
use crate::fetch::Fetch;
use crate::i18n::Translator;
use crate::toast::Toasts;

/// Services constructed once at startup, in dependency order.
///
/// The router is held weakly: routes own their handlers, and handlers own a
/// copy of the context.
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
    pub translator: Rc<Translator>,
    pub toasts: Rc<Toasts>,
    pub registry: Rc<ComponentRegistry>,
    pub fetch: Rc<dyn Fetch>,
    router: Weak<Router>,
}

impl AppContext {
    pub fn new(
        config: Rc<AppConfig>,
        translator: Rc<Translator>,
        toasts: Rc<Toasts>,
        registry: Rc<ComponentRegistry>,
        fetch: Rc<dyn Fetch>,
        router: &Rc<Router>,
    ) -> Self {
        Self {
            config,
            translator,
            toasts,
            registry,
            fetch,
            router: Rc::downgrade(router),
        }
    }

    /// The router, unless the application is shutting down.
    #[must_use]
    pub fn router(&self) -> Option<Rc<Router>> {
        self.router.upgrade()
    }

    /// Link target for an in-app path.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        history::url_for(&self.config.router, path)
    }

    /// Class that marks anchors as in-app links.
    #[must_use]
    pub fn link_class(&self) -> String {
        self.config.router.internal_link_class.clone()
    }

    /// Shorthand for [`Translator::translate`].
    #[must_use]
    pub fn tr(&self, text: &str) -> String {
        self.translator.translate(text)
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("language", &self.translator.language())
            .finish_non_exhaustive()
    }
}
