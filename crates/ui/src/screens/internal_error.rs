//! 500 screen
//!
//! Shown by the bootstrap when a navigation fails outright. In development
//! mode it is also reachable under `/500/`.

use buzz_router::{handler, Captures, Handler, Resolution, Route, StaticScreen, SurfaceContent};
use leptos::prelude::*;

use super::ScreenPlugin;
use crate::components::MAIN_SURFACE;
use crate::context::AppContext;
use crate::error::{Result, UiError};
use crate::pages::InternalError;

pub const INTERNAL_ERROR_COMPONENT: &str = "the-500-screen-main";

#[derive(Debug, Clone)]
pub struct ErrorScreens {
    context: AppContext,
}

impl ErrorScreens {
    #[must_use]
    pub fn new(context: AppContext) -> Self {
        let plugin = Self { context };
        plugin.register_components();
        plugin
    }

    fn register_components(&self) {
        let context = self.context.clone();
        self.context
            .registry
            .register(INTERNAL_ERROR_COMPONENT, move || {
                view! {
                    <InternalError
                        title=context.tr("Internal error")
                        lines=vec![
                            context.tr("Please excuse the bad picture."),
                            context.tr("Our technicans already work on it."),
                        ]
                    />
                }
                .into_any()
            });
    }

    #[must_use]
    pub fn screen(&self) -> StaticScreen {
        StaticScreen::default()
            .with_title(self.context.tr("Internal error"))
            .with_surface(
                MAIN_SURFACE,
                SurfaceContent::new(INTERNAL_ERROR_COMPONENT).with_surface_classes(["fullscreen"]),
            )
    }

    #[must_use]
    pub fn handler(&self) -> Handler {
        let plugin = self.clone();
        handler(move |_| {
            let resolution = Resolution::instance(plugin.screen());
            async move { Ok(resolution) }
        })
    }

    /// Show the 500 screen without changing the current path.
    ///
    /// # Errors
    /// Returns `UiError::Router` if the router is gone or refuses the screen.
    pub async fn show(&self) -> Result<()> {
        let router = self.context.router().ok_or(UiError::RouterGone)?;
        router
            .apply_handler(&self.handler(), Captures::default(), None, None)
            .await?;
        Ok(())
    }
}

impl ScreenPlugin for ErrorScreens {
    fn name(&self) -> &'static str {
        "500"
    }

    fn routes(&self) -> Result<Vec<Route>> {
        if !self.context.config.development_mode {
            return Ok(Vec::new());
        }
        Ok(vec![Route::new("^/500/$", self.handler())?])
    }
}
