//! 404 screen
//!
//! Registered as the final catch-all route. Other screens fall back to it
//! when their content cannot be found, and [`NotFoundScreens::show`] forces
//! it onto the surfaces without touching the current path.

use buzz_router::{handler, Captures, Handler, Resolution, Route, StaticScreen, SurfaceContent};
use leptos::prelude::*;

use super::ScreenPlugin;
use crate::components::MAIN_SURFACE;
use crate::context::AppContext;
use crate::error::{Result, UiError};
use crate::pages::NotFound;

pub const NOT_FOUND_COMPONENT: &str = "the-404-screen-main";

#[derive(Debug, Clone)]
pub struct NotFoundScreens {
    context: AppContext,
}

impl NotFoundScreens {
    /// Create the plugin and register its page component.
    #[must_use]
    pub fn new(context: AppContext) -> Self {
        let plugin = Self { context };
        plugin.register_components();
        plugin
    }

    fn register_components(&self) {
        let context = self.context.clone();
        self.context.registry.register(NOT_FOUND_COMPONENT, move || {
            view! {
                <NotFound
                    title=context.tr("Page not found")
                    message=context.tr("We are sorry, but the requested page could not be found.")
                    home_href=context.href("/")
                    home_label=context.tr("Start page")
                    link_class=context.link_class()
                />
            }
            .into_any()
        });
    }

    /// A fresh 404 screen.
    #[must_use]
    pub fn screen(&self) -> StaticScreen {
        StaticScreen::default()
            .with_title(self.context.tr("Page not found"))
            .with_surface(
                MAIN_SURFACE,
                SurfaceContent::new(NOT_FOUND_COMPONENT).with_surface_classes(["fullscreen"]),
            )
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        Resolution::instance(self.screen())
    }

    /// Route handler resolving to the 404 screen.
    #[must_use]
    pub fn handler(&self) -> Handler {
        let plugin = self.clone();
        handler(move |_| {
            let resolution = plugin.resolution();
            async move { Ok(resolution) }
        })
    }

    /// Show the 404 screen without changing the current path.
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

impl ScreenPlugin for NotFoundScreens {
    fn name(&self) -> &'static str {
        "404"
    }

    fn routes(&self) -> Result<Vec<Route>> {
        Ok(vec![Route::new(".*", self.handler())?])
    }
}
