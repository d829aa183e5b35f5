//! Redirect from `/` to the configured start page.

use buzz_router::{handler, RedirectScreen, Resolution, Route};

use super::ScreenPlugin;
use crate::context::AppContext;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct HomeRedirect {
    context: AppContext,
}

impl HomeRedirect {
    #[must_use]
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }
}

impl ScreenPlugin for HomeRedirect {
    fn name(&self) -> &'static str {
        "home"
    }

    fn routes(&self) -> Result<Vec<Route>> {
        let target = self.context.config.home.clone();
        let redirect = handler(move |_| {
            let screen = RedirectScreen::new(target.clone());
            async move { Ok(Resolution::instance(screen)) }
        });
        Ok(vec![Route::new("^/$", redirect)?.with_id("home")])
    }
}
