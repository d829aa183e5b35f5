//! Application bootstrap
//!
//! Builds every service exactly once, in dependency order, and hands them
//! to the screen plugins explicitly. The resulting [`App`] lives for the
//! whole page in a thread-local slot.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use buzz_router::{Navigation, Result as RouterResult, Router};
use tracing::{debug, error, info};
use wasm_bindgen_futures::spawn_local;

use crate::components::registry::ComponentRegistry;
use crate::components::shell::mount_shell;
use crate::components::MAIN_SURFACE;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::Result;
use crate::fetch::{Fetch, HttpFetch};
use crate::i18n::Translator;
use crate::logging::{self, LogHandle};
use crate::screens::{Courses, ErrorScreens, HomeRedirect, NotFoundScreens, ScreenPlugin};
use crate::toast::Toasts;
use crate::web::{self, BrowserHistory, BrowserNavigation, DomSurfaces, Listeners};

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

/// The running application.
pub struct App {
    context: AppContext,
    router: Rc<Router>,
    errors: ErrorScreens,
    log: Option<LogHandle>,
    listeners: RefCell<Option<Listeners>>,
}

impl App {
    /// Start the application and show the screen for the current location.
    ///
    /// # Errors
    /// Returns `UiError::Dom` outside a browser and `UiError::Router` if a
    /// plugin route is invalid.
    pub async fn start() -> Result<Rc<Self>> {
        let log = logging::init("info");

        let fetch: Rc<dyn Fetch> = Rc::new(HttpFetch);
        let config = Rc::new(AppConfig::load(fetch.as_ref()).await);
        if let Some(handle) = &log {
            handle.set_level(&config.log_level);
        }

        let window = web::window()?;
        let document = web::document(&window)?;

        let translator = Rc::new(Translator::new(
            &config.language,
            &web::browser_languages(&window),
        ));
        let toasts = Rc::new(Toasts::new(config.toast_timeout()));
        let registry = Rc::new(ComponentRegistry::new());

        let surfaces = Rc::new(DomSurfaces::new(document, Rc::clone(&registry)));
        let history = Rc::new(BrowserHistory::new(window.clone()));
        let router = Rc::new(Router::new(config.router.clone(), surfaces, history));

        let context = AppContext::new(
            Rc::clone(&config),
            translator,
            toasts,
            registry,
            fetch,
            &router,
        );

        let not_found = NotFoundScreens::new(context.clone());
        let errors = ErrorScreens::new(context.clone());
        let plugins: Vec<Box<dyn ScreenPlugin>> = vec![
            Box::new(HomeRedirect::new(context.clone())),
            Box::new(errors.clone()),
            Box::new(Courses::new(context.clone(), not_found.clone())),
            Box::new(not_found),
        ];
        for plugin in &plugins {
            let routes = plugin.routes()?;
            debug!(plugin = plugin.name(), routes = routes.len(), "Registering routes");
            for route in routes {
                router.add_route(route);
            }
        }

        mount_shell(&context, router.state());
        router.add_surface(MAIN_SURFACE);
        mirror_document_title(&context, &router);

        let app = Rc::new(Self {
            context,
            router,
            errors,
            log,
            listeners: RefCell::new(None),
        });

        let weak = Rc::downgrade(&app);
        let listeners = web::install(&window, &app.router, move |navigation| {
            dispatch(&weak, navigation);
        })?;
        *app.listeners.borrow_mut() = Some(listeners);

        info!(title = %app.context.config.title, "Application started");
        let activated = app.router.activate(false).await.map(|_| ());
        app.settle(activated).await;
        Ok(app)
    }

    #[must_use]
    pub fn router(&self) -> &Rc<Router> {
        &self.router
    }

    #[must_use]
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Change the log filter at runtime, e.g. `buzz_router=debug`.
    pub fn set_log_level(&self, directive: &str) {
        if let Some(handle) = &self.log {
            handle.set_level(directive);
        }
    }

    async fn navigate(&self, navigation: BrowserNavigation) {
        let result = match navigation {
            BrowserNavigation::Link(path) => self.router.goto(&path).await.map(|_| ()),
            BrowserNavigation::PopState(state) => self
                .router
                .handle_popstate(state.as_deref())
                .await
                .map(|_: Option<Navigation>| ()),
        };
        self.settle(result).await;
    }

    /// A navigation that failed outright leaves the 500 screen behind.
    async fn settle(&self, result: RouterResult<()>) {
        let Err(e) = result else {
            return;
        };
        error!(error = %e, path = %self.router.current_path(), "Navigation failed");
        if let Err(e) = self.errors.show().await {
            error!(error = %e, "Cannot show the error screen");
        }
    }
}

fn dispatch(app: &Weak<App>, navigation: BrowserNavigation) {
    let Some(app) = app.upgrade() else {
        return;
    };
    spawn_local(async move { app.navigate(navigation).await });
}

/// Keep the document title at "<screen title> | <site title>".
fn mirror_document_title(context: &AppContext, router: &Router) {
    let site_title = context.config.title.clone();
    let compose = move |title: &str| {
        if title.is_empty() {
            site_title.clone()
        } else {
            format!("{title} | {site_title}")
        }
    };

    let set_title = move |title: &String| {
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            document.set_title(&compose(title));
        }
    };

    let current_title = &router.state().current_title;
    set_title(&current_title.get());
    current_title.subscribe(set_title).forget();
}

/// Start the application in the background and keep it alive.
pub fn launch() {
    spawn_local(async {
        match App::start().await {
            Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
            Err(e) => error!(error = %e, "Application failed to start"),
        }
    });
}
