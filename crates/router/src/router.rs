//! Navigation engine.
//!
//! `goto` resolves a path against the route table, chases redirects issued
//! by `on_show`, swaps the content of every surface in registration order and
//! finally records the settled path in the browser history. Navigations are
//! single-flight: a second `goto` waits until the one in flight has settled.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::lock::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::history::{self, HistoryHost, HistoryState};
use crate::link::{self, Anchor, LinkDecision};
use crate::observable::{Observable, Subscription};
use crate::path::resolve as resolve_path;
use crate::route::{Captures, Crumb, Handler, Resolution, Route, RouteTable};
use crate::screen::Screen;
use crate::surface::{SurfaceHost, SurfaceList};

/// Observable navigation state, mutated in place for the router's lifetime.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// Last successfully resolved path.
    pub current_path: Observable<String>,
    /// Mirror of the current screen's title.
    pub current_title: Observable<String>,
    /// True while a navigation is in flight.
    pub loading: Observable<bool>,
    /// Breadcrumb of the matched route.
    pub breadcrumb: Observable<Vec<Crumb>>,
}

/// Options of a single navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GotoOptions {
    /// Write a history entry for the settled path.
    pub update_history: bool,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Default for GotoOptions {
    fn default() -> Self {
        Self {
            update_history: true,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

impl GotoOptions {
    /// Navigate without touching history, restoring a scroll offset.
    #[must_use]
    pub const fn restore(scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            update_history: false,
            scroll_x,
            scroll_y,
        }
    }
}

/// A settled navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path the navigation settled on.
    pub path: String,
    /// Number of redirects chased on the way.
    pub redirects: usize,
}

/// Single-page router.
pub struct Router {
    config: RouterConfig,
    routes: RefCell<RouteTable>,
    surfaces: RefCell<SurfaceList>,
    surface_host: Rc<dyn SurfaceHost>,
    history: Rc<dyn HistoryHost>,
    state: NavigationState,
    current_screen: RefCell<Option<Rc<dyn Screen>>>,
    title_subscription: RefCell<Option<Subscription>>,
    active: Cell<bool>,
    in_flight: Mutex<()>,
}

impl Router {
    pub fn new(
        config: RouterConfig,
        surface_host: Rc<dyn SurfaceHost>,
        history: Rc<dyn HistoryHost>,
    ) -> Self {
        Self {
            config,
            routes: RefCell::new(RouteTable::new()),
            surfaces: RefCell::new(SurfaceList::new()),
            surface_host,
            history,
            state: NavigationState::default(),
            current_screen: RefCell::new(None),
            title_subscription: RefCell::new(None),
            active: Cell::new(false),
            in_flight: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub fn current_path(&self) -> String {
        self.state.current_path.get()
    }

    #[must_use]
    pub fn current_title(&self) -> String {
        self.state.current_title.get()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.loading.get()
    }

    #[must_use]
    pub fn current_screen(&self) -> Option<Rc<dyn Screen>> {
        self.current_screen.borrow().clone()
    }

    // ------------------------------------------------------------------
    // Route table
    // ------------------------------------------------------------------

    /// Append a route to the end of the table.
    pub fn add_route(&self, route: Route) {
        debug!(pattern = route.pattern(), route_id = ?route.id(), "Adding route");
        self.routes.borrow_mut().add(route);
    }

    /// Remove every route carrying `id`.
    pub fn remove_route(&self, id: &str) {
        debug!(route_id = id, "Removing routes");
        self.routes.borrow_mut().remove(id);
    }

    /// Snapshot of the route list.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().routes().to_vec()
    }

    pub fn set_routes(&self, routes: Vec<Route>) {
        self.routes.borrow_mut().set_routes(routes);
    }

    /// Run `f` with mutable access to the live route table.
    ///
    /// The borrow ends when `f` returns, so this is safe to call from route
    /// handlers and screen hooks while a navigation is in flight.
    pub fn with_routes<R>(&self, f: impl FnOnce(&mut RouteTable) -> R) -> R {
        f(&mut self.routes.borrow_mut())
    }

    // ------------------------------------------------------------------
    // Surfaces
    // ------------------------------------------------------------------

    /// Manage the surface with the given DOM id. Registration order is
    /// update order.
    pub fn add_surface(&self, surface_id: impl Into<String>) {
        let surface_id = surface_id.into();
        self.surfaces.borrow_mut().add(surface_id.clone());
        self.set_loading_class(&surface_id, self.is_loading());
    }

    /// Stop managing the surface.
    pub fn remove_surface(&self, surface_id: &str) {
        self.surfaces.borrow_mut().remove(surface_id);
        self.set_loading_class(surface_id, false);
    }

    /// Surface ids in update order.
    #[must_use]
    pub fn surfaces(&self) -> Vec<String> {
        self.surfaces.borrow().ids().to_vec()
    }

    pub fn set_surfaces(&self, surface_ids: Vec<String>) {
        self.surfaces.borrow_mut().set_ids(surface_ids);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Navigate to `path`, writing a history entry.
    ///
    /// # Errors
    /// See [`Router::goto_with`].
    pub async fn goto(&self, path: &str) -> Result<Navigation> {
        self.goto_with(path, GotoOptions::default()).await
    }

    /// Navigate to `path`, which may be relative to the current path.
    ///
    /// # Errors
    /// Returns `RouterError::NoMatchingRoute` if no route matches (the table
    /// lacks a catch-all) and `RouterError::RedirectLimit` if screens keep
    /// redirecting beyond the configured bound. Neither writes history, and
    /// both leave the current path and breadcrumb as they were.
    pub async fn goto_with(&self, path: &str, options: GotoOptions) -> Result<Navigation> {
        let _guard = self.in_flight.lock().await;

        let old_scroll = self.history.scroll_position();
        let old_path = self.current_path();
        let old_title = self.history.document_title();
        let old_breadcrumb = self.state.breadcrumb.get();
        let requested = resolve_path(&old_path, path);

        debug!(from = %old_path, to = %requested, "Navigation started");
        self.set_loading(true);
        let settled = self.resolve_and_render(&old_path, requested, options).await;
        self.set_loading(false);

        // Intermediate redirect hops must not leak into a failed navigation.
        let navigation = settled.inspect_err(|_| {
            self.state.current_path.set(old_path.clone());
            self.state.breadcrumb.set(old_breadcrumb);
        })?;

        if let Err(e) = self
            .write_history(&old_path, &old_title, old_scroll, &navigation.path, options)
            .await
        {
            error!(path = %navigation.path, error = %e, "Failed to update browser history");
        }

        info!(
            path = %navigation.path,
            redirects = navigation.redirects,
            "Navigation settled"
        );
        Ok(navigation)
    }

    /// Rebuild the current screen without navigating or writing history.
    ///
    /// # Errors
    /// Same as [`Router::goto_with`].
    pub async fn reload(&self) -> Result<Navigation> {
        let path = self.current_path();
        self.goto_with(&path, GotoOptions::restore(0.0, 0.0)).await
    }

    /// Force the screen produced by `handler` onto the surfaces without
    /// changing the current path or history. Returns the redirect path if the
    /// screen asked for one; following it is up to the caller.
    ///
    /// `old_path` and `new_path` default to the current path.
    ///
    /// # Errors
    /// Returns `RouterError::Handler` if the handler fails.
    pub async fn apply_handler(
        &self,
        handler: &Handler,
        captures: Captures,
        old_path: Option<&str>,
        new_path: Option<&str>,
    ) -> Result<Option<String>> {
        let _guard = self.in_flight.lock().await;

        let current = self.current_path();
        let old_path = old_path.unwrap_or(&current);
        let new_path = new_path.unwrap_or(&current);

        let resolution = handler(captures).await?;
        Ok(self.apply_resolution(resolution, old_path, new_path).await)
    }

    /// Enable link and history interception, optionally showing the screen
    /// for the current browser location.
    ///
    /// # Errors
    /// Same as [`Router::goto_with`] when the first screen is loaded.
    pub async fn activate(&self, suppress_first_screen: bool) -> Result<Option<Navigation>> {
        self.active.set(true);
        if suppress_first_screen {
            return Ok(None);
        }
        let path = self.path_from_location();
        self.goto(&path).await.map(Some)
    }

    /// Disable link and history interception. `goto` keeps working.
    pub fn deactivate(&self) {
        self.active.set(false);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Navigable path of the current browser location.
    #[must_use]
    pub fn path_from_location(&self) -> String {
        history::path_from_location(&self.config, &self.history.location())
    }

    /// Browser URL for `path` under the configured addressing mode.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        history::url_for(&self.config, path)
    }

    /// Decide what a click on `anchor` should do.
    #[must_use]
    pub fn on_link_clicked(&self, anchor: &Anchor) -> LinkDecision {
        match link::internal_path(&self.config, anchor) {
            None => LinkDecision::Ignore,
            Some(_) if !self.is_active() => LinkDecision::Suppress,
            Some(path) => LinkDecision::Navigate(path),
        }
    }

    /// Handle a `popstate` event carrying `raw_state`.
    ///
    /// Restores the path and scroll offset of the entry without writing
    /// history. Entries without a readable state fall back to the location.
    ///
    /// # Errors
    /// Same as [`Router::goto_with`].
    pub async fn handle_popstate(&self, raw_state: Option<&str>) -> Result<Option<Navigation>> {
        if !self.is_active() {
            return Ok(None);
        }

        let state = raw_state
            .and_then(|raw| {
                HistoryState::decode(raw)
                    .map_err(|e| warn!(error = %e, "Ignoring unreadable history state"))
                    .ok()
            })
            .unwrap_or_else(|| HistoryState::new(self.path_from_location(), 0.0, 0.0));

        self.goto_with(
            &state.path,
            GotoOptions::restore(state.scroll_x, state.scroll_y),
        )
        .await
        .map(Some)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn resolve_and_render(
        &self,
        old_path: &str,
        mut path: String,
        options: GotoOptions,
    ) -> Result<Navigation> {
        let mut redirects = 0_usize;

        loop {
            let resolution = self.resolve_route(&path).await?;
            let redirect = self.apply_resolution(resolution, old_path, &path).await;
            self.history.scroll_to(options.scroll_x, options.scroll_y);

            let Some(next) = redirect else {
                return Ok(Navigation { path, redirects });
            };

            redirects = redirects.saturating_add(1);
            if redirects > self.config.max_redirects {
                error!(
                    path = %path,
                    limit = self.config.max_redirects,
                    "Redirect limit exceeded"
                );
                return Err(RouterError::RedirectLimit {
                    path,
                    limit: self.config.max_redirects,
                });
            }

            debug!(from = %path, to = %next, hops = redirects, "Following redirect");
            path = resolve_path(&path, &next);
        }
    }

    /// Find the first route matching `path` whose handler succeeds.
    ///
    /// A failing handler is skipped and the scan continues after it, which
    /// ends at the catch-all route.
    async fn resolve_route(&self, path: &str) -> Result<Resolution> {
        let mut from = 0_usize;

        loop {
            let candidate = self
                .routes
                .borrow()
                .find_from(from, path)
                .map(|(index, route, captures)| {
                    (
                        index,
                        route.id().map(str::to_string),
                        Rc::clone(route.handler()),
                        route.breadcrumb().to_vec(),
                        captures,
                    )
                });

            let Some((index, route_id, handler, breadcrumb, captures)) = candidate else {
                warn!(path, "No route matches path; a catch-all route must be registered last");
                return Err(RouterError::NoMatchingRoute {
                    path: path.to_string(),
                });
            };

            debug!(path, index, route_id = ?route_id, "Route matched");
            self.state.current_path.set(path.to_string());
            self.state.breadcrumb.set(breadcrumb);

            match handler(captures).await {
                Ok(resolution) => return Ok(resolution),
                Err(e) => {
                    warn!(
                        path,
                        index,
                        route_id = ?route_id,
                        error = %e,
                        "Route handler failed, trying next route"
                    );
                    from = index.saturating_add(1);
                }
            }
        }
    }

    /// Make the resolved screen current and render it unless it redirects.
    async fn apply_resolution(
        &self,
        resolution: Resolution,
        old_path: &str,
        new_path: &str,
    ) -> Option<String> {
        let screen = resolution.into_screen();

        self.mirror_title(screen.as_ref());

        let previous = self.current_screen.borrow_mut().take();
        if let Some(previous) = previous {
            previous.on_leave(old_path, new_path);
        }

        *self.current_screen.borrow_mut() = screen.clone();

        if let Some(screen) = &screen {
            if let Some(next) = screen
                .on_show(old_path, new_path)
                .await
                .filter(|next| !next.is_empty())
            {
                return Some(next);
            }
        }

        self.update_surfaces(screen.as_ref()).await;
        None
    }

    /// Keep exactly one title subscription, on the new screen.
    fn mirror_title(&self, screen: Option<&Rc<dyn Screen>>) {
        *self.title_subscription.borrow_mut() = None;

        match screen.and_then(|screen| screen.title()) {
            Some(title) => {
                self.state.current_title.set(title.get());
                let current_title = self.state.current_title.clone();
                let subscription =
                    title.subscribe(move |value: &String| current_title.set(value.clone()));
                *self.title_subscription.borrow_mut() = Some(subscription);
            }
            None => self.state.current_title.set(String::new()),
        }
    }

    /// Replace surface content strictly in registration order, each surface
    /// fully mounted before the next one is queried.
    async fn update_surfaces(&self, screen: Option<&Rc<dyn Screen>>) {
        let surface_ids = self.surfaces();

        for surface_id in surface_ids {
            if !self.surface_host.has_surface(&surface_id) {
                debug!(surface = %surface_id, "Surface not in document, skipping");
                continue;
            }

            self.surface_host.clear(&surface_id);

            let content = match screen {
                Some(screen) => screen.surface_content(&surface_id).await,
                None => None,
            };

            let Some(content) = content.filter(|content| !content.is_empty()) else {
                debug!(surface = %surface_id, "Surface left empty");
                continue;
            };

            let previous = self
                .surfaces
                .borrow_mut()
                .swap_classes(&surface_id, content.surface_classes.clone());
            self.surface_host.remove_classes(&surface_id, &previous);
            self.surface_host
                .add_classes(&surface_id, &content.surface_classes);

            match self.surface_host.mount(&surface_id, &content) {
                Ok(()) => debug!(
                    surface = %surface_id,
                    component = %content.component_name,
                    "Component mounted"
                ),
                Err(e) => error!(surface = %surface_id, error = %e, "Failed to mount component"),
            }
        }
    }

    async fn write_history(
        &self,
        old_path: &str,
        old_title: &str,
        old_scroll: (f64, f64),
        new_path: &str,
        options: GotoOptions,
    ) -> Result<()> {
        self.history.set_manual_scroll_restoration();

        // Remember where the user left the entry being navigated away from.
        // After a popstate the browser already sits on the destination entry.
        if let Some(raw) = self.history.state() {
            match HistoryState::decode(&raw) {
                Ok(mut state) if state.path == old_path => {
                    state.scroll_x = old_scroll.0;
                    state.scroll_y = old_scroll.1;
                    self.history
                        .replace_state(&state.encode()?, &self.url_for(old_path))?;
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Current history entry carries no router state"),
            }
        }

        if !(options.update_history && self.config.push_history) {
            return Ok(());
        }

        // The document title labels the current history entry. Restore the
        // old title until the new entry exists, then apply the new one.
        let new_title = self.history.document_title();
        self.history.set_document_title(old_title);
        self.history.sleep(self.config.title_delay()).await;

        let state = HistoryState::new(new_path, options.scroll_x, options.scroll_y).encode()?;
        let url = self.url_for(new_path);
        if old_path.is_empty() {
            self.history.replace_state(&state, &url)?;
        } else {
            self.history.push_state(&state, &url)?;
        }

        self.history.set_document_title(&new_title);
        Ok(())
    }

    fn set_loading(&self, loading: bool) {
        self.state.loading.set(loading);
        for surface_id in self.surfaces() {
            self.set_loading_class(&surface_id, loading);
        }
    }

    fn set_loading_class(&self, surface_id: &str, loading: bool) {
        if !self.surface_host.has_surface(surface_id) {
            return;
        }
        let class = [self.config.loading_class.clone()];
        if loading {
            self.surface_host.add_classes(surface_id, &class);
        } else {
            self.surface_host.remove_classes(surface_id, &class);
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("current_path", &self.state.current_path.get())
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}
