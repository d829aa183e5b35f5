//! Routes and the ordered route table.
//!
//! Order is significant: the first route whose pattern matches wins. The
//! table is mutable at any time, including while a navigation is in flight,
//! so that a handler can expand a catch-all route into specific ones and let
//! the router match the same path again.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use regex::Regex;

use crate::error::{HandlerError, Result, RouterError};
use crate::observable::Observable;
use crate::screen::Screen;

/// Capture groups of a matched route pattern, whole match excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(Vec<Option<String>>);

impl Captures {
    #[must_use]
    pub fn new(groups: Vec<Option<String>>) -> Self {
        Self(groups)
    }

    /// Group `index` (0-based, first capture group is 0).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|group| group.as_deref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What a route handler resolved to.
#[derive(Clone)]
pub enum Resolution {
    /// Nothing to show; every surface is left empty.
    None,
    /// A ready screen instance.
    Instance(Rc<dyn Screen>),
    /// A constructor invoked once by the router.
    Factory(Rc<dyn Fn() -> Rc<dyn Screen>>),
}

impl Resolution {
    pub fn instance(screen: impl Screen + 'static) -> Self {
        Self::Instance(Rc::new(screen))
    }

    pub fn factory<S, F>(make: F) -> Self
    where
        S: Screen + 'static,
        F: Fn() -> S + 'static,
    {
        Self::Factory(Rc::new(move || Rc::new(make()) as Rc<dyn Screen>))
    }

    /// Normalize to the screen that becomes current.
    #[must_use]
    pub fn into_screen(self) -> Option<Rc<dyn Screen>> {
        match self {
            Self::None => None,
            Self::Instance(screen) => Some(screen),
            Self::Factory(make) => Some(make()),
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("Resolution::None"),
            Self::Instance(_) => f.write_str("Resolution::Instance"),
            Self::Factory(_) => f.write_str("Resolution::Factory"),
        }
    }
}

/// Result of a route handler.
pub type HandlerResult = std::result::Result<Resolution, HandlerError>;

/// Route handler: invoked with the capture groups, resolves the screen.
pub type Handler = Rc<dyn Fn(Captures) -> LocalBoxFuture<'static, HandlerResult>>;

/// Wrap an async closure into a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Captures) -> Fut + 'static,
    Fut: Future<Output = HandlerResult> + 'static,
{
    Rc::new(move |captures| f(captures).boxed_local())
}

/// Title of a breadcrumb entry.
#[derive(Debug, Clone)]
pub enum CrumbTitle {
    Static(String),
    Observed(Observable<String>),
}

impl CrumbTitle {
    /// Current text of the title.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Observed(value) => value.get(),
        }
    }
}

/// One breadcrumb entry.
#[derive(Debug, Clone)]
pub struct Crumb {
    pub path: String,
    pub title: CrumbTitle,
}

impl Crumb {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: CrumbTitle::Static(title.into()),
        }
    }

    pub fn observed(path: impl Into<String>, title: Observable<String>) -> Self {
        Self {
            path: path.into(),
            title: CrumbTitle::Observed(title),
        }
    }
}

/// Pattern → handler binding.
#[derive(Clone)]
pub struct Route {
    id: Option<String>,
    pattern: Regex,
    handler: Handler,
    breadcrumb: Vec<Crumb>,
}

impl Route {
    /// Build a route from a regular expression source.
    ///
    /// # Errors
    /// Returns `RouterError::InvalidPattern` if `pattern` does not compile.
    pub fn new(pattern: &str, handler: Handler) -> Result<Self> {
        let pattern =
            Regex::new(pattern).map_err(|e| RouterError::invalid_pattern(pattern, e.to_string()))?;
        Ok(Self::from_regex(pattern, handler))
    }

    #[must_use]
    pub fn from_regex(pattern: Regex, handler: Handler) -> Self {
        Self {
            id: None,
            pattern,
            handler,
            breadcrumb: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_breadcrumb(mut self, breadcrumb: Vec<Crumb>) -> Self {
        self.breadcrumb = breadcrumb;
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    #[must_use]
    pub fn breadcrumb(&self) -> &[Crumb] {
        &self.breadcrumb
    }

    /// Match `path` against the pattern, returning the capture groups.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Captures> {
        self.pattern.captures(path).map(|caps| {
            Captures::new(
                caps.iter()
                    .skip(1)
                    .map(|group| group.map(|m| m.as_str().to_string()))
                    .collect(),
            )
        })
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("pattern", &self.pattern.as_str())
            .field("breadcrumb", &self.breadcrumb.len())
            .finish_non_exhaustive()
    }
}

/// Ordered list of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Patterns and ids are not checked for uniqueness.
    pub fn add(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Remove every route carrying `id`. No-op if none does.
    pub fn remove(&mut self, id: &str) {
        self.routes.retain(|route| route.id() != Some(id));
    }

    /// Index of the first route carrying `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.routes.iter().position(|route| route.id() == Some(id))
    }

    /// Remove every route carrying `id` and insert `replacement` where the
    /// first of them stood (or at the end if there was none).
    ///
    /// The relative order of all other routes is preserved.
    pub fn replace(&mut self, id: &str, replacement: Vec<Route>) {
        let index = self.position(id);
        self.remove(id);
        let index = index.unwrap_or(self.routes.len()).min(self.routes.len());
        self.routes.splice(index..index, replacement);
    }

    /// The live route list.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Direct mutable access for callers that splice at a specific index.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    pub fn set_routes(&mut self, routes: Vec<Route>) {
        self.routes = routes;
    }

    /// First route matching `path`, starting at index `from`.
    #[must_use]
    pub fn find_from(&self, from: usize, path: &str) -> Option<(usize, &Route, Captures)> {
        self.routes
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(index, route)| route.matches(path).map(|caps| (index, route, caps)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn noop() -> Handler {
        handler(|_| async { Ok(Resolution::None) })
    }

    fn route(pattern: &str, id: Option<&str>) -> Route {
        let route = Route::new(pattern, noop()).unwrap();
        match id {
            Some(id) => route.with_id(id),
            None => route,
        }
    }

    fn patterns(table: &RouteTable) -> Vec<String> {
        table.routes().iter().map(|r| r.pattern().to_string()).collect()
    }

    #[test]
    fn should_reject_invalid_pattern() {
        let result = Route::new("(unclosed", noop());
        assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
    }

    #[test]
    fn should_return_capture_groups() {
        let route = route(r"^/course/([^/]+)/(.*)$", None);
        let caps = route.matches("/course/example/intro/").unwrap();
        assert_eq!(caps.get(0), Some("example"));
        assert_eq!(caps.get(1), Some("intro/"));
        assert_eq!(caps.len(), 2);
        assert!(route.matches("/home").is_none());
    }

    #[test]
    fn should_find_first_match_in_order() {
        let mut table = RouteTable::new();
        table.add(route("^/x$", Some("x")));
        table.add(route(".*", None));

        let (index, found, _) = table.find_from(0, "/x").unwrap();
        assert_eq!(index, 0);
        assert_eq!(found.id(), Some("x"));

        let (index, _, _) = table.find_from(1, "/x").unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn should_remove_all_routes_with_id() {
        let mut table = RouteTable::new();
        table.add(route("^/a$", Some("course")));
        table.add(route("^/b$", None));
        table.add(route("^/c$", Some("course")));

        table.remove("course");
        assert_eq!(patterns(&table), vec!["^/b$"]);

        table.remove("unknown");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn should_replace_at_former_index_preserving_other_routes() {
        let mut table = RouteTable::new();
        table.add(route("^/$", Some("home")));
        table.add(route("^/course/example/.*", Some("course example")));
        table.add(route("^/course/.*", None));
        table.add(route(".*", None));

        table.replace(
            "course example",
            vec![
                route("^/course/example/intro/$", Some("course example")),
                route("^/course/example/.*", Some("course example")),
            ],
        );

        assert_eq!(
            patterns(&table),
            vec![
                "^/$",
                "^/course/example/intro/$",
                "^/course/example/.*",
                "^/course/.*",
                ".*",
            ]
        );
    }

    #[test]
    fn should_append_replacement_when_id_absent() {
        let mut table = RouteTable::new();
        table.add(route(".*", None));
        table.replace("missing", vec![route("^/new$", Some("missing"))]);
        assert_eq!(patterns(&table), vec![".*", "^/new$"]);
    }

    #[test]
    fn should_normalize_resolution() {
        use crate::screen::RedirectScreen;

        assert!(Resolution::None.into_screen().is_none());
        assert!(Resolution::instance(RedirectScreen::new("/")).into_screen().is_some());
        assert!(
            Resolution::factory(|| RedirectScreen::new("/"))
                .into_screen()
                .is_some()
        );
    }

    #[test]
    fn should_read_crumb_titles() {
        let title = Observable::new("Kurs".to_string());
        let crumbs = [Crumb::new("/", "Home"), Crumb::observed("/course/", title.clone())];
        assert_eq!(crumbs[0].title.text(), "Home");
        title.set("Course".to_string());
        assert_eq!(crumbs[1].title.text(), "Course");
    }
}
