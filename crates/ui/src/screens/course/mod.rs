//! Course screens
//!
//! A course starts out as a single catch-all route. The first visit loads
//! its manifest and replaces that route, at the same position, with one
//! exact route per page followed by a course-local 404. Leaving the course
//! collapses the expansion again.

pub mod manifest;
pub mod screen;

use std::rc::Rc;

use buzz_router::{handler, Crumb, Handler, Resolution, Route};
use tracing::{debug, info, warn};

use super::{NotFoundScreens, ScreenPlugin};
use crate::context::AppContext;
use crate::error::{Result, UiError};
use crate::pages::{NavLink, SubpageNav};

pub use manifest::{Course, DefinitionError, Manifest, Page, PageTarget, PageType};
pub use screen::{CourseScreen, ExpandCourseScreen, COURSE_PAGE_COMPONENT};

/// File name of the manifest inside a course directory.
pub const MANIFEST_FILE: &str = "course.json";

#[derive(Debug, Clone)]
pub struct Courses {
    context: AppContext,
    not_found: NotFoundScreens,
}

impl Courses {
    #[must_use]
    pub fn new(context: AppContext, not_found: NotFoundScreens) -> Self {
        Self { context, not_found }
    }

    /// The unexpanded route of a course, which loads its manifest.
    ///
    /// # Errors
    /// Returns `UiError::Router` if the course id yields an invalid pattern.
    pub fn catch_all_route(&self, course_id: &str) -> Result<Route> {
        let pattern = format!("^{}.*", regex::escape(&Course::url(course_id)));
        Ok(Route::new(&pattern, self.load_handler(course_id))?.with_id(Course::route_id(course_id)))
    }

    fn load_handler(&self, course_id: &str) -> Handler {
        let plugin = self.clone();
        let course_id = course_id.to_string();
        handler(move |_| {
            let plugin = plugin.clone();
            let course_id = course_id.clone();
            async move { Ok(plugin.load(&course_id).await) }
        })
    }

    async fn load(&self, course_id: &str) -> Resolution {
        match self.load_course(course_id).await {
            Ok(course) => {
                info!(course = %course.id, "Course definition loaded");
                Resolution::instance(ExpandCourseScreen::new(self.clone(), Rc::new(course)))
            }
            Err(e) => {
                warn!(course = %course_id, error = %e, "Course definition unavailable");
                self.context.toasts.error(self.context.translator.translate_with(
                    "The course definition could not be loaded. (Technical error: ${error})",
                    &[("error", e.reason().as_str())],
                ));
                self.not_found.resolution()
            }
        }
    }

    /// Fetch and clean the manifest of a course.
    ///
    /// # Errors
    /// Returns `UiError::Fetch` or `UiError::Manifest`.
    pub async fn load_course(&self, course_id: &str) -> Result<Course> {
        let content_url = self.context.config.course_content_url(course_id);
        let json = self
            .context
            .fetch
            .text(&format!("{content_url}{MANIFEST_FILE}"))
            .await?;
        let manifest = Manifest::parse(course_id, &json)?;
        Ok(Course::new(course_id, manifest, content_url))
    }

    /// Routes replacing the catch-all of a loaded course.
    ///
    /// # Errors
    /// Returns `UiError::Router` if a page key yields an invalid pattern.
    pub fn expanded_routes(&self, course: &Rc<Course>) -> Result<Vec<Route>> {
        let route_id = Course::route_id(&course.id);
        let base = regex::escape(&course.course_url);
        let language = self.context.translator.language();

        let mut routes = Vec::new();
        for (page_key, subpage_key) in course.manifest.route_targets() {
            let pattern = format!(
                "^{base}{}{}$",
                regex::escape(&page_key),
                regex::escape(&subpage_key)
            );
            let breadcrumb = self.breadcrumb(course, &language, &page_key, &subpage_key);
            let page_handler = self.page_handler(course, page_key, subpage_key);

            routes.push(
                Route::new(&pattern, page_handler)?
                    .with_id(route_id.clone())
                    .with_breadcrumb(breadcrumb),
            );
        }

        routes.push(Route::new(&format!("^{base}.*"), self.not_found.handler())?.with_id(route_id));
        Ok(routes)
    }

    fn page_handler(&self, course: &Rc<Course>, page_key: String, subpage_key: String) -> Handler {
        let plugin = self.clone();
        let course = Rc::clone(course);
        handler(move |_| {
            let screen = CourseScreen::new(
                plugin.clone(),
                Rc::clone(&course),
                page_key.clone(),
                subpage_key.clone(),
            );
            async move { Ok(Resolution::instance(screen)) }
        })
    }

    fn breadcrumb(
        &self,
        course: &Course,
        language: &str,
        page_key: &str,
        subpage_key: &str,
    ) -> Vec<Crumb> {
        let mut crumbs = vec![Crumb::new(&course.course_url, course.name(language))];

        let Some(page) = course.manifest.page(language, page_key) else {
            return crumbs;
        };
        let page_url = format!("{}{page_key}", course.course_url);
        if !page_key.is_empty() {
            crumbs.push(Crumb::new(&page_url, crumb_title(&page.name, page_key)));
        }

        if let Some(subpage) = page.subpage(subpage_key).filter(|_| !subpage_key.is_empty()) {
            crumbs.push(Crumb::new(
                format!("{page_url}{subpage_key}"),
                crumb_title(&subpage.name, subpage_key),
            ));
        }

        crumbs
    }

    /// Links to the sub-pages before and after `subpage_key`, labelled
    /// "Previous: <name>" and "Next: <name>".
    #[must_use]
    pub fn subpage_nav(
        &self,
        course: &Course,
        language: &str,
        page_key: &str,
        subpage_key: &str,
    ) -> SubpageNav {
        let Some(page) = course.manifest.page(language, page_key) else {
            return SubpageNav::default();
        };
        let Some(index) = page.pages.iter().position(|(key, _)| key == subpage_key) else {
            return SubpageNav::default();
        };

        let link = |neighbour: Option<&(String, Page)>, label: &str| {
            neighbour.map(|(key, subpage)| NavLink {
                href: self
                    .context
                    .href(&format!("{}{page_key}{key}", course.course_url)),
                label: format!("{}: {}", self.context.tr(label), crumb_title(&subpage.name, key)),
            })
        };

        SubpageNav {
            previous: link(
                index.checked_sub(1).and_then(|i| page.pages.get(i)),
                "Previous",
            ),
            next: link(page.pages.get(index.saturating_add(1)), "Next"),
        }
    }

    /// Swap the course's catch-all for its expanded routes.
    ///
    /// # Errors
    /// Returns `UiError::RouterGone` during shutdown, or `UiError::Router`
    /// if a route cannot be built.
    pub fn insert_course_routes(&self, course: &Rc<Course>) -> Result<()> {
        let routes = self.expanded_routes(course)?;
        let router = self.context.router().ok_or(UiError::RouterGone)?;
        debug!(course = %course.id, routes = routes.len(), "Expanding course routes");
        router.with_routes(|table| table.replace(&Course::route_id(&course.id), routes));
        Ok(())
    }

    /// Collapse a course back to its catch-all.
    ///
    /// # Errors
    /// See [`Courses::insert_course_routes`].
    pub fn remove_course_routes(&self, course_id: &str) -> Result<()> {
        let route = self.catch_all_route(course_id)?;
        let router = self.context.router().ok_or(UiError::RouterGone)?;
        debug!(course = %course_id, "Collapsing course routes");
        router.with_routes(|table| table.replace(&Course::route_id(course_id), vec![route]));
        Ok(())
    }
}

/// Page name, or the key without its trailing slash.
fn crumb_title(name: &str, key: &str) -> String {
    if name.is_empty() {
        key.trim_end_matches('/').to_string()
    } else {
        name.to_string()
    }
}

impl ScreenPlugin for Courses {
    fn name(&self) -> &'static str {
        "courses"
    }

    fn routes(&self) -> Result<Vec<Route>> {
        let mut routes = self
            .context
            .config
            .courses
            .iter()
            .map(|id| self.catch_all_route(id))
            .collect::<Result<Vec<_>>>()?;
        routes.push(Route::new("^/course/.*", self.not_found.handler())?);
        Ok(routes)
    }
}
