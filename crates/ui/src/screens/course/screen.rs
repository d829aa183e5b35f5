//! Screens of the course routes.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use buzz_router::{Observable, Screen, SurfaceContent};
use leptos::prelude::*;
use tracing::{debug, warn};

use super::manifest::{Course, PageTarget, PageType};
use super::Courses;
use crate::components::MAIN_SURFACE;
use crate::pages::{CoursePage, CourseTabs, TabLink};

/// Component showing the current course page.
pub const COURSE_PAGE_COMPONENT: &str = "course-screen-page";

/// Resolved by a course's catch-all once the manifest is loaded: expands
/// the course routes, then redirects to the same path so it is matched
/// again against the expanded table.
pub struct ExpandCourseScreen {
    plugin: Courses,
    course: Rc<Course>,
}

impl ExpandCourseScreen {
    #[must_use]
    pub fn new(plugin: Courses, course: Rc<Course>) -> Self {
        Self { plugin, course }
    }
}

#[async_trait(?Send)]
impl Screen for ExpandCourseScreen {
    async fn on_show(&self, _old_path: &str, new_path: &str) -> Option<String> {
        match self.plugin.insert_course_routes(&self.course) {
            Ok(()) => Some(new_path.to_string()),
            Err(e) => {
                warn!(course = %self.course.id, error = %e, "Failed to expand course routes");
                None
            }
        }
    }

    async fn surface_content(&self, _surface_id: &str) -> Option<SurfaceContent> {
        None
    }
}

/// One page (or sub-page) of a loaded course.
pub struct CourseScreen {
    plugin: Courses,
    course: Rc<Course>,
    page_key: String,
    subpage_key: String,
    title: Observable<String>,
    ready: Cell<bool>,
}

impl CourseScreen {
    #[must_use]
    pub fn new(plugin: Courses, course: Rc<Course>, page_key: String, subpage_key: String) -> Self {
        Self {
            plugin,
            course,
            page_key,
            subpage_key,
            title: Observable::default(),
            ready: Cell::new(false),
        }
    }

    fn tabs(&self, target: &PageTarget) -> Vec<TabLink> {
        let context = &self.plugin.context;
        target
            .page
            .pages
            .iter()
            .map(|(key, subpage)| TabLink {
                href: context.href(&format!("{}{}{key}", self.course.course_url, self.page_key)),
                title: if subpage.name.is_empty() {
                    key.trim_end_matches('/').to_string()
                } else {
                    subpage.name.clone()
                },
                active: *key == self.subpage_key,
            })
            .collect()
    }

    fn register_page(&self, target: &PageTarget, html: String) {
        let registry = &self.plugin.context.registry;
        match target.page_type {
            PageType::Single => registry.register(COURSE_PAGE_COMPONENT, move || {
                view! { <CoursePage html=html.clone() /> }.into_any()
            }),
            PageType::Tabs => {
                let tabs = self.tabs(target);
                let nav = self.plugin.subpage_nav(
                    &self.course,
                    &self.plugin.context.translator.language(),
                    &self.page_key,
                    &self.subpage_key,
                );
                let link_class = self.plugin.context.link_class();
                registry.register(COURSE_PAGE_COMPONENT, move || {
                    view! {
                        <CourseTabs
                            tabs=tabs.clone()
                            nav=nav.clone()
                            link_class=link_class.clone()
                            html=html.clone()
                        />
                    }
                    .into_any()
                });
            }
        }
    }
}

#[async_trait(?Send)]
impl Screen for CourseScreen {
    fn title(&self) -> Option<Observable<String>> {
        Some(self.title.clone())
    }

    async fn on_show(&self, _old_path: &str, _new_path: &str) -> Option<String> {
        let context = &self.plugin.context;
        let language = context.translator.language();

        let target = match self.course.target(&language, &self.page_key, &self.subpage_key) {
            Ok(target) => target,
            Err(e) => {
                warn!(course = %self.course.id, error = %e, "Invalid course definition");
                context.toasts.error(format!(
                    "{} {}",
                    context.tr("Error in the course definition."),
                    e.message(&context.translator)
                ));
                return None;
            }
        };

        self.title.set(target.title.clone());

        let url = format!("{}{}", self.course.content_url, target.content_file());
        let html = match context.fetch.text(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Page content unavailable");
                context.toasts.error(context.translator.translate_with(
                    "The page content could not be loaded. (Technical error: ${error})",
                    &[("error", e.reason().as_str())],
                ));
                return None;
            }
        };

        self.register_page(&target, html);
        self.ready.set(true);
        debug!(course = %self.course.id, page = %self.page_key, subpage = %self.subpage_key, "Course page ready");
        None
    }

    fn on_leave(&self, _old_path: &str, new_path: &str) {
        if !new_path.starts_with(&self.course.course_url) {
            if let Err(e) = self.plugin.remove_course_routes(&self.course.id) {
                warn!(course = %self.course.id, error = %e, "Failed to collapse course routes");
            }
        }

        if self.ready.get() {
            self.plugin.context.registry.unregister(COURSE_PAGE_COMPONENT);
        }
    }

    async fn surface_content(&self, surface_id: &str) -> Option<SurfaceContent> {
        (self.ready.get() && surface_id == MAIN_SURFACE)
            .then(|| SurfaceContent::new(COURSE_PAGE_COMPONENT))
    }
}
