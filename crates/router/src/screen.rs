//! Screen contract.
//!
//! A screen is a navigable unit of content. The router asks it for the
//! component to mount into each surface and drives its lifecycle:
//! `on_show` once when it becomes current, `on_leave` once when the next
//! navigation replaces it. Screens are never cached by the router.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::observable::Observable;

/// What to mount into one surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceContent {
    /// Name of the component to mount.
    pub component_name: String,
    /// CSS classes for the surface element itself.
    pub surface_classes: Vec<String>,
    /// CSS classes for the element the component is mounted into.
    pub component_classes: Vec<String>,
}

impl SurfaceContent {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_surface_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.surface_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_component_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether there is anything to mount.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.component_name.is_empty()
    }
}

/// Lifecycle contract of a screen.
///
/// Only [`Screen::surface_content`] is required.
#[async_trait(?Send)]
pub trait Screen {
    /// Display title, mirrored by the router into its current title.
    fn title(&self) -> Option<Observable<String>> {
        None
    }

    /// Called when the screen becomes current. Returning a path redirects
    /// the navigation there instead of rendering this screen.
    async fn on_show(&self, _old_path: &str, _new_path: &str) -> Option<String> {
        None
    }

    /// Called when a later navigation replaces this screen.
    fn on_leave(&self, _old_path: &str, _new_path: &str) {}

    /// Content for the surface with the given id, or `None` to leave it empty.
    async fn surface_content(&self, surface_id: &str) -> Option<SurfaceContent>;
}

/// Screen backed by a fixed surface → content table.
#[derive(Debug, Default)]
pub struct StaticScreen {
    content: HashMap<String, SurfaceContent>,
    title: Observable<String>,
}

impl StaticScreen {
    #[must_use]
    pub fn new(content: HashMap<String, SurfaceContent>) -> Self {
        Self {
            content,
            title: Observable::default(),
        }
    }

    /// Add or replace the content of one surface.
    #[must_use]
    pub fn with_surface(mut self, surface_id: impl Into<String>, content: SurfaceContent) -> Self {
        self.content.insert(surface_id.into(), content);
        self
    }

    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.title.set(title.into());
        self
    }

    /// The title observable, for screens that update it later.
    #[must_use]
    pub fn title_handle(&self) -> Observable<String> {
        self.title.clone()
    }
}

#[async_trait(?Send)]
impl Screen for StaticScreen {
    fn title(&self) -> Option<Observable<String>> {
        Some(self.title.clone())
    }

    async fn surface_content(&self, surface_id: &str) -> Option<SurfaceContent> {
        self.content.get(surface_id).cloned()
    }
}

/// Screen that immediately redirects to a fixed path.
#[derive(Debug, Clone)]
pub struct RedirectScreen {
    path: String,
}

impl RedirectScreen {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.path
    }
}

#[async_trait(?Send)]
impl Screen for RedirectScreen {
    async fn on_show(&self, _old_path: &str, _new_path: &str) -> Option<String> {
        Some(self.path.clone())
    }

    async fn surface_content(&self, _surface_id: &str) -> Option<SurfaceContent> {
        None
    }
}
