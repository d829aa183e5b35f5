//! Named view constructors
//!
//! Screens refer to their content by component name only. The DOM surface
//! host looks the name up here when it mounts a surface, so screens can
//! register a component right before they are rendered (the course screen
//! does so for every page).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use leptos::prelude::AnyView;
use tracing::debug;

/// Builds a fresh view each time the component is mounted.
pub type ViewFn = Rc<dyn Fn() -> AnyView>;

#[derive(Default)]
pub struct ComponentRegistry {
    components: RefCell<HashMap<String, ViewFn>>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `view` under `name`, replacing any earlier registration.
    pub fn register(&self, name: impl Into<String>, view: impl Fn() -> AnyView + 'static) {
        let name = name.into();
        debug!(component = %name, "Registering component");
        self.components.borrow_mut().insert(name, Rc::new(view));
    }

    pub fn unregister(&self, name: &str) {
        if self.components.borrow_mut().remove(name).is_some() {
            debug!(component = name, "Unregistered component");
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.borrow().contains_key(name)
    }

    /// The constructor registered under `name`. The registry borrow is
    /// released before the caller builds the view.
    #[must_use]
    pub fn view_fn(&self, name: &str) -> Option<ViewFn> {
        self.components.borrow().get(name).cloned()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.components.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use leptos::prelude::*;

    #[test]
    fn given_registration_when_replaced_then_single_entry() {
        let registry = ComponentRegistry::new();
        registry.register("course-screen-page", || ().into_any());
        registry.register("course-screen-page", || ().into_any());

        assert_eq!(registry.names(), vec!["course-screen-page"]);
        assert!(registry.view_fn("course-screen-page").is_some());
    }

    #[test]
    fn given_unregistered_name_then_no_view() {
        let registry = ComponentRegistry::new();
        registry.register("the-404-screen-main", || ().into_any());
        registry.unregister("the-404-screen-main");
        registry.unregister("never-registered");

        assert!(!registry.contains("the-404-screen-main"));
        assert!(registry.view_fn("the-404-screen-main").is_none());
    }
}
