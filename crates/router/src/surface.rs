//! Surfaces: DOM mount points whose content the router swaps.
//!
//! Registration order is update order. A surface may live inside the content
//! of another one, so the outer surface must always be replaced first.

use std::collections::HashMap;

use crate::error::Result;
use crate::screen::SurfaceContent;

/// DOM operations the router needs on surfaces.
///
/// Implemented on top of the real document by the browser front-end and in
/// memory by [`crate::memory::MemoryHost`].
pub trait SurfaceHost {
    /// Whether the mount point currently exists in the document.
    fn has_surface(&self, surface_id: &str) -> bool;

    /// Remove all mounted content from the surface.
    fn clear(&self, surface_id: &str);

    fn add_classes(&self, surface_id: &str, classes: &[String]);

    fn remove_classes(&self, surface_id: &str, classes: &[String]);

    /// Create a child element for the component and mount it.
    ///
    /// # Errors
    /// Returns `RouterError::Mount` if the component cannot be mounted.
    fn mount(&self, surface_id: &str, content: &SurfaceContent) -> Result<()>;
}

/// Ordered surface registrations with the classes applied to each.
#[derive(Debug, Clone, Default)]
pub struct SurfaceList {
    order: Vec<String>,
    applied_classes: HashMap<String, Vec<String>>,
}

impl SurfaceList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, surface_id: impl Into<String>) {
        let surface_id = surface_id.into();
        self.applied_classes.insert(surface_id.clone(), Vec::new());
        self.order.push(surface_id);
    }

    pub fn remove(&mut self, surface_id: &str) {
        self.order.retain(|id| id != surface_id);
        self.applied_classes.remove(surface_id);
    }

    /// Surface ids in update order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Replace the whole list, keeping the class bookkeeping of survivors.
    pub fn set_ids(&mut self, ids: Vec<String>) {
        self.applied_classes.retain(|id, _| ids.contains(id));
        for id in &ids {
            self.applied_classes.entry(id.clone()).or_default();
        }
        self.order = ids;
    }

    /// Classes currently applied to the surface by screen content.
    #[must_use]
    pub fn applied_classes(&self, surface_id: &str) -> &[String] {
        self.applied_classes
            .get(surface_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Record `classes` as applied and return the ones they replace.
    pub fn swap_classes(&mut self, surface_id: &str, classes: Vec<String>) -> Vec<String> {
        self.applied_classes
            .insert(surface_id.to_string(), classes)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_registration_order() {
        let mut surfaces = SurfaceList::new();
        surfaces.add("outer");
        surfaces.add("inner");
        assert_eq!(surfaces.ids(), ["outer".to_string(), "inner".to_string()]);

        surfaces.remove("outer");
        assert_eq!(surfaces.ids(), ["inner".to_string()]);
    }

    #[test]
    fn should_track_applied_classes() {
        let mut surfaces = SurfaceList::new();
        surfaces.add("main-content");

        let previous = surfaces.swap_classes("main-content", vec!["fullscreen".to_string()]);
        assert!(previous.is_empty());

        let previous = surfaces.swap_classes("main-content", Vec::new());
        assert_eq!(previous, vec!["fullscreen".to_string()]);
        assert!(surfaces.applied_classes("main-content").is_empty());
    }

    #[test]
    fn should_drop_bookkeeping_for_replaced_ids() {
        let mut surfaces = SurfaceList::new();
        surfaces.add("a");
        surfaces.swap_classes("a", vec!["x".to_string()]);
        surfaces.set_ids(vec!["b".to_string()]);
        assert!(surfaces.applied_classes("a").is_empty());
        assert_eq!(surfaces.ids(), ["b".to_string()]);
    }
}
