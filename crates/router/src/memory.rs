//! In-memory host for headless navigation.
//!
//! Implements both [`SurfaceHost`] and [`HistoryHost`] without a browser,
//! recording every operation so callers can inspect what a navigation did.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::error::Result;
use crate::history::{HistoryHost, Location};
use crate::screen::SurfaceContent;
use crate::surface::SurfaceHost;

/// A component mounted into a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedComponent {
    pub name: String,
    pub classes: Vec<String>,
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: Option<String>,
    pub url: String,
}

/// Operation performed on the host, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Cleared(String),
    Mounted { surface: String, component: String },
    Pushed(String),
    Replaced(String),
    TitleSet(String),
    ScrolledTo(f64, f64),
    Slept(Duration),
}

#[derive(Debug, Default)]
struct Surface {
    classes: Vec<String>,
    children: Vec<MountedComponent>,
}

#[derive(Debug, Default)]
struct State {
    surfaces: HashMap<String, Surface>,
    entries: Vec<HistoryEntry>,
    index: usize,
    title: String,
    scroll: (f64, f64),
    manual_scroll_restoration: bool,
    events: Vec<HostEvent>,
}

/// Headless host.
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: RefCell<State>,
}

impl MemoryHost {
    /// Host whose single history entry points at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        let host = Self::default();
        host.state.borrow_mut().entries.push(HistoryEntry {
            state: None,
            url: url.into(),
        });
        host
    }

    /// Make a mount point with the given id exist.
    #[must_use]
    pub fn with_surface(self, surface_id: impl Into<String>) -> Self {
        self.create_surface(surface_id);
        self
    }

    pub fn create_surface(&self, surface_id: impl Into<String>) {
        self.state
            .borrow_mut()
            .surfaces
            .insert(surface_id.into(), Surface::default());
    }

    /// Components currently mounted in the surface.
    #[must_use]
    pub fn mounted(&self, surface_id: &str) -> Vec<MountedComponent> {
        self.state
            .borrow()
            .surfaces
            .get(surface_id)
            .map(|surface| surface.children.clone())
            .unwrap_or_default()
    }

    /// Classes on the surface element.
    #[must_use]
    pub fn classes(&self, surface_id: &str) -> Vec<String> {
        self.state
            .borrow()
            .surfaces
            .get(surface_id)
            .map(|surface| surface.classes.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.state.borrow().entries.clone()
    }

    /// The current history entry.
    #[must_use]
    pub fn current_entry(&self) -> Option<HistoryEntry> {
        let state = self.state.borrow();
        state.entries.get(state.index).cloned()
    }

    #[must_use]
    pub fn events(&self) -> Vec<HostEvent> {
        self.state.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    #[must_use]
    pub fn manual_scroll_restoration(&self) -> bool {
        self.state.borrow().manual_scroll_restoration
    }

    /// Simulate the user scrolling the window.
    pub fn set_scroll(&self, x: f64, y: f64) {
        self.state.borrow_mut().scroll = (x, y);
    }

    /// Step back one entry, returning the state a popstate event would carry.
    ///
    /// Returns `None` when already at the first entry.
    pub fn back(&self) -> Option<Option<String>> {
        let mut state = self.state.borrow_mut();
        let index = state.index.checked_sub(1)?;
        state.index = index;
        state.entries.get(index).map(|entry| entry.state.clone())
    }

    /// Step forward one entry, returning the state a popstate event would carry.
    pub fn forward(&self) -> Option<Option<String>> {
        let mut state = self.state.borrow_mut();
        let index = state.index.checked_add(1)?;
        let entry = state.entries.get(index).map(|entry| entry.state.clone())?;
        state.index = index;
        Some(entry)
    }

    fn record(&self, event: HostEvent) {
        self.state.borrow_mut().events.push(event);
    }
}

impl SurfaceHost for MemoryHost {
    fn has_surface(&self, surface_id: &str) -> bool {
        self.state.borrow().surfaces.contains_key(surface_id)
    }

    fn clear(&self, surface_id: &str) {
        if let Some(surface) = self.state.borrow_mut().surfaces.get_mut(surface_id) {
            surface.children.clear();
        }
        self.record(HostEvent::Cleared(surface_id.to_string()));
    }

    fn add_classes(&self, surface_id: &str, classes: &[String]) {
        if let Some(surface) = self.state.borrow_mut().surfaces.get_mut(surface_id) {
            for class in classes {
                if !surface.classes.contains(class) {
                    surface.classes.push(class.clone());
                }
            }
        }
    }

    fn remove_classes(&self, surface_id: &str, classes: &[String]) {
        if let Some(surface) = self.state.borrow_mut().surfaces.get_mut(surface_id) {
            surface.classes.retain(|class| !classes.contains(class));
        }
    }

    fn mount(&self, surface_id: &str, content: &SurfaceContent) -> Result<()> {
        if let Some(surface) = self.state.borrow_mut().surfaces.get_mut(surface_id) {
            surface.children.push(MountedComponent {
                name: content.component_name.clone(),
                classes: content.component_classes.clone(),
            });
        }
        self.record(HostEvent::Mounted {
            surface: surface_id.to_string(),
            component: content.component_name.clone(),
        });
        Ok(())
    }
}

impl HistoryHost for MemoryHost {
    fn location(&self) -> Location {
        let state = self.state.borrow();
        let url = state
            .entries
            .get(state.index)
            .map(|entry| entry.url.as_str())
            .unwrap_or("/");
        match url.split_once('#') {
            Some((pathname, hash)) => Location::new(pathname, format!("#{hash}")),
            None => Location::new(url, ""),
        }
    }

    fn state(&self) -> Option<String> {
        self.current_entry().and_then(|entry| entry.state)
    }

    fn push_state(&self, state: &str, url: &str) -> Result<()> {
        {
            let mut inner = self.state.borrow_mut();
            let keep = inner.index.saturating_add(1).min(inner.entries.len());
            inner.entries.truncate(keep);
            inner.entries.push(HistoryEntry {
                state: Some(state.to_string()),
                url: url.to_string(),
            });
            inner.index = inner.entries.len().saturating_sub(1);
        }
        self.record(HostEvent::Pushed(url.to_string()));
        Ok(())
    }

    fn replace_state(&self, state: &str, url: &str) -> Result<()> {
        {
            let mut inner = self.state.borrow_mut();
            let index = inner.index;
            let entry = HistoryEntry {
                state: Some(state.to_string()),
                url: url.to_string(),
            };
            match inner.entries.get_mut(index) {
                Some(slot) => *slot = entry,
                None => inner.entries.push(entry),
            }
        }
        self.record(HostEvent::Replaced(url.to_string()));
        Ok(())
    }

    fn document_title(&self) -> String {
        self.state.borrow().title.clone()
    }

    fn set_document_title(&self, title: &str) {
        self.state.borrow_mut().title = title.to_string();
        self.record(HostEvent::TitleSet(title.to_string()));
    }

    fn scroll_position(&self) -> (f64, f64) {
        self.state.borrow().scroll
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.state.borrow_mut().scroll = (x, y);
        self.record(HostEvent::ScrolledTo(x, y));
    }

    fn set_manual_scroll_restoration(&self) {
        self.state.borrow_mut().manual_scroll_restoration = true;
    }

    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        self.record(HostEvent::Slept(delay));
        future::ready(()).boxed_local()
    }
}
