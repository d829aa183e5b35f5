//! [`SurfaceHost`] over the live document.
//!
//! Each mount creates a child element named after the component and mounts
//! the registered Leptos view into it. The unmount handles are kept per
//! surface; clearing a surface drops them before emptying the element.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use buzz_router::{Result, RouterError, SurfaceContent, SurfaceHost};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, DomTokenList, Element, HtmlElement};

use crate::components::ComponentRegistry;

pub struct DomSurfaces {
    document: Document,
    registry: Rc<ComponentRegistry>,
    mounted: RefCell<HashMap<String, Vec<Box<dyn Any>>>>,
}

impl DomSurfaces {
    #[must_use]
    pub fn new(document: Document, registry: Rc<ComponentRegistry>) -> Self {
        Self {
            document,
            registry,
            mounted: RefCell::new(HashMap::new()),
        }
    }

    fn surface(&self, surface_id: &str) -> Option<Element> {
        self.document.get_element_by_id(surface_id)
    }

    fn update_classes(
        &self,
        surface_id: &str,
        classes: &[String],
        update: impl Fn(&DomTokenList, &str) -> std::result::Result<(), wasm_bindgen::JsValue>,
    ) {
        let Some(surface) = self.surface(surface_id) else {
            return;
        };
        let class_list = surface.class_list();
        for class in classes.iter().filter(|class| !class.is_empty()) {
            if let Err(e) = update(&class_list, class) {
                warn!(surface = %surface_id, class = %class, error = ?e, "Cannot update surface class");
            }
        }
    }
}

impl SurfaceHost for DomSurfaces {
    fn has_surface(&self, surface_id: &str) -> bool {
        self.surface(surface_id).is_some()
    }

    fn clear(&self, surface_id: &str) {
        let handles = self.mounted.borrow_mut().remove(surface_id);
        drop(handles);

        if let Some(surface) = self.surface(surface_id) {
            surface.set_inner_html("");
        }
    }

    fn add_classes(&self, surface_id: &str, classes: &[String]) {
        self.update_classes(surface_id, classes, DomTokenList::add_1);
    }

    fn remove_classes(&self, surface_id: &str, classes: &[String]) {
        self.update_classes(surface_id, classes, DomTokenList::remove_1);
    }

    fn mount(&self, surface_id: &str, content: &SurfaceContent) -> Result<()> {
        let component = content.component_name.as_str();
        let fail = |reason: String| RouterError::mount(surface_id, component, reason);

        let view = self
            .registry
            .view_fn(component)
            .ok_or_else(|| fail("component is not registered".to_string()))?;
        let surface = self
            .surface(surface_id)
            .ok_or_else(|| fail("surface is not in the document".to_string()))?;

        let element = self
            .document
            .create_element(component)
            .map_err(|e| fail(format!("{e:?}")))?;
        element.set_class_name(&content.component_classes.join(" "));
        surface
            .append_child(&element)
            .map_err(|e| fail(format!("{e:?}")))?;
        let element: HtmlElement = element
            .dyn_into()
            .map_err(|_| fail("component element is not an HTML element".to_string()))?;

        let handle = leptos::mount::mount_to(element, move || view());
        self.mounted
            .borrow_mut()
            .entry(surface_id.to_string())
            .or_default()
            .push(Box::new(handle));
        Ok(())
    }
}
