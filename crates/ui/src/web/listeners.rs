//! Window-level link and history listeners.
//!
//! Clicks on anchors are offered to the router, which decides whether they
//! stay inside the app. Navigation itself is async, so both listeners hand
//! their result to a dispatch callback instead of awaiting the router.

use std::rc::{Rc, Weak};

use buzz_router::{Anchor, LinkDecision, Router};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlAnchorElement, MouseEvent, PopStateEvent, Window};

use crate::error::{Result, UiError};

/// A navigation requested by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserNavigation {
    /// An in-app link was clicked.
    Link(String),
    /// The user moved through the history; carries the entry's raw state.
    PopState(Option<String>),
}

type Listener = Closure<dyn FnMut(Event)>;

/// Installed listeners. Dropping the value removes them.
pub struct Listeners {
    window: Window,
    click: Listener,
    popstate: Listener,
}

/// Install the click and popstate listeners.
///
/// # Errors
/// Returns `UiError::Dom` if the window refuses a listener.
pub fn install(
    window: &Window,
    router: &Rc<Router>,
    dispatch: impl Fn(BrowserNavigation) + 'static,
) -> Result<Listeners> {
    let dispatch = Rc::new(dispatch);

    let click = {
        let router = Rc::downgrade(router);
        let dispatch = Rc::clone(&dispatch);
        Listener::new(move |event: Event| on_click(&router, &event, dispatch.as_ref()))
    };

    let popstate = Listener::new(move |event: Event| {
        let state = event
            .dyn_ref::<PopStateEvent>()
            .and_then(|event| event.state().as_string());
        dispatch(BrowserNavigation::PopState(state));
    });

    window
        .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
        .map_err(|e| UiError::dom("click listener", &e))?;
    window
        .add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
        .map_err(|e| UiError::dom("popstate listener", &e))?;

    debug!("Browser listeners installed");
    Ok(Listeners {
        window: window.clone(),
        click,
        popstate,
    })
}

fn on_click(router: &Weak<Router>, event: &Event, dispatch: &dyn Fn(BrowserNavigation)) {
    let Some(router) = router.upgrade() else {
        return;
    };
    if event.default_prevented() || !is_plain_click(event) {
        return;
    }
    let Some(anchor) = anchor_from_event(event) else {
        return;
    };

    match router.on_link_clicked(&anchor_parts(&anchor)) {
        LinkDecision::Ignore => {}
        LinkDecision::Suppress => event.prevent_default(),
        LinkDecision::Navigate(path) => {
            event.prevent_default();
            dispatch(BrowserNavigation::Link(path));
        }
    }
}

/// Primary button without modifiers; anything else opens tabs or windows.
fn is_plain_click(event: &Event) -> bool {
    event.dyn_ref::<MouseEvent>().is_some_and(|mouse| {
        mouse.button() == 0
            && !mouse.meta_key()
            && !mouse.ctrl_key()
            && !mouse.shift_key()
            && !mouse.alt_key()
    })
}

/// Nearest anchor on the event path, starting at the target.
fn anchor_from_event(event: &Event) -> Option<HtmlAnchorElement> {
    event
        .composed_path()
        .iter()
        .find_map(|value| value.dyn_into::<HtmlAnchorElement>().ok())
}

fn anchor_parts(anchor: &HtmlAnchorElement) -> Anchor {
    Anchor {
        pathname: anchor.pathname(),
        hash: anchor.hash(),
        classes: anchor
            .class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect(),
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        let removed = self
            .window
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref())
            .and_then(|()| {
                self.window.remove_event_listener_with_callback(
                    "popstate",
                    self.popstate.as_ref().unchecked_ref(),
                )
            });
        if let Err(e) = removed {
            warn!(error = ?e, "Failed to remove browser listeners");
        }
    }
}
