//! Single-page router core for Buzz Light.
//!
//! The router manages a set of surfaces (DOM mount points) whose content is
//! swapped when the user navigates. Paths are matched against an ordered
//! table of regex routes; the first match wins and its handler resolves a
//! [`Screen`], which is asked for the component to show in each surface.
//!
//! - **Route table**: mutable at runtime, even during a navigation
//! - **Screens**: possibly lazy, may redirect from `on_show`
//! - **Surfaces**: updated strictly in registration order
//! - **History**: path or hash addressing, scroll restoration
//!
//! Browser access goes through the [`SurfaceHost`] and [`HistoryHost`]
//! traits. [`MemoryHost`] implements both for headless use.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use buzz_router::{
//!     handler, MemoryHost, Resolution, Route, Router, RouterConfig, StaticScreen, SurfaceContent,
//! };
//!
//! # fn main() -> buzz_router::Result<()> {
//! futures::executor::block_on(async {
//!     let host = Rc::new(MemoryHost::new("/").with_surface("main-content"));
//!     let router = Router::new(RouterConfig::default(), host.clone(), host.clone());
//!     router.add_surface("main-content");
//!     router.add_route(Route::new(".*", handler(|_| async {
//!         Ok(Resolution::factory(|| {
//!             StaticScreen::default().with_surface("main-content", SurfaceContent::new("not-found"))
//!         }))
//!     }))?);
//!
//!     let navigation = router.goto("/missing").await?;
//!     assert_eq!(navigation.path, "/missing");
//!     assert_eq!(host.mounted("main-content")[0].name, "not-found");
//!     Ok::<(), buzz_router::RouterError>(())
//! })
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod history;
pub mod link;
pub mod memory;
pub mod observable;
pub mod path;
pub mod route;
pub mod router;
pub mod screen;
pub mod surface;

pub use config::{AddressingMode, RouterConfig};
pub use error::{HandlerError, Result, RouterError};
pub use history::{HistoryHost, HistoryState, Location};
pub use link::{Anchor, LinkDecision};
pub use memory::{HostEvent, MemoryHost};
pub use observable::{Observable, Subscription};
pub use route::{
    handler, Captures, Crumb, CrumbTitle, Handler, HandlerResult, Resolution, Route, RouteTable,
};
pub use router::{GotoOptions, Navigation, NavigationState, Router};
pub use screen::{RedirectScreen, Screen, StaticScreen, SurfaceContent};
pub use surface::{SurfaceHost, SurfaceList};
