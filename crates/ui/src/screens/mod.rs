//! Screen plugins
//!
//! Each plugin contributes routes to the router at startup. The bootstrap
//! adds them in a fixed order; the 404 plugin's catch-all comes last.

pub mod course;
pub mod home;
pub mod internal_error;
pub mod not_found;

use buzz_router::Route;

use crate::error::Result;

pub use course::Courses;
pub use home::HomeRedirect;
pub use internal_error::ErrorScreens;
pub use not_found::NotFoundScreens;

/// A source of routes.
pub trait ScreenPlugin {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Routes to append to the table, in matching order.
    ///
    /// # Errors
    /// Returns `UiError::Router` if a route pattern does not compile.
    fn routes(&self) -> Result<Vec<Route>>;
}
