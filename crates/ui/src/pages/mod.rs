//! Page components mounted into the main surface
//!
//! Screens register these under their component names; they receive
//! already translated text so they stay free of service references.

pub mod course;
pub mod internal_error;
pub mod not_found;

pub use course::{CoursePage, CourseTabs, NavLink, SubpageNav, SubpageNavButtons, TabLink};
pub use internal_error::InternalError;
pub use not_found::NotFound;
