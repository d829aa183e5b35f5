//! Leptos components and the registry screens mount them through

pub mod registry;
pub mod shell;

pub use registry::{ComponentRegistry, ViewFn};
pub use shell::{AppShell, Breadcrumb, CrumbLink, ToastList};

/// DOM id of the surface holding the screen content.
pub const MAIN_SURFACE: &str = "main-content";
