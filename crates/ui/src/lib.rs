//! Leptos 0.7 CSR frontend for Buzz Light
//!
//! The browser side of the router: DOM and history hosts, the application
//! shell, and the screens that fill the `main-content` surface.
//!
//! ## Architecture
//! - Pure CSR with Leptos 0.7, compiled to `wasm32-unknown-unknown`
//! - Routing by `buzz-router`; Leptos only renders
//! - Services built once in [`app::App::start`] and passed explicitly
//!
//! ## Module Structure
//! - `app`: bootstrap and browser navigation dispatch
//! - `components`: component registry and the application shell
//! - `pages`: page bodies mounted into surfaces
//! - `screens`: route plugins (404, 500, home redirect, courses)
//! - `web`: `web-sys` implementations of the router hosts
//! - `config`, `i18n`, `toast`, `logging`, `fetch`: shared services
//! - `error`: error types and handling

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod i18n;
pub mod logging;
pub mod pages;
pub mod screens;
pub mod toast;
pub mod web;

pub use app::{launch, App};
pub use error::{Result, UiError};

#[cfg(test)]
mod tests;
