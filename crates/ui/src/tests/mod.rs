//! Behavioral tests for screens and services
//!
//! BDD-style tests using given-when-then naming. Navigation runs against
//! the router's in-memory host and a canned fetcher, so no browser is
//! needed.

pub mod course_behaviors;
pub mod service_behaviors;
