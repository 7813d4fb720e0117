//! Launchpad HTTP API
//!
//! JSON endpoints over `launchpad-core`: the resolved button list for any
//! signed-in viewer, and the settings surface for administrators.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod handler;
pub mod perm;
pub mod prelude;
pub mod routes;

pub use app::{App, AppState};
pub use routes::init;

// vim: ts=4
