//! Launchpad core
//!
//! Button catalog, custom button management, preferences and the visibility
//! and ordering resolver of the admin launchpad. Persistence goes through the
//! `ConfigStore` adapter trait from `launchpad-types`.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod button;
pub mod catalog;
pub mod config;
pub mod custom;
pub mod lifecycle;
pub mod memory_store;
pub mod nonce;
pub mod preferences;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod viewer;

// Re-export commonly used types
pub use button::ButtonDefinition;
pub use catalog::ButtonCatalog;
pub use config::LaunchpadConfig;
pub use custom::{CreateCustomButton, UpdateCustomButton};
pub use memory_store::MemoryStore;
pub use nonce::NonceVerifier;
pub use preferences::{DisplayMode, UserPreferences};
pub use registry::ButtonRegistry;
pub use resolver::ResolvedButton;
pub use service::Launchpad;
pub use viewer::ViewerIdentity;

// vim: ts=4
