//! Shared types, store adapter trait, and core utilities for Launchpad.
//!
//! This crate contains the foundational types shared between the core
//! crate, the HTTP layer, and every store adapter implementation.

pub mod error;
pub mod prelude;
pub mod store_adapter;
pub mod types;
pub mod utils;

// vim: ts=4
