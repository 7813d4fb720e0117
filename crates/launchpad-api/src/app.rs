//! Application state shared by every handler

use std::sync::Arc;

use launchpad_core::{Launchpad, NonceVerifier};

#[derive(Debug)]
pub struct AppState {
	pub launchpad: Launchpad,
	pub nonces: NonceVerifier,
}

pub type App = Arc<AppState>;

// vim: ts=4
