pub use crate::app::App;
pub use launchpad_types::prelude::*;

// vim: ts=4
