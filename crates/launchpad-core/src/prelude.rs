pub use launchpad_types::prelude::*;

// vim: ts=4
