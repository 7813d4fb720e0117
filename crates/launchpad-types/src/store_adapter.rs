//! Configuration store adapter
//!
//! Key-value persistence for whole JSON documents. The core never assumes
//! atomicity across keys: the preference document and the custom button
//! document are written independently.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// Stored preference document
pub const OPTIONS_KEY: &str = "simple_launchpad_options";
/// Stored custom button definitions
pub const CUSTOM_BUTTONS_KEY: &str = "simple_launchpad_custom_buttons";
/// Marker set once legacy documents were copied over
pub const MIGRATION_MARKER_KEY: &str = "simple_launchpad_migration_complete";

/// Preference document written by releases before the rename
pub const LEGACY_OPTIONS_KEY: &str = "dashboard_launchpad_options";
/// Custom button document written by releases before the rename
pub const LEGACY_CUSTOM_BUTTONS_KEY: &str = "dashboard_launchpad_custom_buttons";

#[async_trait]
pub trait ConfigStore: Debug + Send + Sync {
	/// Reads a document, `None` if it was never written or was deleted
	async fn get(&self, key: &str) -> ClResult<Option<serde_json::Value>>;

	/// Replaces a document
	async fn set(&self, key: &str, value: serde_json::Value) -> ClResult<()>;

	/// Removes a document. Removing a missing key is not an error.
	async fn delete(&self, key: &str) -> ClResult<()>;

	/// Writes a document only if the key is absent
	///
	/// Returns true if the value was written. The default implementation is
	/// a read followed by a write, adapters may override it with an atomic
	/// insert.
	async fn add(&self, key: &str, value: serde_json::Value) -> ClResult<bool> {
		if self.get(key).await?.is_some() {
			return Ok(false);
		}
		self.set(key, value).await?;
		Ok(true)
	}
}

// vim: ts=4
