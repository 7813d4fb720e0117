//! Install lifecycle: activation defaults, legacy migration and uninstall

use crate::button::builtin_buttons;
use crate::preferences::UserPreferences;
use crate::prelude::*;
use crate::registry::ButtonRegistry;
use launchpad_types::store_adapter::{
	CUSTOM_BUTTONS_KEY, ConfigStore, LEGACY_CUSTOM_BUTTONS_KEY, LEGACY_OPTIONS_KEY,
	MIGRATION_MARKER_KEY, OPTIONS_KEY,
};

/// What a legacy migration run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
	/// False if the migration had already completed earlier
	pub ran: bool,
	pub options_copied: bool,
	pub custom_buttons_copied: bool,
}

/// Writes the default preferences unless preferences already exist
///
/// Returns true if the defaults were written.
pub async fn activate(store: &dyn ConfigStore) -> ClResult<bool> {
	let ids: Vec<Box<str>> = builtin_buttons().map(|def| def.id).collect();
	let defaults = UserPreferences::activation_defaults(ids.iter().map(AsRef::as_ref));

	let written = store.add(OPTIONS_KEY, defaults.to_document()?).await?;
	if written {
		info!("Default launchpad preferences written");
	} else {
		debug!("Launchpad preferences already present, keeping them");
	}
	Ok(written)
}

async fn copy_if_absent(store: &dyn ConfigStore, from: &str, to: &str) -> ClResult<bool> {
	let Some(doc) = store.get(from).await? else {
		return Ok(false);
	};
	let copied = store.add(to, doc).await?;
	if copied {
		info!("Migrated '{}' to '{}'", from, to);
	}
	Ok(copied)
}

/// Copies documents written under the legacy keys, once
///
/// Current documents are never overwritten and legacy documents are kept.
pub async fn migrate_legacy(registry: &ButtonRegistry) -> ClResult<MigrationReport> {
	let store = registry.store().as_ref();
	if store.get(MIGRATION_MARKER_KEY).await?.is_some_and(|marker| marker.as_bool() == Some(true)) {
		debug!("Legacy migration already complete");
		return Ok(MigrationReport::default());
	}

	let report = MigrationReport {
		ran: true,
		options_copied: copy_if_absent(store, LEGACY_OPTIONS_KEY, OPTIONS_KEY).await?,
		custom_buttons_copied: copy_if_absent(store, LEGACY_CUSTOM_BUTTONS_KEY, CUSTOM_BUTTONS_KEY)
			.await?,
	};
	store.set(MIGRATION_MARKER_KEY, serde_json::Value::Bool(true)).await?;
	registry.invalidate_catalog();

	Ok(report)
}

/// Removes every launchpad document
pub async fn uninstall(registry: &ButtonRegistry) -> ClResult<()> {
	let store = registry.store().as_ref();
	for key in [OPTIONS_KEY, CUSTOM_BUTTONS_KEY, MIGRATION_MARKER_KEY] {
		store.delete(key).await?;
	}
	registry.invalidate_catalog();
	info!("Launchpad data removed");
	Ok(())
}


// vim: ts=4
