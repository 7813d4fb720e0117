//! Launchpad service
//!
//! Ties the registry, the preferences document and the resolver together.
//! This is what the HTTP layer talks to.

use indexmap::IndexSet;
use std::sync::Arc;

use crate::button::{AVAILABLE_CAPABILITIES, ButtonDefinition};
use crate::catalog::ButtonCatalog;
use crate::config::LaunchpadConfig;
use crate::custom::{CreateCustomButton, UpdateCustomButton};
use crate::lifecycle::{self, MigrationReport};
use crate::preferences::{self, UserPreferences};
use crate::prelude::*;
use crate::registry::ButtonRegistry;
use crate::resolver::{self, ResolvedButton};
use crate::viewer::ViewerIdentity;
use launchpad_types::store_adapter::ConfigStore;
use launchpad_types::utils::sanitize_key;

#[derive(Debug)]
pub struct Launchpad {
	registry: ButtonRegistry,
	config: LaunchpadConfig,
}

impl Launchpad {
	pub fn new(store: Arc<dyn ConfigStore>, config: LaunchpadConfig) -> Self {
		let registry = ButtonRegistry::new(store, config.catalog_ttl_secs);
		Self { registry, config }
	}

	/// Installs the catalog extension
	pub fn with_extension<F>(mut self, f: F) -> Self
	where
		F: Fn(ButtonCatalog) -> ButtonCatalog + Send + Sync + 'static,
	{
		self.registry = self.registry.with_extension(f);
		self
	}

	pub fn registry(&self) -> &ButtonRegistry {
		&self.registry
	}

	pub fn config(&self) -> &LaunchpadConfig {
		&self.config
	}

	fn store(&self) -> &dyn ConfigStore {
		self.registry.store().as_ref()
	}

	/// Buttons the viewer gets to see, in display order
	pub async fn buttons_for(&self, viewer: &ViewerIdentity) -> Vec<ResolvedButton> {
		let catalog = self.registry.get_catalog().await;
		let prefs = preferences::load_preferences(self.store()).await;
		resolver::resolve(&catalog, &prefs, viewer)
	}

	pub async fn catalog(&self) -> Arc<ButtonCatalog> {
		self.registry.get_catalog().await
	}

	pub async fn preferences(&self) -> UserPreferences {
		preferences::load_preferences(self.store()).await
	}

	/// Sanitizing preferences write
	///
	/// The submitted document replaces the stored one after unknown buttons,
	/// unknown roles and malformed colors are dropped. A write without
	/// `enabled_buttons` enables nothing.
	pub async fn update_preferences(&self, input: &serde_json::Value) -> ClResult<UserPreferences> {
		if !input.is_object() {
			return Err(Error::InvalidRequest("Preferences must be an object".into()));
		}
		let catalog = self.registry.get_catalog().await;
		let mut prefs = UserPreferences::from_document(input);
		prefs.enabled_buttons.get_or_insert_with(IndexSet::new);
		let prefs = prefs.sanitize(&catalog, &self.config.known_roles);

		preferences::write_preferences(self.store(), &prefs).await?;
		self.registry.invalidate_catalog();

		info!("Launchpad preferences updated");
		Ok(prefs)
	}

	/// Stores a new button order, keeping only identifiers in the catalog
	pub async fn save_order<S: AsRef<str>>(&self, order: &[S]) -> ClResult<Vec<Box<str>>> {
		let catalog = self.registry.get_catalog().await;
		let order: IndexSet<Box<str>> = order
			.iter()
			.map(|id| sanitize_key(id.as_ref()))
			.filter(|id| catalog.contains(id))
			.map(Into::into)
			.collect();
		let order: Vec<Box<str>> = order.into_iter().collect();

		let mut prefs = preferences::read_preferences(self.store()).await?.unwrap_or_default();
		prefs.button_order.clone_from(&order);
		preferences::write_preferences(self.store(), &prefs).await?;
		self.registry.invalidate_catalog();

		info!("Launchpad button order saved ({} buttons)", order.len());
		Ok(order)
	}

	pub async fn create_custom_button(&self, req: CreateCustomButton) -> ClResult<ButtonDefinition> {
		self.registry.create_custom_button(req).await
	}

	pub async fn update_custom_button(
		&self,
		button_id: &str,
		req: UpdateCustomButton,
	) -> ClResult<ButtonDefinition> {
		self.registry.update_custom_button(button_id, req).await
	}

	pub async fn delete_custom_button(&self, button_id: &str) -> ClResult<()> {
		self.registry.delete_custom_button(button_id).await
	}

	/// Runs the legacy migration, then writes activation defaults if needed
	pub async fn activate(&self) -> ClResult<MigrationReport> {
		let report = lifecycle::migrate_legacy(&self.registry).await?;
		lifecycle::activate(self.store()).await?;
		Ok(report)
	}

	pub async fn uninstall(&self) -> ClResult<()> {
		lifecycle::uninstall(&self.registry).await
	}

	/// Capabilities a custom button may require, with labels
	pub fn capabilities(&self) -> &'static [(&'static str, &'static str)] {
		AVAILABLE_CAPABILITIES
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory_store::MemoryStore;
	use launchpad_types::store_adapter::{LEGACY_OPTIONS_KEY, OPTIONS_KEY};
	use serde_json::json;

	fn launchpad() -> (Launchpad, Arc<MemoryStore>) {
		let store = Arc::new(MemoryStore::new());
		(Launchpad::new(store.clone(), LaunchpadConfig::default()), store)
	}

	fn ids(list: &[ResolvedButton]) -> Vec<&str> {
		list.iter().map(|b| b.id.as_ref()).collect()
	}

	fn admin() -> ViewerIdentity {
		ViewerIdentity::new()
			.with_capabilities(["read", "edit_posts", "manage_options", "upload_files"])
			.with_roles(["administrator"])
	}

	#[tokio::test]
	async fn test_fresh_install_shows_accessible_buttons() {
		let (launchpad, _store) = launchpad();
		launchpad.activate().await.unwrap();

		let buttons = launchpad.buttons_for(&admin()).await;
		assert_eq!(ids(&buttons), vec!["posts", "media", "settings", "tools", "site_health"]);

		let subscriber = ViewerIdentity::new().with_capabilities(["read"]);
		assert!(launchpad.buttons_for(&subscriber).await.is_empty());
	}

	#[tokio::test]
	async fn test_activate_migrates_before_writing_defaults() {
		let (launchpad, store) = launchpad();
		store.set(LEGACY_OPTIONS_KEY, json!({"enabled_buttons": ["media"]})).await.unwrap();

		let report = launchpad.activate().await.unwrap();
		assert!(report.options_copied);
		assert_eq!(ids(&launchpad.buttons_for(&admin()).await), vec!["media"]);
	}

	#[tokio::test]
	async fn test_update_preferences_sanitizes() {
		let (launchpad, store) = launchpad();
		let prefs = launchpad
			.update_preferences(&json!({
				"enabled_buttons": ["posts", "ghost", "Settings"],
				"button_order": ["settings", "posts"],
				"button_color": "javascript:alert(1)",
				"role_visibility": {"settings": ["editor", "pirate"]},
				"dark_mode": "dark"
			}))
			.await
			.unwrap();

		let enabled: Vec<_> = prefs.enabled_buttons.clone().unwrap().into_iter().collect();
		assert_eq!(enabled, vec![Box::from("posts"), Box::from("settings")]);
		assert_eq!(prefs.button_color.as_ref(), "#2271b1");

		let doc = store.get(OPTIONS_KEY).await.unwrap().unwrap();
		assert_eq!(doc["role_visibility"], json!({"settings": ["editor"]}));
		assert_eq!(doc["dark_mode"], "dark");

		let editor = admin().with_roles(["editor"]);
		assert_eq!(ids(&launchpad.buttons_for(&editor).await), vec!["settings", "posts"]);
		assert_eq!(ids(&launchpad.buttons_for(&admin()).await), vec!["posts"]);

		let res = launchpad.update_preferences(&json!(["posts"])).await;
		assert!(matches!(res, Err(Error::InvalidRequest(_))));
	}

	#[tokio::test]
	async fn test_update_preferences_without_enabled_list_enables_nothing() {
		let (launchpad, store) = launchpad();
		launchpad.activate().await.unwrap();

		let prefs = launchpad.update_preferences(&json!({"button_color": "#000"})).await.unwrap();
		assert_eq!(prefs.enabled_buttons.as_ref().map(IndexSet::len), Some(0));
		assert!(launchpad.buttons_for(&admin()).await.is_empty());

		let doc = store.get(OPTIONS_KEY).await.unwrap().unwrap();
		assert_eq!(doc["enabled_buttons"], json!([]));

		launchpad.update_preferences(&json!({"enabled_buttons": null})).await.unwrap();
		assert!(launchpad.buttons_for(&admin()).await.is_empty());
	}

	#[tokio::test]
	async fn test_save_order_filters_unknown_ids() {
		let (launchpad, _store) = launchpad();
		launchpad.activate().await.unwrap();

		let saved = launchpad
			.save_order(&["Tools", "ghost", "media", "tools", "<b>"])
			.await
			.unwrap();
		assert_eq!(saved, vec![Box::from("tools"), Box::from("media")]);

		let buttons = launchpad.buttons_for(&admin()).await;
		assert_eq!(ids(&buttons), vec!["tools", "media", "posts", "settings", "site_health"]);
		assert_eq!(launchpad.preferences().await.button_order, saved);
	}

	#[tokio::test]
	async fn test_deleted_custom_is_never_resolved() {
		let (launchpad, _store) = launchpad();
		launchpad.activate().await.unwrap();
		launchpad
			.create_custom_button(CreateCustomButton {
				button_id: "reports".into(),
				label: "Reports".into(),
				url: "admin.php?page=reports".into(),
				..CreateCustomButton::default()
			})
			.await
			.unwrap();

		let mut enabled: Vec<String> = launchpad
			.preferences()
			.await
			.enabled_buttons
			.unwrap()
			.iter()
			.map(ToString::to_string)
			.collect();
		enabled.push("reports".into());
		launchpad
			.update_preferences(&json!({"enabled_buttons": enabled, "button_order": ["reports"]}))
			.await
			.unwrap();
		assert_eq!(ids(&launchpad.buttons_for(&admin()).await)[0], "reports");

		launchpad.delete_custom_button("reports").await.unwrap();
		let prefs = launchpad.preferences().await;
		assert!(!prefs.is_enabled("reports"));
		assert!(prefs.button_order.is_empty());
		assert!(!ids(&launchpad.buttons_for(&admin()).await).contains(&"reports"));
	}

	#[tokio::test]
	async fn test_uninstall() {
		let (launchpad, store) = launchpad();
		launchpad.activate().await.unwrap();
		launchpad.uninstall().await.unwrap();
		assert!(store.is_empty());
		assert_eq!(launchpad.capabilities().len(), 13);
	}
}

// vim: ts=4
