//! Custom button management
//!
//! Custom buttons live in their own document (identifier → definition) and
//! are merged on top of the built-in catalog. Only custom buttons can be
//! edited or deleted; built-ins are immutable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::button::{ButtonDefinition, DEFAULT_ICON, LEAST_PRIVILEGED_CAPABILITY, normalize_capability};
use crate::preferences;
use crate::prelude::*;
use crate::registry::ButtonRegistry;
use launchpad_types::utils::{is_valid_button_id, sanitize_text_field};

fn default_icon() -> Box<str> {
	DEFAULT_ICON.into()
}

fn default_capability() -> Box<str> {
	LEAST_PRIVILEGED_CAPABILITY.into()
}

fn default_custom() -> bool {
	true
}

/// Stored form of a custom button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCustomButton {
	pub label: Box<str>,
	pub url: Box<str>,
	#[serde(default = "default_icon")]
	pub icon: Box<str>,
	#[serde(default = "default_capability")]
	pub capability: Box<str>,
	#[serde(default = "default_custom")]
	pub custom: bool,
}

impl StoredCustomButton {
	pub fn to_definition(&self, id: &str) -> ButtonDefinition {
		ButtonDefinition {
			id: id.into(),
			label: self.label.clone(),
			url: self.url.clone(),
			icon: self.icon.clone(),
			capability: self.capability.clone(),
			is_custom: true,
		}
	}
}

/// The custom button document, in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomButtons {
	buttons: IndexMap<Box<str>, StoredCustomButton>,
}

impl CustomButtons {
	/// Parses a stored document, skipping entries that are malformed
	pub fn from_document(doc: &serde_json::Value) -> Self {
		let Some(entries) = doc.as_object() else {
			warn!("Custom button document is not an object, ignoring it");
			return Self::default();
		};

		let mut buttons = IndexMap::with_capacity(entries.len());
		for (id, entry) in entries {
			if !is_valid_button_id(id).unwrap_or_default() {
				warn!("Skipping stored custom button with invalid id '{}'", id);
				continue;
			}
			match serde_json::from_value::<StoredCustomButton>(entry.clone()) {
				Ok(mut button) => {
					button.custom = true;
					buttons.insert(id.as_str().into(), button);
				}
				Err(err) => warn!("Skipping malformed custom button '{}': {}", id, err),
			}
		}
		Self { buttons }
	}

	pub fn to_document(&self) -> ClResult<serde_json::Value> {
		Ok(serde_json::to_value(&self.buttons)?)
	}

	pub fn get(&self, id: &str) -> Option<&StoredCustomButton> {
		self.buttons.get(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.buttons.contains_key(id)
	}

	pub fn insert(&mut self, id: &str, button: StoredCustomButton) {
		self.buttons.insert(id.into(), button);
	}

	pub fn remove(&mut self, id: &str) -> Option<StoredCustomButton> {
		self.buttons.shift_remove(id)
	}

	pub fn len(&self) -> usize {
		self.buttons.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buttons.is_empty()
	}

	pub fn definitions(&self) -> impl Iterator<Item = ButtonDefinition> + '_ {
		self.buttons.iter().map(|(id, button)| button.to_definition(id))
	}
}

/// Create request for a custom button
///
/// Empty strings count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomButton {
	#[serde(default)]
	pub button_id: String,
	#[serde(default)]
	pub label: String,
	#[serde(default)]
	pub url: String,
	#[serde(default)]
	pub icon: Option<String>,
	#[serde(default)]
	pub capability: Option<String>,
}

/// Partial update of a custom button; absent or empty fields are left as is
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomButton {
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub icon: Option<String>,
	#[serde(default)]
	pub capability: Option<String>,
}

fn clean(value: Option<&str>) -> Option<Box<str>> {
	value.map(sanitize_text_field).filter(|v| !v.is_empty()).map(Into::into)
}

fn checked_capability(requested: Option<&str>) -> Box<str> {
	let capability = normalize_capability(requested);
	if let Some(requested) = requested.filter(|r| !r.is_empty() && *r != capability) {
		debug!("Unknown capability '{}' downgraded to '{}'", requested, capability);
	}
	capability.into()
}

impl ButtonRegistry {
	/// Creates a custom button
	///
	/// Fails with `DuplicateIdentifier` if the id is taken by a built-in,
	/// extension-provided or custom button, and with `InvalidIdentifierFormat`
	/// if it does not match `^[a-z0-9_-]+$`. Unknown capabilities are
	/// downgraded to `read`.
	pub async fn create_custom_button(&self, req: CreateCustomButton) -> ClResult<ButtonDefinition> {
		let label = sanitize_text_field(&req.label);
		let url = sanitize_text_field(&req.url);
		if req.button_id.is_empty() || label.is_empty() || url.is_empty() {
			return Err(Error::InvalidRequest("Missing required fields".into()));
		}
		let button_id = req.button_id.as_str();

		let mut customs = self.load_custom_buttons().await?;
		let catalog = self.get_catalog().await;
		if catalog.contains(button_id) || customs.contains(button_id) {
			return Err(Error::DuplicateIdentifier(button_id.to_string()));
		}
		if !is_valid_button_id(button_id)? {
			return Err(Error::InvalidIdentifierFormat(button_id.to_string()));
		}

		let button = StoredCustomButton {
			label: label.into(),
			url: url.into(),
			icon: clean(req.icon.as_deref()).unwrap_or_else(default_icon),
			capability: checked_capability(req.capability.as_deref()),
			custom: true,
		};
		let def = button.to_definition(button_id);
		customs.insert(button_id, button);

		self.save_custom_buttons(&customs).await?;
		self.invalidate_catalog();

		info!("Custom button '{}' created", button_id);
		Ok(def)
	}

	/// Updates the given fields of a custom button
	pub async fn update_custom_button(
		&self,
		button_id: &str,
		req: UpdateCustomButton,
	) -> ClResult<ButtonDefinition> {
		let mut customs = self.load_custom_buttons().await?;
		let Some(current) = customs.get(button_id) else {
			return Err(Error::NotFound);
		};

		let mut button = current.clone();
		if let Some(label) = clean(req.label.as_deref()) {
			button.label = label;
		}
		if let Some(url) = clean(req.url.as_deref()) {
			button.url = url;
		}
		if let Some(icon) = clean(req.icon.as_deref()) {
			button.icon = icon;
		}
		if let Some(capability) = req.capability.as_deref().filter(|c| !c.trim().is_empty()) {
			button.capability = checked_capability(Some(capability));
		}
		let def = button.to_definition(button_id);
		customs.insert(button_id, button);

		self.save_custom_buttons(&customs).await?;
		self.invalidate_catalog();

		info!("Custom button '{}' updated", button_id);
		Ok(def)
	}

	/// Deletes a custom button and every preference entry referring to it
	///
	/// If the custom button shadowed a built-in or extension-provided button,
	/// the shadowed button takes its place again and the preferences are kept.
	pub async fn delete_custom_button(&self, button_id: &str) -> ClResult<()> {
		let mut customs = self.load_custom_buttons().await?;
		if customs.remove(button_id).is_none() {
			return Err(Error::NotFound);
		}

		// Preferences go first, so a failed cascade leaves the button in place
		if !self.assemble(&customs).contains(button_id) {
			let store = self.store().as_ref();
			if let Some(mut prefs) = preferences::read_preferences(store).await? {
				if prefs.strip_button(button_id) {
					preferences::write_preferences(store, &prefs).await?;
				}
			}
		}

		self.save_custom_buttons(&customs).await?;
		self.invalidate_catalog();

		info!("Custom button '{}' deleted", button_id);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory_store::MemoryStore;
	use crate::preferences::UserPreferences;
	use crate::registry::DEFAULT_CATALOG_TTL_SECS;
	use launchpad_types::store_adapter::{CUSTOM_BUTTONS_KEY, ConfigStore, OPTIONS_KEY};
	use std::sync::Arc;

	fn registry() -> (ButtonRegistry, Arc<MemoryStore>) {
		let store = Arc::new(MemoryStore::new());
		(ButtonRegistry::new(store.clone(), DEFAULT_CATALOG_TTL_SECS), store)
	}

	fn create_req(id: &str) -> CreateCustomButton {
		CreateCustomButton {
			button_id: id.to_string(),
			label: "Reports".to_string(),
			url: "admin.php?page=reports".to_string(),
			icon: None,
			capability: None,
		}
	}

	#[test]
	fn test_document_parsing_skips_bad_entries() {
		let doc = serde_json::json!({
			"reports": {"label": "Reports", "url": "admin.php?page=reports"},
			"Bad Id": {"label": "Bad", "url": "x"},
			"broken": {"label": 42},
			"shop": {"label": "Shop", "url": "admin.php?page=shop", "icon": "dashicons-cart", "capability": "edit_posts", "custom": false}
		});
		let customs = CustomButtons::from_document(&doc);
		assert_eq!(customs.len(), 2);

		let reports = customs.get("reports").unwrap();
		assert_eq!(reports.icon.as_ref(), DEFAULT_ICON);
		assert_eq!(reports.capability.as_ref(), "read");
		// Stored entries are always custom
		assert!(customs.get("shop").unwrap().custom);

		assert!(CustomButtons::from_document(&serde_json::json!([1, 2])).is_empty());
	}

	#[tokio::test]
	async fn test_create_custom_button() {
		let (registry, store) = registry();
		let def = registry
			.create_custom_button(CreateCustomButton {
				button_id: "reports".into(),
				label: " <b>Reports</b> ".into(),
				url: "admin.php?page=reports".into(),
				icon: Some("dashicons-chart-bar".into()),
				capability: Some("edit_posts".into()),
			})
			.await
			.unwrap();

		assert_eq!(def.label.as_ref(), "Reports");
		assert_eq!(def.capability.as_ref(), "edit_posts");
		assert!(def.is_custom);

		let doc = store.get(CUSTOM_BUTTONS_KEY).await.unwrap().unwrap();
		assert_eq!(doc["reports"]["custom"], true);
		assert_eq!(doc["reports"]["icon"], "dashicons-chart-bar");

		let catalog = registry.get_catalog().await;
		assert_eq!(catalog.ids().last(), Some("reports"));
	}

	#[tokio::test]
	async fn test_create_rejects_invalid_id() {
		let (registry, _store) = registry();
		let res = registry.create_custom_button(create_req("Invalid ID!")).await;
		assert!(matches!(res, Err(Error::InvalidIdentifierFormat(_))));
	}

	#[tokio::test]
	async fn test_create_rejects_duplicates() {
		let (registry, _store) = registry();
		let res = registry.create_custom_button(create_req("posts")).await;
		assert!(matches!(res, Err(Error::DuplicateIdentifier(id)) if id == "posts"));

		registry.create_custom_button(create_req("reports")).await.unwrap();
		let res = registry.create_custom_button(create_req("reports")).await;
		assert!(matches!(res, Err(Error::DuplicateIdentifier(_))));
	}

	#[tokio::test]
	async fn test_create_requires_fields() {
		let (registry, _store) = registry();
		let mut req = create_req("reports");
		req.label = "   ".into();
		let res = registry.create_custom_button(req).await;
		assert!(matches!(res, Err(Error::InvalidRequest(_))));

		let res = registry.create_custom_button(create_req("")).await;
		assert!(matches!(res, Err(Error::InvalidRequest(_))));
	}

	#[tokio::test]
	async fn test_create_downgrades_unknown_capability() {
		let (registry, _store) = registry();
		let mut req = create_req("reports");
		req.capability = Some("delete_site".into());
		let def = registry.create_custom_button(req).await.unwrap();
		assert_eq!(def.capability.as_ref(), "read");
	}

	#[tokio::test]
	async fn test_update_custom_button() {
		let (registry, _store) = registry();
		registry.create_custom_button(create_req("reports")).await.unwrap();

		let def = registry
			.update_custom_button(
				"reports",
				UpdateCustomButton {
					label: Some("Sales Reports".into()),
					url: Some(String::new()),
					icon: None,
					capability: Some("manage_options".into()),
				},
			)
			.await
			.unwrap();

		assert_eq!(def.label.as_ref(), "Sales Reports");
		assert_eq!(def.url.as_ref(), "admin.php?page=reports");
		assert_eq!(def.capability.as_ref(), "manage_options");
		assert_eq!(registry.get_catalog().await.get("reports"), Some(&def));
	}

	#[tokio::test]
	async fn test_update_and_delete_builtin_not_found() {
		let (registry, _store) = registry();
		let res = registry.update_custom_button("posts", UpdateCustomButton::default()).await;
		assert!(matches!(res, Err(Error::NotFound)));
		let res = registry.delete_custom_button("posts").await;
		assert!(matches!(res, Err(Error::NotFound)));
		let res = registry.delete_custom_button("missing").await;
		assert!(matches!(res, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_delete_cascades_into_preferences() {
		let (registry, store) = registry();
		registry.create_custom_button(create_req("reports")).await.unwrap();

		store
			.set(
				OPTIONS_KEY,
				serde_json::json!({
					"enabled_buttons": ["posts", "reports"],
					"button_order": ["reports", "posts"],
					"role_visibility": {"reports": ["editor"]}
				}),
			)
			.await
			.unwrap();

		registry.delete_custom_button("reports").await.unwrap();

		let prefs = preferences::read_preferences(store.as_ref()).await.unwrap().unwrap();
		let enabled: Vec<_> = prefs.enabled_buttons.unwrap().into_iter().collect();
		assert_eq!(enabled, vec![Box::from("posts")]);
		assert_eq!(prefs.button_order, vec![Box::from("posts")]);
		assert!(prefs.role_visibility.is_empty());
		assert!(!registry.get_catalog().await.contains("reports"));
	}

	/// Store that refuses to write the preferences document
	#[derive(Debug, Default)]
	struct FailingOptionsStore(MemoryStore);

	#[async_trait::async_trait]
	impl ConfigStore for FailingOptionsStore {
		async fn get(&self, key: &str) -> ClResult<Option<serde_json::Value>> {
			self.0.get(key).await
		}

		async fn set(&self, key: &str, value: serde_json::Value) -> ClResult<()> {
			if key == OPTIONS_KEY {
				return Err(Error::DbError);
			}
			self.0.set(key, value).await
		}

		async fn delete(&self, key: &str) -> ClResult<()> {
			self.0.delete(key).await
		}

		async fn add(&self, key: &str, value: serde_json::Value) -> ClResult<bool> {
			self.0.add(key, value).await
		}
	}

	#[tokio::test]
	async fn test_failed_cascade_keeps_custom_button() {
		let store = Arc::new(FailingOptionsStore::default());
		store
			.0
			.set(OPTIONS_KEY, serde_json::json!({"enabled_buttons": ["posts", "reports"]}))
			.await
			.unwrap();
		let registry = ButtonRegistry::new(store.clone(), DEFAULT_CATALOG_TTL_SECS);
		registry.create_custom_button(create_req("reports")).await.unwrap();

		let res = registry.delete_custom_button("reports").await;
		assert!(matches!(res, Err(Error::DbError)));

		assert!(registry.get_catalog().await.contains("reports"));
		let prefs = preferences::read_preferences(store.as_ref()).await.unwrap().unwrap();
		assert!(prefs.enabled_buttons.unwrap().contains("reports"));
	}

	#[tokio::test]
	async fn test_delete_without_preferences() {
		let (registry, store) = registry();
		registry.create_custom_button(create_req("reports")).await.unwrap();
		registry.delete_custom_button("reports").await.unwrap();
		assert!(store.get(OPTIONS_KEY).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_delete_shadowing_custom_keeps_preferences() {
		let (registry, store) = registry();
		store
			.set(
				CUSTOM_BUTTONS_KEY,
				serde_json::json!({"posts": {"label": "My Posts", "url": "edit.php?mine=1"}}),
			)
			.await
			.unwrap();
		let prefs = UserPreferences {
			enabled_buttons: Some(["posts".into()].into_iter().collect()),
			..UserPreferences::default()
		};
		preferences::write_preferences(store.as_ref(), &prefs).await.unwrap();

		registry.delete_custom_button("posts").await.unwrap();

		let prefs = preferences::read_preferences(store.as_ref()).await.unwrap().unwrap();
		assert!(prefs.enabled_buttons.unwrap().contains("posts"));
		let catalog = registry.get_catalog().await;
		assert!(!catalog.get("posts").unwrap().is_custom);
	}
}

// vim: ts=4
