//! Launchpad preferences
//!
//! Stored as one document under `OPTIONS_KEY`. Reading is lenient: anything
//! malformed falls back to its default and never fails the page. Writing goes
//! through `sanitize`, which drops unknown identifiers and role names.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::ButtonCatalog;
use crate::prelude::*;
use launchpad_types::store_adapter::{ConfigStore, OPTIONS_KEY};
use launchpad_types::utils::{sanitize_hex_color, sanitize_key};

pub const DEFAULT_BUTTON_COLOR: &str = "#2271b1";
pub const DEFAULT_BUTTON_HOVER_COLOR: &str = "#135e96";
pub const DEFAULT_BUTTON_BG_COLOR: &str = "#ffffff";
pub const DEFAULT_BUTTON_HOVER_BG_COLOR: &str = "#f6f7f7";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
	Light,
	Dark,
	Auto,
}

impl DisplayMode {
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"light" => Some(Self::Light),
			"dark" => Some(Self::Dark),
			"auto" => Some(Self::Auto),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPreferences {
	/// `None` means every catalog button is enabled
	#[serde(skip_serializing_if = "Option::is_none")]
	pub enabled_buttons: Option<IndexSet<Box<str>>>,
	/// Preferred order, may be stale
	pub button_order: Vec<Box<str>>,
	pub button_color: Box<str>,
	pub button_hover_color: Box<str>,
	pub button_bg_color: Box<str>,
	pub button_hover_bg_color: Box<str>,
	/// Button id → roles allowed to see it; missing entry means no restriction
	pub role_visibility: IndexMap<Box<str>, Vec<Box<str>>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dark_mode: Option<DisplayMode>,
}

impl Default for UserPreferences {
	fn default() -> Self {
		Self {
			enabled_buttons: None,
			button_order: Vec::new(),
			button_color: DEFAULT_BUTTON_COLOR.into(),
			button_hover_color: DEFAULT_BUTTON_HOVER_COLOR.into(),
			button_bg_color: DEFAULT_BUTTON_BG_COLOR.into(),
			button_hover_bg_color: DEFAULT_BUTTON_HOVER_BG_COLOR.into(),
			role_visibility: IndexMap::new(),
			dark_mode: None,
		}
	}
}

/// Reads a list of keys from either a JSON array or the values of an object
///
/// Older documents were written with index gaps and ended up as objects.
fn key_list(value: &Value) -> Option<Vec<Box<str>>> {
	let items: Vec<&Value> = match value {
		Value::Array(items) => items.iter().collect(),
		Value::Object(map) => map.values().collect(),
		_ => return None,
	};
	Some(
		items
			.into_iter()
			.filter_map(Value::as_str)
			.map(sanitize_key)
			.filter(|key| !key.is_empty())
			.map(Into::into)
			.collect(),
	)
}

fn color(doc: &serde_json::Map<String, Value>, key: &str, default: &str) -> Box<str> {
	doc.get(key)
		.and_then(Value::as_str)
		.and_then(sanitize_hex_color)
		.map_or_else(|| default.into(), Into::into)
}

impl UserPreferences {
	/// Preferences written on first activation: every given button enabled,
	/// in the given order
	pub fn activation_defaults<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
		let ids: Vec<Box<str>> = ids.into_iter().map(Into::into).collect();
		Self {
			enabled_buttons: Some(ids.iter().cloned().collect()),
			button_order: ids,
			..Self::default()
		}
	}

	/// Structural parse of a stored or submitted document
	///
	/// Keys are normalized and malformed colors replaced by their defaults.
	/// Identifiers are not checked against the catalog here.
	pub fn from_document(doc: &Value) -> Self {
		let Some(doc) = doc.as_object() else {
			warn!("Preference document is not an object, using defaults");
			return Self::default();
		};

		let enabled_buttons = match doc.get("enabled_buttons") {
			None | Some(Value::Null) => None,
			Some(value) => {
				let list = key_list(value);
				if list.is_none() {
					warn!("Ignoring malformed enabled_buttons: {}", value);
				}
				list.map(|ids| ids.into_iter().collect())
			}
		};

		let mut role_visibility = IndexMap::new();
		if let Some(Value::Object(entries)) = doc.get("role_visibility") {
			for (id, roles) in entries {
				let id = sanitize_key(id);
				let Some(roles) = key_list(roles) else { continue };
				let roles: IndexSet<Box<str>> = roles.into_iter().collect();
				if !id.is_empty() && !roles.is_empty() {
					role_visibility.insert(id.into(), roles.into_iter().collect());
				}
			}
		}

		Self {
			enabled_buttons,
			button_order: doc.get("button_order").and_then(key_list).unwrap_or_default(),
			button_color: color(doc, "button_color", DEFAULT_BUTTON_COLOR),
			button_hover_color: color(doc, "button_hover_color", DEFAULT_BUTTON_HOVER_COLOR),
			button_bg_color: color(doc, "button_bg_color", DEFAULT_BUTTON_BG_COLOR),
			button_hover_bg_color: color(
				doc,
				"button_hover_bg_color",
				DEFAULT_BUTTON_HOVER_BG_COLOR,
			),
			role_visibility,
			dark_mode: doc.get("dark_mode").and_then(Value::as_str).and_then(DisplayMode::parse),
		}
	}

	/// Drops identifiers missing from the catalog and unknown role names
	///
	/// Role entries left without any role are removed, as an empty list
	/// would not restrict anything.
	pub fn sanitize(mut self, catalog: &ButtonCatalog, known_roles: &[String]) -> Self {
		if let Some(enabled) = &mut self.enabled_buttons {
			enabled.retain(|id| catalog.contains(id));
		}

		let mut seen = IndexSet::new();
		self.button_order.retain(|id| catalog.contains(id) && seen.insert(id.clone()));

		self.role_visibility.retain(|id, roles| {
			roles.retain(|role| known_roles.iter().any(|known| known.as_str() == role.as_ref()));
			catalog.contains(id) && !roles.is_empty()
		});

		self
	}

	/// Removes every reference to a button, returns true if anything changed
	pub fn strip_button(&mut self, id: &str) -> bool {
		let mut changed = false;
		if let Some(enabled) = &mut self.enabled_buttons {
			changed |= enabled.shift_remove(id);
		}
		let before = self.button_order.len();
		self.button_order.retain(|entry| entry.as_ref() != id);
		changed |= self.button_order.len() != before;
		changed |= self.role_visibility.shift_remove(id).is_some();
		changed
	}

	/// Whether the button is enabled
	pub fn is_enabled(&self, id: &str) -> bool {
		self.enabled_buttons.as_ref().is_none_or(|enabled| enabled.contains(id))
	}

	/// Roles allowed to see the button, `None` if unrestricted
	pub fn allowed_roles(&self, id: &str) -> Option<&[Box<str>]> {
		self.role_visibility.get(id).map(Vec::as_slice).filter(|roles| !roles.is_empty())
	}

	pub fn to_document(&self) -> ClResult<Value> {
		Ok(serde_json::to_value(self)?)
	}
}

/// Reads the preferences, `None` if the document does not exist
pub async fn read_preferences(store: &dyn ConfigStore) -> ClResult<Option<UserPreferences>> {
	Ok(store.get(OPTIONS_KEY).await?.map(|doc| UserPreferences::from_document(&doc)))
}

/// Reads the preferences for rendering; store failures degrade to defaults
pub async fn load_preferences(store: &dyn ConfigStore) -> UserPreferences {
	match read_preferences(store).await {
		Ok(prefs) => prefs.unwrap_or_default(),
		Err(err) => {
			warn!("Failed to read preferences, using defaults: {}", err);
			UserPreferences::default()
		}
	}
}

pub async fn write_preferences(store: &dyn ConfigStore, prefs: &UserPreferences) -> ClResult<()> {
	store.set(OPTIONS_KEY, prefs.to_document()?).await
}


// vim: ts=4
