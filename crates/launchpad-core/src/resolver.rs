//! Button visibility and ordering resolver
//!
//! Turns the catalog, the stored preferences and the viewer identity into the
//! ordered list of buttons the viewer gets to see. Pure and infallible: stale
//! or malformed preferences only ever hide or reorder buttons.

use indexmap::IndexSet;
use serde::Serialize;

use crate::catalog::ButtonCatalog;
use crate::preferences::UserPreferences;
use crate::viewer::ViewerIdentity;

/// One entry of the resolved list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedButton {
	pub id: Box<str>,
	pub label: Box<str>,
	pub url: Box<str>,
	pub icon: Box<str>,
}

/// Stored order first (each id once), then catalog ids it does not mention
pub fn working_order<'a>(catalog: &'a ButtonCatalog, prefs: &'a UserPreferences) -> Vec<&'a str> {
	let mut order: IndexSet<&str> = prefs.button_order.iter().map(AsRef::as_ref).collect();
	order.extend(catalog.ids());
	order.into_iter().collect()
}

pub fn resolve(
	catalog: &ButtonCatalog,
	prefs: &UserPreferences,
	viewer: &ViewerIdentity,
) -> Vec<ResolvedButton> {
	working_order(catalog, prefs)
		.into_iter()
		.filter(|id| prefs.is_enabled(id))
		.filter_map(|id| catalog.get(id))
		.filter(|def| viewer.has_capability(&def.capability))
		.filter(|def| prefs.allowed_roles(&def.id).is_none_or(|roles| viewer.has_any_role(roles)))
		.map(|def| ResolvedButton {
			id: def.id.clone(),
			label: def.label.clone(),
			url: def.url.clone(),
			icon: def.icon.clone(),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::button::ButtonDefinition;
	use serde_json::json;

	fn two_button_catalog() -> ButtonCatalog {
		let mut catalog = ButtonCatalog::builtin();
		catalog.retain(|def| ["posts", "settings"].contains(&def.id.as_ref()));
		catalog
	}

	fn ids(list: &[ResolvedButton]) -> Vec<&str> {
		list.iter().map(|b| b.id.as_ref()).collect()
	}

	fn all_caps() -> ViewerIdentity {
		let caps: Vec<_> = ButtonCatalog::builtin().iter().map(|d| d.capability.to_string()).collect();
		ViewerIdentity::new().with_capabilities(caps)
	}

	#[test]
	fn test_capability_filters_and_order_is_respected() {
		let prefs = UserPreferences::from_document(&json!({
			"enabled_buttons": ["posts", "settings"],
			"button_order": ["settings", "posts"]
		}));
		let viewer = ViewerIdentity::new().with_capabilities(["edit_posts"]);

		let list = resolve(&two_button_catalog(), &prefs, &viewer);
		assert_eq!(ids(&list), vec!["posts"]);
		assert_eq!(list[0].url.as_ref(), "edit.php");
	}

	#[test]
	fn test_disjoint_roles_exclude_button() {
		let prefs = UserPreferences::from_document(&json!({
			"enabled_buttons": ["posts", "settings"],
			"button_order": ["settings", "posts"],
			"role_visibility": {"settings": ["editor"]}
		}));
		let viewer = ViewerIdentity::new()
			.with_capabilities(["edit_posts", "manage_options"])
			.with_roles(["subscriber"]);

		let list = resolve(&two_button_catalog(), &prefs, &viewer);
		assert_eq!(ids(&list), vec!["posts"]);

		let editor = viewer.clone().with_roles(["editor"]);
		let list = resolve(&two_button_catalog(), &prefs, &editor);
		assert_eq!(ids(&list), vec!["settings", "posts"]);
	}

	#[test]
	fn test_defaults_show_every_accessible_button_in_catalog_order() {
		let catalog = ButtonCatalog::builtin();
		let list = resolve(&catalog, &UserPreferences::default(), &all_caps());
		let expected: Vec<_> = catalog.ids().collect();
		assert_eq!(ids(&list), expected);
	}

	#[test]
	fn test_capability_is_never_bypassed() {
		let catalog = ButtonCatalog::builtin();
		let prefs = UserPreferences::from_document(&json!({
			"role_visibility": {"settings": ["administrator"]}
		}));
		let viewer = ViewerIdentity::new()
			.with_capabilities(["read", "edit_posts"])
			.with_roles(["administrator"]);

		let list = resolve(&catalog, &prefs, &viewer);
		for button in &list {
			let def = catalog.get(&button.id).unwrap();
			assert!(viewer.has_capability(&def.capability));
		}
		assert_eq!(ids(&list), vec!["posts"]);
	}

	#[test]
	fn test_stale_order_and_new_buttons() {
		let mut catalog = two_button_catalog();
		catalog.insert(
			ButtonDefinition::builder("reports")
				.label("Reports")
				.url("admin.php?page=reports")
				.custom(true)
				.build()
				.unwrap(),
		);
		let prefs = UserPreferences::from_document(&json!({
			"button_order": ["deleted", "reports", "settings", "reports"]
		}));

		let order = working_order(&catalog, &prefs);
		assert_eq!(order, vec!["deleted", "reports", "settings", "posts"]);

		let list = resolve(&catalog, &prefs, &all_caps());
		assert_eq!(ids(&list), vec!["reports", "settings", "posts"]);
	}

	#[test]
	fn test_empty_enabled_set_shows_nothing() {
		let prefs = UserPreferences::from_document(&json!({"enabled_buttons": []}));
		assert!(resolve(&ButtonCatalog::builtin(), &prefs, &all_caps()).is_empty());
	}

	#[test]
	fn test_enabled_but_unknown_is_skipped() {
		let prefs = UserPreferences::from_document(&json!({"enabled_buttons": ["ghost", "posts"]}));
		let list = resolve(&ButtonCatalog::builtin(), &prefs, &all_caps());
		assert_eq!(ids(&list), vec!["posts"]);
	}

	#[test]
	fn test_deterministic() {
		let catalog = ButtonCatalog::builtin();
		let prefs = UserPreferences::from_document(&json!({
			"button_order": ["tools", "media", "posts"],
			"role_visibility": {"media": ["editor"]}
		}));
		let viewer = all_caps().with_roles(["editor"]);
		assert_eq!(resolve(&catalog, &prefs, &viewer), resolve(&catalog, &prefs, &viewer));
	}
}

// vim: ts=4
