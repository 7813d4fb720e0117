//! Button definitions
//!
//! Built-in buttons are compiled in and immutable. Custom buttons are created
//! at runtime and live in the custom button document (see `custom`).

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use launchpad_types::utils::is_valid_button_id;

/// Icon used when a custom button does not name one
pub const DEFAULT_ICON: &str = "dashicons-admin-generic";

/// Held by every logged-in user
pub const LEAST_PRIVILEGED_CAPABILITY: &str = "read";

/// Capability that makes a viewer an administrator of the launchpad
pub const ADMIN_CAPABILITY: &str = "manage_options";

/// Capabilities a custom button may require, with labels for the settings editor
pub const AVAILABLE_CAPABILITIES: &[(&str, &str)] = &[
	("read", "Read (All Users)"),
	("edit_posts", "Edit Posts"),
	("edit_pages", "Edit Pages"),
	("edit_others_posts", "Edit Others Posts"),
	("publish_posts", "Publish Posts"),
	("manage_categories", "Manage Categories"),
	("moderate_comments", "Moderate Comments"),
	("upload_files", "Upload Files"),
	("activate_plugins", "Activate Plugins"),
	("edit_theme_options", "Edit Theme Options"),
	("list_users", "List Users"),
	("manage_options", "Manage Options (Administrator)"),
	("switch_themes", "Switch Themes"),
];

/// Maps a requested capability to one a custom button may carry
///
/// Unknown or missing capabilities become `read`.
pub fn normalize_capability(capability: Option<&str>) -> &'static str {
	capability
		.and_then(|cap| AVAILABLE_CAPABILITIES.iter().find(|(known, _)| *known == cap.trim()))
		.map_or(LEAST_PRIVILEGED_CAPABILITY, |&(known, _)| known)
}

/// A single launchpad button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDefinition {
	pub id: Box<str>,
	pub label: Box<str>,
	/// Admin-relative URL or route
	pub url: Box<str>,
	pub icon: Box<str>,
	/// Capability the viewer must hold to see the button
	pub capability: Box<str>,
	#[serde(rename = "custom", default)]
	pub is_custom: bool,
}

impl ButtonDefinition {
	/// Create a builder for constructing a ButtonDefinition
	pub fn builder(id: impl Into<String>) -> ButtonDefinitionBuilder {
		ButtonDefinitionBuilder::new(id)
	}
}

/// Builder for ButtonDefinition with fluent API
///
/// Meant for catalog extensions; custom buttons created by administrators go
/// through `ButtonRegistry::create_custom_button` instead.
#[derive(Debug)]
pub struct ButtonDefinitionBuilder {
	id: String,
	label: Option<String>,
	url: Option<String>,
	icon: Option<String>,
	capability: Option<String>,
	custom: bool,
}

impl ButtonDefinitionBuilder {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), label: None, url: None, icon: None, capability: None, custom: false }
	}

	/// Set the label (required)
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the target URL (required)
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	/// Set the icon (defaults to the generic admin icon)
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	/// Set the required capability (defaults to `read`)
	pub fn capability(mut self, capability: impl Into<String>) -> Self {
		self.capability = Some(capability.into());
		self
	}

	pub fn custom(mut self, custom: bool) -> Self {
		self.custom = custom;
		self
	}

	/// Build the ButtonDefinition
	pub fn build(self) -> ClResult<ButtonDefinition> {
		if !is_valid_button_id(&self.id)? {
			return Err(Error::InvalidIdentifierFormat(self.id));
		}
		let label = self
			.label
			.filter(|l| !l.trim().is_empty())
			.ok_or_else(|| Error::ConfigError(format!("Button '{}' has no label", self.id)))?;
		let url = self
			.url
			.filter(|u| !u.trim().is_empty())
			.ok_or_else(|| Error::ConfigError(format!("Button '{}' has no url", self.id)))?;

		Ok(ButtonDefinition {
			id: self.id.into(),
			label: label.into(),
			url: url.into(),
			icon: self.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()).into(),
			capability: self
				.capability
				.unwrap_or_else(|| LEAST_PRIVILEGED_CAPABILITY.to_string())
				.into(),
			is_custom: self.custom,
		})
	}
}

struct Builtin {
	id: &'static str,
	label: &'static str,
	url: &'static str,
	icon: &'static str,
	capability: &'static str,
}

/// Built-in buttons, three rows of five: content, appearance, administration
const BUILTIN_BUTTONS: &[Builtin] = &[
	// Content
	Builtin {
		id: "posts",
		label: "Posts",
		url: "edit.php",
		icon: "dashicons-admin-post",
		capability: "edit_posts",
	},
	Builtin {
		id: "categories",
		label: "Categories",
		url: "edit-tags.php?taxonomy=category",
		icon: "dashicons-category",
		capability: "manage_categories",
	},
	Builtin {
		id: "tags",
		label: "Tags",
		url: "edit-tags.php?taxonomy=post_tag",
		icon: "dashicons-tag",
		capability: "manage_categories",
	},
	Builtin {
		id: "pages",
		label: "Pages",
		url: "edit.php?post_type=page",
		icon: "dashicons-admin-page",
		capability: "edit_pages",
	},
	Builtin {
		id: "media",
		label: "Media",
		url: "upload.php",
		icon: "dashicons-admin-media",
		capability: "upload_files",
	},
	// Appearance
	Builtin {
		id: "themes",
		label: "Themes",
		url: "themes.php",
		icon: "dashicons-admin-appearance",
		capability: "switch_themes",
	},
	Builtin {
		id: "widgets",
		label: "Widgets",
		url: "widgets.php",
		icon: "dashicons-screenoptions",
		capability: "edit_theme_options",
	},
	Builtin {
		id: "menus",
		label: "Menus",
		url: "nav-menus.php",
		icon: "dashicons-menu",
		capability: "edit_theme_options",
	},
	Builtin {
		id: "customizer",
		label: "Customizer",
		url: "customize.php",
		icon: "dashicons-admin-customizer",
		capability: "customize",
	},
	Builtin {
		id: "plugins",
		label: "Plugins",
		url: "plugins.php",
		icon: "dashicons-admin-plugins",
		capability: "activate_plugins",
	},
	// Administration
	Builtin {
		id: "users",
		label: "Users",
		url: "users.php",
		icon: "dashicons-admin-users",
		capability: "list_users",
	},
	Builtin {
		id: "settings",
		label: "Settings",
		url: "options-general.php",
		icon: "dashicons-admin-settings",
		capability: "manage_options",
	},
	Builtin {
		id: "tools",
		label: "Tools",
		url: "tools.php",
		icon: "dashicons-admin-tools",
		capability: "manage_options",
	},
	Builtin {
		id: "updates",
		label: "Updates",
		url: "update-core.php",
		icon: "dashicons-update",
		capability: "update_core",
	},
	Builtin {
		id: "site_health",
		label: "Site Health",
		url: "site-health.php",
		icon: "dashicons-heart",
		capability: "manage_options",
	},
];

/// Built-in buttons in declared order
pub fn builtin_buttons() -> impl Iterator<Item = ButtonDefinition> {
	BUILTIN_BUTTONS.iter().map(|b| ButtonDefinition {
		id: b.id.into(),
		label: b.label.into(),
		url: b.url.into(),
		icon: b.icon.into(),
		capability: b.capability.into(),
		is_custom: false,
	})
}

pub fn is_builtin(id: &str) -> bool {
	BUILTIN_BUTTONS.iter().any(|b| b.id == id)
}


// vim: ts=4
