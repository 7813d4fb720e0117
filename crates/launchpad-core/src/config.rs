//! Launchpad configuration

use crate::nonce::DEFAULT_NONCE_LIFETIME_SECS;
use crate::registry::DEFAULT_CATALOG_TTL_SECS;

/// Roles a role-visibility entry may name unless configured otherwise
pub const DEFAULT_ROLES: &[&str] = &["administrator", "editor", "author", "contributor", "subscriber"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchpadConfig {
	/// Lifetime of the cached catalog
	pub catalog_ttl_secs: i64,
	/// Role names accepted by the preferences write path
	pub known_roles: Vec<String>,
	/// Lifetime of replay-protection tokens
	pub nonce_lifetime_secs: i64,
}

impl Default for LaunchpadConfig {
	fn default() -> Self {
		Self {
			catalog_ttl_secs: DEFAULT_CATALOG_TTL_SECS,
			known_roles: DEFAULT_ROLES.iter().map(ToString::to_string).collect(),
			nonce_lifetime_secs: DEFAULT_NONCE_LIFETIME_SECS,
		}
	}
}

// vim: ts=4
