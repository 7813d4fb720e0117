//! Server configuration from the environment

use std::path::PathBuf;

use launchpad_core::LaunchpadConfig;
use launchpad_types::prelude::*;
use launchpad_types::utils::sanitize_key;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_DIR: &str = "./data";

#[derive(Debug)]
pub struct ServerConfig {
	pub listen: String,
	pub db_dir: PathBuf,
	/// Only needed for serving, `uninstall` runs without it
	pub nonce_secret: Option<String>,
	pub launchpad: LaunchpadConfig,
}

impl ServerConfig {
	pub fn from_env() -> ClResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> ClResult<Self> {
		let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

		let mut launchpad = LaunchpadConfig::default();
		if let Some(ttl) = get("LAUNCHPAD_CATALOG_TTL") {
			launchpad.catalog_ttl_secs = ttl
				.parse::<i64>()
				.ok()
				.filter(|ttl| *ttl >= 0)
				.ok_or_else(|| Error::ConfigError(format!("invalid LAUNCHPAD_CATALOG_TTL: {}", ttl)))?;
		}
		if let Some(roles) = get("LAUNCHPAD_ROLES") {
			launchpad.known_roles = roles
				.split(',')
				.map(sanitize_key)
				.filter(|role| !role.is_empty())
				.collect();
		}

		Ok(Self {
			listen: get("LAUNCHPAD_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
			db_dir: PathBuf::from(get("LAUNCHPAD_DB_DIR").unwrap_or_else(|| DEFAULT_DB_DIR.to_string())),
			nonce_secret: get("LAUNCHPAD_NONCE_SECRET"),
			launchpad,
		})
	}

	pub fn nonce_secret(&self) -> ClResult<&str> {
		self.nonce_secret
			.as_deref()
			.ok_or_else(|| Error::ConfigError("LAUNCHPAD_NONCE_SECRET is not set".into()))
	}
}


// vim: ts=4
