//! Replay-protection tokens for mutation requests
//!
//! A token is an HMAC-SHA256 over (action, user, tick), truncated and encoded
//! as unpadded URL-safe base64. A tick is half the token lifetime, and tokens
//! of the current and the previous tick are accepted.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

pub const ACTION_CUSTOM_BUTTON: &str = "launchpad_custom_button";
pub const ACTION_ORDER: &str = "launchpad_order";
pub const ACTION_SETTINGS: &str = "launchpad_settings";

/// Every action a token can be issued for
pub const ACTIONS: &[&str] = &[ACTION_CUSTOM_BUTTON, ACTION_ORDER, ACTION_SETTINGS];

pub const DEFAULT_NONCE_LIFETIME_SECS: i64 = 24 * 60 * 60;

const TOKEN_BYTES: usize = 12;

pub struct NonceVerifier {
	secret: Box<[u8]>,
	lifetime_secs: i64,
}

impl std::fmt::Debug for NonceVerifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NonceVerifier")
			.field("secret", &"<redacted>")
			.field("lifetime_secs", &self.lifetime_secs)
			.finish()
	}
}

impl NonceVerifier {
	pub fn new(secret: impl AsRef<[u8]>, lifetime_secs: i64) -> ClResult<Self> {
		let secret = secret.as_ref();
		if secret.is_empty() {
			return Err(Error::ConfigError("nonce secret must not be empty".into()));
		}
		if lifetime_secs < 2 {
			return Err(Error::ConfigError(format!(
				"nonce lifetime must be at least 2 seconds, got {}",
				lifetime_secs
			)));
		}
		Ok(Self { secret: secret.into(), lifetime_secs })
	}

	pub fn lifetime_secs(&self) -> i64 {
		self.lifetime_secs
	}

	fn tick(&self, now: Timestamp) -> i64 {
		now.0.div_euclid(self.lifetime_secs / 2)
	}

	fn mac(&self, action: &str, user: &str, tick: i64) -> ClResult<HmacSha256> {
		let mut mac = HmacSha256::new_from_slice(&self.secret)
			.map_err(|_| Error::Internal("invalid nonce key".into()))?;
		mac.update(action.as_bytes());
		mac.update(b"|");
		mac.update(user.as_bytes());
		mac.update(b"|");
		mac.update(tick.to_string().as_bytes());
		Ok(mac)
	}

	/// Issues a token for the action and user
	pub fn create(&self, action: &str, user: &str) -> ClResult<String> {
		self.create_at(action, user, Timestamp::now())
	}

	pub fn create_at(&self, action: &str, user: &str, now: Timestamp) -> ClResult<String> {
		let tag = self.mac(action, user, self.tick(now))?.finalize().into_bytes();
		Ok(URL_SAFE_NO_PAD.encode(&tag[..TOKEN_BYTES]))
	}

	/// Checks a token, fails with `PermissionDenied` if it is invalid or expired
	pub fn verify(&self, action: &str, user: &str, token: &str) -> ClResult<()> {
		self.verify_at(action, user, token, Timestamp::now())
	}

	pub fn verify_at(&self, action: &str, user: &str, token: &str, now: Timestamp) -> ClResult<()> {
		let Ok(tag) = URL_SAFE_NO_PAD.decode(token.trim()) else {
			warn!("Malformed nonce for action '{}'", action);
			return Err(Error::PermissionDenied);
		};
		if tag.len() != TOKEN_BYTES {
			warn!("Nonce of wrong length for action '{}'", action);
			return Err(Error::PermissionDenied);
		}

		let tick = self.tick(now);
		for candidate in [tick, tick - 1] {
			if self.mac(action, user, candidate)?.verify_truncated_left(&tag).is_ok() {
				return Ok(());
			}
		}
		warn!("Rejected nonce for action '{}' and user '{}'", action, user);
		Err(Error::PermissionDenied)
	}
}


// vim: ts=4
