//! Input sanitizing helpers
//!
//! Everything crossing a trust boundary (stored documents, request bodies)
//! goes through one of these before it reaches the typed records.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ClResult, Error};

static BUTTON_ID_REGEX: LazyLock<Result<Regex, regex::Error>> =
	LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$"));

/// Normalizes a key: lowercase, keeps only `[a-z0-9_-]`
///
/// # Examples
/// - `"Site_Health"` → `"site_health"`
/// - `"Invalid ID!"` → `"invalidid"`
pub fn sanitize_key(key: &str) -> String {
	key.chars()
		.map(|c| c.to_ascii_lowercase())
		.filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
		.collect()
}

/// Checks a button identifier against `^[a-z0-9_-]+$` without normalizing it
pub fn is_valid_button_id(id: &str) -> ClResult<bool> {
	let id_regex = BUTTON_ID_REGEX
		.as_ref()
		.map_err(|e| Error::Internal(format!("button id regex compilation failed: {}", e)))?;
	Ok(id_regex.is_match(id))
}

/// Cleans a single-line text field
///
/// Strips markup tags, turns control characters (line breaks, tabs) into
/// spaces, collapses runs of whitespace and trims. A `<` that does not open a
/// tag is kept.
pub fn sanitize_text_field(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut chars = input.chars().peekable();
	let mut in_tag = false;

	while let Some(c) = chars.next() {
		if in_tag {
			if c == '>' {
				in_tag = false;
			}
			continue;
		}
		match c {
			'<' if chars.peek().is_some_and(|n| opens_tag(*n)) => {
				in_tag = true;
			}
			c if c.is_control() => out.push(' '),
			c => out.push(c),
		}
	}

	out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn opens_tag(c: char) -> bool {
	c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')
}

/// Validates a `#rgb` / `#rrggbb` color, `None` if malformed
pub fn sanitize_hex_color(color: &str) -> Option<String> {
	let hex = color.strip_prefix('#')?;
	if (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
		Some(color.to_string())
	} else {
		None
	}
}


// vim: ts=4
