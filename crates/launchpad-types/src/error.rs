//! Error type shared by every Launchpad crate
//!
//! Mutation endpoints surface these as structured JSON responses; the read
//! path (catalog assembly, resolving) never returns them to the viewer.

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Missing identity, missing administrator rights or a rejected nonce
	PermissionDenied,
	/// Missing or malformed field
	InvalidRequest(String),
	/// Button identifier already present in the catalog
	DuplicateIdentifier(String),
	/// Button identifier does not match `^[a-z0-9_-]+$`
	InvalidIdentifierFormat(String),
	/// Operation targets a custom button that does not exist
	NotFound,

	/// Invalid static configuration (definitions, server config)
	ConfigError(String),
	/// Store failure, details are logged where they happen
	DbError,
	Parse,
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Stable machine-readable code for the JSON body
	pub fn code(&self) -> &'static str {
		match self {
			Error::PermissionDenied => "E-PERM-DENIED",
			Error::InvalidRequest(_) => "E-INVALID-REQUEST",
			Error::DuplicateIdentifier(_) => "E-DUPLICATE-ID",
			Error::InvalidIdentifierFormat(_) => "E-INVALID-ID",
			Error::NotFound => "E-NOT-FOUND",
			Error::ConfigError(_) => "E-CONFIG",
			Error::DbError => "E-DB",
			Error::Parse => "E-PARSE",
			Error::Internal(_) | Error::Io(_) => "E-INTERNAL",
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::InvalidRequest(_) | Error::InvalidIdentifierFormat(_) | Error::Parse => {
				StatusCode::BAD_REQUEST
			}
			Error::DuplicateIdentifier(_) => StatusCode::CONFLICT,
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::ConfigError(_) | Error::DbError | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::PermissionDenied => write!(f, "Insufficient permissions"),
			Error::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
			Error::DuplicateIdentifier(id) => write!(f, "Button ID already exists: {}", id),
			Error::InvalidIdentifierFormat(id) => write!(
				f,
				"Button ID '{}' can only contain lowercase letters, numbers, underscores, and hyphens",
				id
			),
			Error::NotFound => write!(f, "Custom button not found"),
			Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
			Error::DbError => write!(f, "Storage error"),
			Error::Parse => write!(f, "Malformed document"),
			Error::Internal(msg) => write!(f, "Internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::debug!("JSON error: {}", err);
		Self::Parse
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		// Internal details stay in the logs
		let message = match &self {
			Error::DbError | Error::Internal(_) | Error::Io(_) | Error::ConfigError(_) => {
				tracing::error!("Request failed: {}", self);
				"Internal server error".to_string()
			}
			_ => self.to_string(),
		};
		let body = serde_json::json!({
			"error": {
				"code": self.code(),
				"message": message,
			}
		});

		(status, Json(body)).into_response()
	}
}


// vim: ts=4
