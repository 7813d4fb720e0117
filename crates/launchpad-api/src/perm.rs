//! Administrator permission middleware

use axum::{extract::Request, middleware::Next, response::Response};

use crate::extract::Auth;
use crate::prelude::*;

/// Middleware that checks if the current viewer is a launchpad administrator
pub async fn require_admin(Auth(auth): Auth, req: Request, next: Next) -> Result<Response, Error> {
	if !auth.viewer.is_admin() {
		warn!(
			subject = %auth.user_id,
			"Admin permission denied - manage_options capability required"
		);
		return Err(Error::PermissionDenied);
	}

	Ok(next.run(req).await)
}

// vim: ts=4
