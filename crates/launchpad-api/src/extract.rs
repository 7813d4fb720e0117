//! Request identity and extractors
//!
//! The host authenticates the user and passes the identity in trusted
//! headers. `identify_viewer` turns them into an `Auth` request extension.

use axum::{
	extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
	http::{HeaderMap, request::Parts},
	middleware::Next,
	response::Response,
};

use crate::prelude::*;
use launchpad_core::ViewerIdentity;

pub const USER_HEADER: &str = "x-launchpad-user";
pub const ROLES_HEADER: &str = "x-launchpad-roles";
pub const CAPABILITIES_HEADER: &str = "x-launchpad-capabilities";
pub const NONCE_HEADER: &str = "x-launchpad-nonce";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authenticated viewer
#[derive(Debug, Clone)]
pub struct AuthCtx {
	pub user_id: Box<str>,
	pub viewer: ViewerIdentity,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers.get(name).and_then(|h| h.to_str().ok()).map(str::trim).filter(|v| !v.is_empty())
}

fn header_list<'a>(headers: &'a HeaderMap, name: &str) -> impl Iterator<Item = &'a str> {
	header_str(headers, name).into_iter().flat_map(|v| v.split(',')).map(str::trim)
}

/// Reads the identity headers into an `Auth` extension
///
/// Requests without a user header pass through unauthenticated.
pub async fn identify_viewer(mut req: Request, next: Next) -> Response {
	let (auth, req_id) = {
		let headers = req.headers();
		let auth = header_str(headers, USER_HEADER).map(|user_id| {
			let viewer = ViewerIdentity::new()
				.with_capabilities(header_list(headers, CAPABILITIES_HEADER))
				.with_roles(header_list(headers, ROLES_HEADER));
			Auth(AuthCtx { user_id: user_id.into(), viewer })
		});
		let req_id = header_str(headers, REQUEST_ID_HEADER).map(|id| RequestId(id.to_string()));
		(auth, req_id)
	};

	if let Some(auth) = auth {
		req.extensions_mut().insert(auth);
	}
	if let Some(req_id) = req_id {
		req.extensions_mut().insert(req_id);
	}
	next.run(req).await
}

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// Nonce //
//*******//
/// Replay-protection token sent with a mutation
#[derive(Debug, Clone)]
pub struct Nonce(pub String);

impl<S> FromRequestParts<S> for Nonce
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		match header_str(&parts.headers, NONCE_HEADER) {
			Some(nonce) => Ok(Nonce(nonce.to_string())),
			None => {
				warn!("Mutation request without nonce");
				Err(Error::PermissionDenied)
			}
		}
	}
}

// JsonBody //
//**********//
/// JSON request body whose rejection is an `InvalidRequest` error
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
	axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		match axum::Json::<T>::from_request(req, state).await {
			Ok(axum::Json(value)) => Ok(JsonBody(value)),
			Err(rejection) => {
				debug!("Rejected request body: {}", rejection.body_text());
				Err(Error::InvalidRequest(rejection.body_text()))
			}
		}
	}
}

// RequestId //
//***********//
/// Request ID for tracing and debugging
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Optional Request ID extractor - always succeeds, returns None if not available
#[derive(Clone, Debug)]
pub struct OptionalRequestId(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalRequestId
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let req_id = parts.extensions.get::<RequestId>().map(|r| r.0.clone());
		Ok(OptionalRequestId(req_id))
	}
}

// vim: ts=4
