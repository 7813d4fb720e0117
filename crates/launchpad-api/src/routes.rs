//! Router setup

use axum::{
	Router, middleware,
	routing::{get, patch, post, put},
};

use crate::extract::identify_viewer;
use crate::handler;
use crate::perm::require_admin;
use crate::prelude::*;

pub fn init(app: App) -> Router {
	let admin_router = Router::new()
		.route("/api/launchpad/catalog", get(handler::get_catalog))
		.route("/api/launchpad/capabilities", get(handler::get_capabilities))
		.route("/api/launchpad/nonce", get(handler::get_nonces))
		.route("/api/launchpad/settings", get(handler::get_settings).put(handler::put_settings))
		.route("/api/launchpad/custom", post(handler::post_custom))
		.route(
			"/api/launchpad/custom/{id}",
			patch(handler::patch_custom).delete(handler::delete_custom),
		)
		.route("/api/launchpad/order", put(handler::put_order))
		.route_layer(middleware::from_fn(require_admin));

	let viewer_router = Router::new().route("/api/launchpad/buttons", get(handler::get_buttons));

	Router::new()
		.merge(viewer_router)
		.merge(admin_router)
		.layer(middleware::from_fn(identify_viewer))
		.with_state(app)
}

// vim: ts=4
