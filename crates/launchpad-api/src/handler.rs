//! Launchpad HTTP handlers

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::extract::{Auth, AuthCtx, JsonBody, Nonce, OptionalRequestId};
use crate::prelude::*;
use launchpad_core::nonce::{ACTION_CUSTOM_BUTTON, ACTION_ORDER, ACTION_SETTINGS};
use launchpad_core::{
	ButtonDefinition, CreateCustomButton, ResolvedButton, UpdateCustomButton, UserPreferences,
};
use launchpad_types::types::ApiResponse;

type ApiResult<T> = ClResult<(StatusCode, Json<ApiResponse<T>>)>;

fn respond<T>(data: T, req_id: Option<String>) -> ApiResponse<T> {
	let res = ApiResponse::new(data);
	match req_id {
		Some(req_id) => res.with_req_id(req_id),
		None => res,
	}
}

fn check_nonce(app: &App, action: &str, auth: &AuthCtx, nonce: &Nonce) -> ClResult<()> {
	app.nonces.verify(action, &auth.user_id, &nonce.0)
}

/// GET /api/launchpad/buttons - Buttons the caller gets to see, in display order
pub async fn get_buttons(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<Vec<ResolvedButton>> {
	let buttons = app.launchpad.buttons_for(&auth.viewer).await;
	debug!(user = %auth.user_id, count = buttons.len(), "Resolved launchpad buttons");

	let mut res = respond(buttons, req_id);
	if res.data.is_empty() {
		res = res.with_message("No buttons configured. Visit the launchpad settings to configure your buttons.");
	}
	Ok((StatusCode::OK, Json(res)))
}

/// GET /api/launchpad/catalog - Every button definition, in catalog order
pub async fn get_catalog(
	State(app): State<App>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<Vec<ButtonDefinition>> {
	let catalog = app.launchpad.catalog().await;
	let buttons = catalog.iter().cloned().collect();
	Ok((StatusCode::OK, Json(respond(buttons, req_id))))
}

#[derive(Debug, Serialize)]
pub struct CapabilityInfo {
	pub capability: &'static str,
	pub label: &'static str,
}

/// GET /api/launchpad/capabilities - Capabilities a custom button may require
pub async fn get_capabilities(
	State(app): State<App>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<Vec<CapabilityInfo>> {
	let caps = app
		.launchpad
		.capabilities()
		.iter()
		.map(|&(capability, label)| CapabilityInfo { capability, label })
		.collect();
	Ok((StatusCode::OK, Json(respond(caps, req_id))))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceTokens {
	pub custom_button: String,
	pub order: String,
	pub settings: String,
	pub expires_in: i64,
}

/// GET /api/launchpad/nonce - Fresh tokens for every mutation
pub async fn get_nonces(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<NonceTokens> {
	let user = &auth.user_id;
	let tokens = NonceTokens {
		custom_button: app.nonces.create(ACTION_CUSTOM_BUTTON, user)?,
		order: app.nonces.create(ACTION_ORDER, user)?,
		settings: app.nonces.create(ACTION_SETTINGS, user)?,
		expires_in: app.nonces.lifetime_secs() / 2,
	};
	Ok((StatusCode::OK, Json(respond(tokens, req_id))))
}

/// GET /api/launchpad/settings - Current preferences
pub async fn get_settings(
	State(app): State<App>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<UserPreferences> {
	let prefs = app.launchpad.preferences().await;
	Ok((StatusCode::OK, Json(respond(prefs, req_id))))
}

/// PUT /api/launchpad/settings - Replace the preferences
pub async fn put_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	nonce: Nonce,
	OptionalRequestId(req_id): OptionalRequestId,
	JsonBody(input): JsonBody<serde_json::Value>,
) -> ApiResult<UserPreferences> {
	check_nonce(&app, ACTION_SETTINGS, &auth, &nonce)?;
	let prefs = app.launchpad.update_preferences(&input).await?;
	info!(user = %auth.user_id, "Launchpad settings saved");
	Ok((StatusCode::OK, Json(respond(prefs, req_id).with_message("Settings saved successfully"))))
}

/// POST /api/launchpad/custom - Create a custom button
pub async fn post_custom(
	State(app): State<App>,
	Auth(auth): Auth,
	nonce: Nonce,
	OptionalRequestId(req_id): OptionalRequestId,
	JsonBody(req): JsonBody<CreateCustomButton>,
) -> ApiResult<ButtonDefinition> {
	check_nonce(&app, ACTION_CUSTOM_BUTTON, &auth, &nonce)?;
	let button = app.launchpad.create_custom_button(req).await?;
	info!(user = %auth.user_id, button = %button.id, "Custom button added");
	Ok((
		StatusCode::CREATED,
		Json(respond(button, req_id).with_message("Custom button added successfully")),
	))
}

/// PATCH /api/launchpad/custom/{id} - Update a custom button
pub async fn patch_custom(
	State(app): State<App>,
	Auth(auth): Auth,
	nonce: Nonce,
	OptionalRequestId(req_id): OptionalRequestId,
	Path(button_id): Path<String>,
	JsonBody(req): JsonBody<UpdateCustomButton>,
) -> ApiResult<ButtonDefinition> {
	check_nonce(&app, ACTION_CUSTOM_BUTTON, &auth, &nonce)?;
	let button = app.launchpad.update_custom_button(&button_id, req).await?;
	Ok((
		StatusCode::OK,
		Json(respond(button, req_id).with_message("Custom button updated successfully")),
	))
}

#[derive(Debug, Serialize)]
pub struct DeletedButton {
	pub id: String,
}

/// DELETE /api/launchpad/custom/{id} - Delete a custom button
pub async fn delete_custom(
	State(app): State<App>,
	Auth(auth): Auth,
	nonce: Nonce,
	OptionalRequestId(req_id): OptionalRequestId,
	Path(button_id): Path<String>,
) -> ApiResult<DeletedButton> {
	check_nonce(&app, ACTION_CUSTOM_BUTTON, &auth, &nonce)?;
	app.launchpad.delete_custom_button(&button_id).await?;
	Ok((
		StatusCode::OK,
		Json(
			respond(DeletedButton { id: button_id }, req_id)
				.with_message("Custom button deleted successfully"),
		),
	))
}

#[derive(Debug, Deserialize)]
pub struct SaveOrderRequest {
	#[serde(default)]
	pub order: Vec<String>,
}

/// PUT /api/launchpad/order - Save the button order
pub async fn put_order(
	State(app): State<App>,
	Auth(auth): Auth,
	nonce: Nonce,
	OptionalRequestId(req_id): OptionalRequestId,
	JsonBody(req): JsonBody<SaveOrderRequest>,
) -> ApiResult<Vec<Box<str>>> {
	check_nonce(&app, ACTION_ORDER, &auth, &nonce)?;
	let order = app.launchpad.save_order(&req.order).await?;
	Ok((StatusCode::OK, Json(respond(order, req_id).with_message("Order saved"))))
}

// vim: ts=4
