//! Launchpad server
//!
//! Serves the launchpad API over the SQLite store. Running with the
//! `uninstall` argument removes every stored launchpad document and exits.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod config;

use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use launchpad_api::AppState;
use launchpad_core::{Launchpad, NonceVerifier};
use launchpad_store_adapter_sqlite::StoreAdapterSqlite;
use launchpad_types::prelude::*;

use crate::config::ServerConfig;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> ClResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.init();
	info!("Launchpad server V{}", VERSION);

	let config = ServerConfig::from_env()?;
	let store = Arc::new(StoreAdapterSqlite::new(config.db_dir.join("launchpad.db")).await?);
	let launchpad = Launchpad::new(store, config.launchpad.clone());

	if std::env::args().nth(1).as_deref() == Some("uninstall") {
		return launchpad.uninstall().await;
	}

	let nonce_secret = config.nonce_secret()?;
	let report = launchpad.activate().await?;
	if report.ran {
		info!(
			options = report.options_copied,
			custom_buttons = report.custom_buttons_copied,
			"Legacy migration finished"
		);
	}

	let nonces = NonceVerifier::new(nonce_secret, config.launchpad.nonce_lifetime_secs)?;
	let app = Arc::new(AppState { launchpad, nonces });
	let router = launchpad_api::init(app).layer(TraceLayer::new_for_http());

	let listener = TcpListener::bind(&config.listen).await?;
	info!("Listening on {}", config.listen);
	axum::serve(listener, router).await?;

	Ok(())
}

// vim: ts=4
