//! SQLite configuration store for Launchpad

#![forbid(unsafe_code)]

mod document;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use launchpad_types::{prelude::*, store_adapter::ConfigStore};

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	/// Opens (or creates) the database file
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		let path = path.as_ref();
		if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(dir).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		document::init(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		info!("Launchpad store opened at {}", path.display());
		Ok(Self { db })
	}
}

#[async_trait]
impl ConfigStore for StoreAdapterSqlite {
	async fn get(&self, key: &str) -> ClResult<Option<serde_json::Value>> {
		document::read(&self.db, key).await
	}

	async fn set(&self, key: &str, value: serde_json::Value) -> ClResult<()> {
		document::write(&self.db, key, &value).await
	}

	async fn delete(&self, key: &str) -> ClResult<()> {
		document::delete(&self.db, key).await
	}

	async fn add(&self, key: &str, value: serde_json::Value) -> ClResult<bool> {
		document::insert(&self.db, key, &value).await
	}
}

// vim: ts=4
