//! Document table queries
//!
//! One row per key, the value is stored as JSON text.

use sqlx::{Row, SqlitePool};

use launchpad_types::prelude::*;

pub(crate) async fn init(db: &SqlitePool) -> Result<(), sqlx::Error> {
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS documents (
			key text NOT NULL,
			value text NOT NULL,
			PRIMARY KEY(key)
		)",
	)
	.execute(db)
	.await?;
	Ok(())
}

/// Read a document, `None` if missing or unparseable
pub(crate) async fn read(db: &SqlitePool, key: &str) -> ClResult<Option<serde_json::Value>> {
	let row = sqlx::query("SELECT value FROM documents WHERE key = ?")
		.bind(key)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(row.and_then(|r| {
		let value: String = r.get("value");
		serde_json::from_str(&value)
			.inspect_err(|err| warn!("Unparseable document '{}': {}", key, err))
			.ok()
	}))
}

/// Create or replace a document
pub(crate) async fn write(db: &SqlitePool, key: &str, value: &serde_json::Value) -> ClResult<()> {
	sqlx::query(
		"INSERT INTO documents (key, value) VALUES (?, ?)
		ON CONFLICT(key) DO UPDATE SET value = excluded.value",
	)
	.bind(key)
	.bind(value.to_string())
	.execute(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	Ok(())
}

/// Create a document unless the key exists, returns true if it was written
pub(crate) async fn insert(db: &SqlitePool, key: &str, value: &serde_json::Value) -> ClResult<bool> {
	let res = sqlx::query("INSERT INTO documents (key, value) VALUES (?, ?) ON CONFLICT(key) DO NOTHING")
		.bind(key)
		.bind(value.to_string())
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() > 0)
}

pub(crate) async fn delete(db: &SqlitePool, key: &str) -> ClResult<()> {
	sqlx::query("DELETE FROM documents WHERE key = ?")
		.bind(key)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(())
}

// vim: ts=4
