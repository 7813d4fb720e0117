//! In-memory configuration store
//!
//! Used for tests and for embedding the launchpad without persistence.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::prelude::*;
use launchpad_types::store_adapter::ConfigStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
	docs: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.docs.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.docs.read().is_empty()
	}
}

#[async_trait]
impl ConfigStore for MemoryStore {
	async fn get(&self, key: &str) -> ClResult<Option<serde_json::Value>> {
		Ok(self.docs.read().get(key).cloned())
	}

	async fn set(&self, key: &str, value: serde_json::Value) -> ClResult<()> {
		self.docs.write().insert(key.to_string(), value);
		Ok(())
	}

	async fn delete(&self, key: &str) -> ClResult<()> {
		self.docs.write().remove(key);
		Ok(())
	}

	async fn add(&self, key: &str, value: serde_json::Value) -> ClResult<bool> {
		let mut docs = self.docs.write();
		if docs.contains_key(key) {
			return Ok(false);
		}
		docs.insert(key.to_string(), value);
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_crud() {
		let store = MemoryStore::new();
		assert!(store.get("k").await.unwrap().is_none());

		store.set("k", serde_json::json!({"a": 1})).await.unwrap();
		assert_eq!(store.get("k").await.unwrap(), Some(serde_json::json!({"a": 1})));

		store.delete("k").await.unwrap();
		store.delete("k").await.unwrap();
		assert!(store.is_empty());
	}

	#[tokio::test]
	async fn test_add_only_if_absent() {
		let store = MemoryStore::new();
		assert!(store.add("k", serde_json::json!(1)).await.unwrap());
		assert!(!store.add("k", serde_json::json!(2)).await.unwrap());
		assert_eq!(store.get("k").await.unwrap(), Some(serde_json::json!(1)));
		assert_eq!(store.len(), 1);
	}
}

// vim: ts=4
