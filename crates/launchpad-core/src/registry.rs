//! Button registry with catalog caching
//!
//! The catalog is assembled from three layers:
//! 1. the compiled-in buttons,
//! 2. the optional catalog extension (one function, catalog → catalog),
//! 3. custom buttons from the store, overriding on identifier collision.
//!
//! The assembled catalog is cached with a TTL and dropped on every mutation
//! of custom buttons or preferences.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::catalog::ButtonCatalog;
use crate::custom::CustomButtons;
use crate::prelude::*;
use launchpad_types::store_adapter::{CUSTOM_BUTTONS_KEY, ConfigStore};

/// Catalog extension hook, invoked once per catalog assembly
pub type CatalogExtension = Box<dyn Fn(ButtonCatalog) -> ButtonCatalog + Send + Sync>;

/// Catalog lifetime when nothing invalidates it
pub const DEFAULT_CATALOG_TTL_SECS: i64 = 60 * 60; // 1 hour

#[derive(Debug)]
struct CachedCatalog {
	catalog: Arc<ButtonCatalog>,
	expires_at: Timestamp,
}

/// Single-entry TTL cache for the assembled catalog
#[derive(Debug)]
pub struct CatalogCache {
	entry: RwLock<Option<CachedCatalog>>,
	ttl_secs: i64,
}

impl CatalogCache {
	pub fn new(ttl_secs: i64) -> Self {
		Self { entry: RwLock::new(None), ttl_secs: ttl_secs.max(0) }
	}

	/// Returns the cached catalog unless it has expired
	pub fn get(&self) -> Option<Arc<ButtonCatalog>> {
		self.get_at(Timestamp::now())
	}

	fn get_at(&self, now: Timestamp) -> Option<Arc<ButtonCatalog>> {
		{
			let entry = self.entry.read();
			match entry.as_ref() {
				Some(cached) if now < cached.expires_at => return Some(cached.catalog.clone()),
				None => return None,
				Some(_) => {}
			}
		}
		// Expired - drop it unless a fresh one was stored meanwhile
		let mut entry = self.entry.write();
		if entry.as_ref().is_some_and(|cached| now >= cached.expires_at) {
			*entry = None;
		}
		None
	}

	pub fn put(&self, catalog: Arc<ButtonCatalog>) {
		self.put_at(catalog, Timestamp::now());
	}

	fn put_at(&self, catalog: Arc<ButtonCatalog>, now: Timestamp) {
		let expires_at = now.add_seconds(self.ttl_secs);
		*self.entry.write() = Some(CachedCatalog { catalog, expires_at });
	}

	pub fn clear(&self) {
		self.entry.write().take();
	}

	pub fn is_empty(&self) -> bool {
		self.entry.read().is_none()
	}

	pub fn ttl_secs(&self) -> i64 {
		self.ttl_secs
	}
}

impl Default for CatalogCache {
	fn default() -> Self {
		Self::new(DEFAULT_CATALOG_TTL_SECS)
	}
}

/// Supplies the merged button catalog and owns custom button mutations
pub struct ButtonRegistry {
	store: Arc<dyn ConfigStore>,
	cache: CatalogCache,
	extension: Option<CatalogExtension>,
}

impl std::fmt::Debug for ButtonRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ButtonRegistry")
			.field("store", &self.store)
			.field("cache", &self.cache)
			.field("extension", &self.extension.is_some())
			.finish()
	}
}

impl ButtonRegistry {
	pub fn new(store: Arc<dyn ConfigStore>, ttl_secs: i64) -> Self {
		Self { store, cache: CatalogCache::new(ttl_secs), extension: None }
	}

	/// Installs the catalog extension, replacing any previous one
	pub fn with_extension<F>(mut self, f: F) -> Self
	where
		F: Fn(ButtonCatalog) -> ButtonCatalog + Send + Sync + 'static,
	{
		self.extension = Some(Box::new(f));
		self.cache.clear();
		self
	}

	pub fn store(&self) -> &Arc<dyn ConfigStore> {
		&self.store
	}

	pub fn cache(&self) -> &CatalogCache {
		&self.cache
	}

	/// Returns the merged catalog, rebuilding it on cache miss
	///
	/// Never fails: if custom buttons cannot be read, the catalog degrades to
	/// built-ins plus the extension and is not cached.
	pub async fn get_catalog(&self) -> Arc<ButtonCatalog> {
		if let Some(catalog) = self.cache.get() {
			debug!("Catalog cache hit");
			return catalog;
		}

		debug!("Catalog cache miss, rebuilding");
		match self.load_custom_buttons().await {
			Ok(customs) => {
				let catalog = Arc::new(self.assemble(&customs));
				self.cache.put(catalog.clone());
				catalog
			}
			Err(err) => {
				warn!("Failed to read custom buttons, serving built-in catalog: {}", err);
				Arc::new(self.assemble(&CustomButtons::default()))
			}
		}
	}

	/// Drops the cached catalog
	pub fn invalidate_catalog(&self) {
		debug!("Catalog cache invalidated");
		self.cache.clear();
	}

	pub(crate) fn assemble(&self, customs: &CustomButtons) -> ButtonCatalog {
		let mut catalog = ButtonCatalog::builtin();
		if let Some(extension) = &self.extension {
			catalog = extension(catalog);
		}
		catalog.merge(customs.definitions());
		catalog
	}

	/// Reads the custom button document
	pub async fn load_custom_buttons(&self) -> ClResult<CustomButtons> {
		let doc = self.store.get(CUSTOM_BUTTONS_KEY).await?;
		Ok(doc.map(|doc| CustomButtons::from_document(&doc)).unwrap_or_default())
	}

	pub(crate) async fn save_custom_buttons(&self, customs: &CustomButtons) -> ClResult<()> {
		self.store.set(CUSTOM_BUTTONS_KEY, customs.to_document()?).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::button::ButtonDefinition;
	use crate::memory_store::MemoryStore;
	use async_trait::async_trait;

	#[derive(Debug)]
	struct BrokenStore;

	#[async_trait]
	impl ConfigStore for BrokenStore {
		async fn get(&self, _key: &str) -> ClResult<Option<serde_json::Value>> {
			Err(Error::DbError)
		}
		async fn set(&self, _key: &str, _value: serde_json::Value) -> ClResult<()> {
			Err(Error::DbError)
		}
		async fn delete(&self, _key: &str) -> ClResult<()> {
			Err(Error::DbError)
		}
	}

	#[test]
	fn test_cache_ttl() {
		let cache = CatalogCache::new(60);
		assert!(cache.is_empty());

		let now = Timestamp(1_000);
		cache.put_at(Arc::new(ButtonCatalog::builtin()), now);
		assert!(cache.get_at(now).is_some());
		assert!(cache.get_at(now.add_seconds(59)).is_some());

		// Expired entries are dropped on read
		assert!(cache.get_at(now.add_seconds(60)).is_none());
		assert!(cache.is_empty());
	}

	#[test]
	fn test_cache_clear() {
		let cache = CatalogCache::default();
		assert_eq!(cache.ttl_secs(), 3600);
		cache.put(Arc::new(ButtonCatalog::builtin()));
		assert!(cache.get().is_some());
		cache.clear();
		assert!(cache.get().is_none());
	}

	#[tokio::test]
	async fn test_catalog_is_cached_until_invalidated() {
		let store = Arc::new(MemoryStore::new());
		let registry = ButtonRegistry::new(store.clone(), DEFAULT_CATALOG_TTL_SECS);

		let first = registry.get_catalog().await;
		assert_eq!(first.len(), 15);

		// Direct store write bypasses invalidation, cached catalog is served
		store
			.set(
				CUSTOM_BUTTONS_KEY,
				serde_json::json!({
					"reports": {"label": "Reports", "url": "admin.php?page=reports", "icon": "dashicons-chart-bar", "capability": "read", "custom": true}
				}),
			)
			.await
			.unwrap();
		assert_eq!(registry.get_catalog().await.len(), 15);

		registry.invalidate_catalog();
		let rebuilt = registry.get_catalog().await;
		assert_eq!(rebuilt.len(), 16);
		assert!(rebuilt.get("reports").unwrap().is_custom);
	}

	#[tokio::test]
	async fn test_extension_runs_before_custom_merge() {
		let store = Arc::new(MemoryStore::new());
		store
			.set(
				CUSTOM_BUTTONS_KEY,
				serde_json::json!({
					"shop": {"label": "My Shop", "url": "admin.php?page=shop", "icon": "dashicons-cart", "capability": "read", "custom": true}
				}),
			)
			.await
			.unwrap();

		let registry =
			ButtonRegistry::new(store, DEFAULT_CATALOG_TTL_SECS).with_extension(|mut catalog| {
				catalog.remove("customizer");
				if let Ok(def) = ButtonDefinition::builder("shop")
					.label("Shop")
					.url("admin.php?page=wc")
					.capability("manage_woocommerce")
					.build()
				{
					catalog.insert(def);
				}
				catalog
			});

		let catalog = registry.get_catalog().await;
		assert!(!catalog.contains("customizer"));
		// Custom definition wins over the extension's
		let shop = catalog.get("shop").unwrap();
		assert_eq!(shop.label.as_ref(), "My Shop");
		assert!(shop.is_custom);
		assert_eq!(catalog.ids().last(), Some("shop"));
	}

	#[tokio::test]
	async fn test_store_failure_degrades_to_builtins() {
		let registry = ButtonRegistry::new(Arc::new(BrokenStore), DEFAULT_CATALOG_TTL_SECS);
		let catalog = registry.get_catalog().await;
		assert_eq!(*catalog, ButtonCatalog::builtin());
		// Degraded catalog is not cached
		assert!(registry.cache().is_empty());
	}
}

// vim: ts=4
