//! Button catalog
//!
//! Ordered identifier → definition mapping. Built-ins come first in declared
//! order, custom buttons follow in creation order. Inserting an identifier
//! that already exists replaces the definition in place.

use indexmap::IndexMap;
use serde::Serialize;

use crate::button::{ButtonDefinition, builtin_buttons};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ButtonCatalog {
	buttons: IndexMap<Box<str>, ButtonDefinition>,
}

impl ButtonCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Catalog holding only the compiled-in buttons
	pub fn builtin() -> Self {
		builtin_buttons().collect()
	}

	/// Inserts a definition, replacing (in place) any entry with the same id
	pub fn insert(&mut self, def: ButtonDefinition) -> Option<ButtonDefinition> {
		self.buttons.insert(def.id.clone(), def)
	}

	/// Removes a definition, keeping the order of the remaining entries
	pub fn remove(&mut self, id: &str) -> Option<ButtonDefinition> {
		self.buttons.shift_remove(id)
	}

	/// Keeps only the definitions matching the predicate
	pub fn retain(&mut self, mut keep: impl FnMut(&ButtonDefinition) -> bool) {
		self.buttons.retain(|_, def| keep(def));
	}

	/// Merges custom definitions on top; a custom id colliding with an
	/// existing one wins
	pub fn merge(&mut self, customs: impl IntoIterator<Item = ButtonDefinition>) {
		for def in customs {
			self.insert(def);
		}
	}

	pub fn get(&self, id: &str) -> Option<&ButtonDefinition> {
		self.buttons.get(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.buttons.contains_key(id)
	}

	/// Identifiers in catalog order
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.buttons.keys().map(AsRef::as_ref)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ButtonDefinition> {
		self.buttons.values()
	}

	pub fn len(&self) -> usize {
		self.buttons.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buttons.is_empty()
	}
}

impl FromIterator<ButtonDefinition> for ButtonCatalog {
	fn from_iter<I: IntoIterator<Item = ButtonDefinition>>(iter: I) -> Self {
		let mut catalog = Self::new();
		catalog.merge(iter);
		catalog
	}
}


// vim: ts=4
