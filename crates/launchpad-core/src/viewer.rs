//! Viewer identity
//!
//! Capabilities and roles of the user a page is resolved for. Supplied by the
//! host on every request and never mutated here.

use std::collections::HashSet;

use crate::button::ADMIN_CAPABILITY;
use crate::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerIdentity {
	capabilities: HashSet<Box<str>>,
	roles: HashSet<Box<str>>,
}

impl ViewerIdentity {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.capabilities.extend(normalized(capabilities));
		self
	}

	pub fn with_roles<I, S>(mut self, roles: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.roles.extend(normalized(roles));
		self
	}

	pub fn has_capability(&self, capability: &str) -> bool {
		self.capabilities.contains(capability)
	}

	/// True if the viewer holds at least one of the roles
	pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
		roles.iter().any(|role| self.roles.contains(role.as_ref()))
	}

	pub fn is_admin(&self) -> bool {
		self.has_capability(ADMIN_CAPABILITY)
	}

	pub fn capabilities(&self) -> impl Iterator<Item = &str> {
		self.capabilities.iter().map(AsRef::as_ref)
	}

	pub fn roles(&self) -> impl Iterator<Item = &str> {
		self.roles.iter().map(AsRef::as_ref)
	}
}

fn normalized<I, S>(items: I) -> impl Iterator<Item = Box<str>>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	items.into_iter().filter_map(|item| {
		let item = item.as_ref().trim();
		(!item.is_empty()).then(|| item.into())
	})
}

/// Fails with `PermissionDenied` unless the viewer is an administrator
pub fn require_admin(viewer: &ViewerIdentity) -> ClResult<()> {
	if viewer.is_admin() {
		Ok(())
	} else {
		Err(Error::PermissionDenied)
	}
}


// vim: ts=4
