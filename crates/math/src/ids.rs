//! Identifiers shared by the registry and the resolver.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Name of one source document (e.g. `"intro/basics"`).
///
/// Cheap to clone; the registry stores one per equation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(Arc::from(name.as_ref()))
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for DocumentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for DocumentId {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for DocumentId {
	fn from(name: String) -> Self {
		Self(Arc::from(name))
	}
}

impl AsRef<str> for DocumentId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// One labelled equation and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationEntry {
	/// User-assigned label, unique across the registry.
	pub label: String,
	/// Document that owns the equation.
	pub document: DocumentId,
	/// Build-wide sequence number, starting at 1.
	pub number: u64,
}

/// Link target for an equation inside its owning document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorId(String);

impl AnchorId {
	/// Prefix shared by every equation anchor.
	pub const PREFIX: &'static str = "equation-";

	/// Derives the anchor for `label`. Distinct labels never share an anchor.
	pub fn for_label(label: &str) -> Self {
		let mut id = String::with_capacity(Self::PREFIX.len() + label.len());
		id.push_str(Self::PREFIX);
		id.push_str(label);
		Self(id)
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for AnchorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
