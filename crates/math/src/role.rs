//! Reference roles and the extension manifest handed to the host.

use crate::error::RegistryError;

/// Domain name used to route references to this crate.
pub const DOMAIN_NAME: &str = "math";

/// Human-readable domain label.
pub const DOMAIN_LABEL: &str = "mathematics";

/// Figure-numbering category under which display math is enumerated.
pub const ENUMERABLE_NODE: &str = "displaymath";

/// The two reference syntaxes this domain resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
	/// Plain equation reference (`eq`).
	Equation,
	/// Numbered-reference alias (`numref`).
	NumberedReference,
}

impl ReferenceKind {
	pub fn role_name(self) -> &'static str {
		match self {
			Self::Equation => "eq",
			Self::NumberedReference => "numref",
		}
	}
}

impl TryFrom<&str> for ReferenceKind {
	type Error = RegistryError;

	fn try_from(role: &str) -> Result<Self, Self::Error> {
		match role {
			"eq" => Ok(Self::Equation),
			"numref" => Ok(Self::NumberedReference),
			other => Err(RegistryError::UnsupportedReferenceKind(other.to_owned())),
		}
	}
}

impl std::fmt::Display for ReferenceKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.role_name())
	}
}

/// Registration descriptor for one reference role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRole {
	pub name: &'static str,
	pub kind: ReferenceKind,
	/// Emit a dangling-reference warning when the target is missing.
	pub warn_dangling: bool,
}

/// Roles registered by this domain.
pub const ROLES: &[ReferenceRole] = &[
	ReferenceRole {
		name: "numref",
		kind: ReferenceKind::NumberedReference,
		warn_dangling: false,
	},
	ReferenceRole {
		name: "eq",
		kind: ReferenceKind::Equation,
		warn_dangling: true,
	},
];

pub fn find_role(name: &str) -> Option<&'static ReferenceRole> {
	ROLES.iter().find(|role| role.name == name)
}

/// Diagnostic text for a reference whose target label is unknown.
pub fn dangling_message(target_label: &str) -> String {
	format!("equation not found: {target_label}")
}

/// What the extension reports to the host at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionManifest {
	/// Domain name references are routed by.
	pub name: &'static str,
	pub label: &'static str,
	/// Node category numbered by the figure-numbering pass.
	pub enumerable_node: &'static str,
	pub version: &'static str,
	/// Bumped whenever the persisted registry layout changes.
	pub env_version: u32,
	pub parallel_read_safe: bool,
	pub parallel_write_safe: bool,
}

pub fn manifest() -> ExtensionManifest {
	ExtensionManifest {
		name: DOMAIN_NAME,
		label: DOMAIN_LABEL,
		enumerable_node: ENUMERABLE_NODE,
		version: "builtin",
		env_version: 2,
		parallel_read_safe: true,
		parallel_write_safe: true,
	}
}
