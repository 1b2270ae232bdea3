use thiserror::Error;

use crate::ids::DocumentId;

/// Contract violations reported by the registry and resolver.
///
/// Content problems (duplicate labels, dangling references, bad templates)
/// never surface here; they degrade locally and are logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// A reference role outside `eq` / `numref` was routed to this domain.
	#[error("unsupported equation reference kind: {0}")]
	UnsupportedReferenceKind(String),
	/// A checked merge listed documents this registry already tracks.
	#[error("merge overlaps documents already present: {}", join(.0))]
	OverlappingDocuments(Vec<DocumentId>),
	/// A checked merge would rebind labels owned by this registry.
	#[error("merge rebinds existing equation labels: {}", .0.join(", "))]
	ConflictingLabels(Vec<String>),
}

/// Reasons a reference template cannot be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
	/// A `{name}` field other than `{number}`.
	#[error("unknown field {{{0}}}")]
	UnknownField(String),
	/// An empty or numeric `{}` / `{0}` field.
	#[error("positional field {{{0}}} is not supported")]
	PositionalField(String),
	/// `{number}` with a conversion or format spec, e.g. `{number:>3}`.
	#[error("format spec in {{{0}}} is not supported")]
	UnsupportedFormatSpec(String),
	/// A `{` or `}` with no partner.
	#[error("unbalanced brace at byte {0}")]
	UnbalancedBrace(usize),
}

fn join(documents: &[DocumentId]) -> String {
	documents.iter().map(DocumentId::as_str).collect::<Vec<_>>().join(", ")
}
