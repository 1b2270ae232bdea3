//! Turning equation references into link targets and display text.

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::config::NumberingConfig;
use crate::error::TemplateError;
use crate::ids::{AnchorId, DocumentId};
use crate::registry::EquationRegistry;
use crate::role::{ReferenceKind, dangling_message, find_role};
use crate::template::{ReferenceTemplate, fallback_text};

/// Read-only view of hierarchical (figure-style) numbers.
///
/// Populated by the host's table-of-contents pass.
pub trait FigureNumbers {
	/// Number tuple for `anchor` in `document`, e.g. `[1, 2]` for `1.2`.
	fn figure_number(&self, document: &DocumentId, anchor: &AnchorId) -> Option<&[u32]>;
}

/// In-memory figure number table keyed by document, then anchor id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureNumberTable {
	documents: FxHashMap<DocumentId, FxHashMap<String, Vec<u32>>>,
}

impl FigureNumberTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, document: DocumentId, anchor: &AnchorId, numbers: Vec<u32>) {
		self.documents
			.entry(document)
			.or_default()
			.insert(anchor.as_str().to_owned(), numbers);
	}

	/// Drops every number recorded for `document`.
	pub fn clear_document(&mut self, document: &DocumentId) {
		self.documents.remove(document);
	}
}

impl FigureNumbers for FigureNumberTable {
	fn figure_number(&self, document: &DocumentId, anchor: &AnchorId) -> Option<&[u32]> {
		self.documents
			.get(document)?
			.get(anchor.as_str())
			.map(Vec::as_slice)
	}
}

/// A reference that found its equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
	pub target_document: DocumentId,
	pub anchor_id: AnchorId,
	pub display_text: String,
	/// Sequence number stored in the registry.
	pub number: u64,
	/// Set when the configured template was unusable and the fallback text
	/// was produced instead.
	pub format_error: Option<TemplateError>,
}

/// A reference node as produced by the role front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReference {
	/// Role name, `eq` or `numref`.
	pub role: String,
	pub target: String,
	/// Document containing the reference.
	pub document: DocumentId,
	pub line: Option<u32>,
}

/// Resolves equation references against a registry snapshot.
///
/// Holds only shared borrows; resolving never mutates anything.
pub struct ReferenceResolver<'a, F: FigureNumbers + ?Sized = FigureNumberTable> {
	registry: &'a EquationRegistry,
	figures: &'a F,
	config: &'a NumberingConfig,
	template: Result<ReferenceTemplate, TemplateError>,
}

impl<'a, F: FigureNumbers + ?Sized> ReferenceResolver<'a, F> {
	pub fn new(registry: &'a EquationRegistry, figures: &'a F, config: &'a NumberingConfig) -> Self {
		Self {
			registry,
			figures,
			config,
			template: ReferenceTemplate::parse(config.eqref_format()),
		}
	}

	/// Resolves `target_label` referenced from `referencing_document`.
	///
	/// Returns `None` for labels the registry does not know; the caller owns
	/// the dangling-reference diagnostic.
	pub fn resolve(
		&self,
		referencing_document: &DocumentId,
		target_label: &str,
		kind: ReferenceKind,
	) -> Option<ResolvedReference> {
		let entry = self.registry.get(target_label)?;
		let anchor_id = AnchorId::for_label(target_label);
		let number = self.display_number(&entry.document, &anchor_id, entry.number);

		let (display_text, format_error) = match &self.template {
			Ok(template) => (template.render(&number), None),
			Err(err) => {
				warn!(
					template = self.config.eqref_format(),
					error = %err,
					label = target_label,
					document = %referencing_document,
					"invalid math_eqref_format"
				);
				(fallback_text(entry.number), Some(err.clone()))
			}
		};

		trace!(
			%kind,
			from = %referencing_document,
			to = %entry.document,
			label = target_label,
			text = %display_text,
			"resolved equation reference"
		);

		Some(ResolvedReference {
			target_document: entry.document.clone(),
			anchor_id,
			display_text,
			number: entry.number,
			format_error,
		})
	}

	/// Opportunistic lookup for references whose domain is not known.
	///
	/// Empty when the label is unknown, otherwise a single equation result.
	pub fn resolve_any(
		&self,
		referencing_document: &DocumentId,
		target_label: &str,
	) -> Vec<(ReferenceKind, ResolvedReference)> {
		self.resolve(referencing_document, target_label, ReferenceKind::Equation)
			.map(|resolved| (ReferenceKind::Equation, resolved))
			.into_iter()
			.collect()
	}

	/// Resolves a reference node from the role front end.
	///
	/// Missing targets of roles that warn on dangling references are logged.
	///
	/// # Panics
	///
	/// Panics if `pending.role` is not a role of this domain; routing any
	/// other role here is a bug in the caller.
	pub fn resolve_pending(&self, pending: &PendingReference) -> Option<ResolvedReference> {
		let Some(role) = find_role(&pending.role) else {
			panic!("math domain asked to resolve unsupported role {:?}", pending.role);
		};

		let resolved = self.resolve(&pending.document, &pending.target, role.kind);
		if resolved.is_none() && role.warn_dangling {
			warn!(
				document = %pending.document,
				line = ?pending.line,
				target = %pending.target,
				"{}",
				dangling_message(&pending.target)
			);
		}
		resolved
	}

	fn display_number(&self, document: &DocumentId, anchor: &AnchorId, number: u64) -> String {
		if !self.config.figure_style() {
			return number.to_string();
		}

		let Some(numbers) = self.figures.figure_number(document, anchor) else {
			return String::new();
		};
		let joined = numbers.iter().map(u32::to_string).collect::<Vec<_>>().join(".");

		if let Some(sep) = self.config.math_numsep.as_deref().filter(|sep| !sep.is_empty())
			&& let Some((head, tail)) = joined.rsplit_once('.')
		{
			return format!("{head}{sep}{tail}");
		}
		joined
	}
}
