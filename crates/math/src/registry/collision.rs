use std::fmt;

use rustc_hash::FxHashMap;

use crate::ids::{DocumentId, EquationEntry};

/// Result of a single label insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertAction {
	/// Label was new.
	InsertedNew,
	/// Label existed; the incoming entry replaced it.
	ReplacedExisting,
}

/// Outcome of [`EquationRegistry::note_equation`](super::EquationRegistry::note_equation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteOutcome {
	/// The label was bound to the given number.
	Inserted(u64),
	/// The label was already bound elsewhere; nothing changed.
	KeptExisting(DuplicateLabel),
}

impl NoteOutcome {
	/// Number now bound to the label, whichever registration owns it.
	pub fn number(&self) -> u64 {
		match self {
			Self::Inserted(number) => *number,
			Self::KeptExisting(dup) => dup.kept_number,
		}
	}
}

/// A rejected second registration of a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateLabel {
	/// The contested label.
	pub label: String,
	/// Document holding the binding that was kept.
	pub existing_document: DocumentId,
	/// Document whose registration was rejected.
	pub new_document: DocumentId,
	/// Number of the kept binding.
	pub kept_number: u64,
}

impl fmt::Display for DuplicateLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"duplicate label of equation {}, other instance in {}",
			self.label, self.existing_document
		)
	}
}

/// Inserts `entry` under its label, replacing any previous binding.
pub(super) fn insert_entry(equations: &mut FxHashMap<String, EquationEntry>, entry: EquationEntry) -> InsertAction {
	match equations.insert(entry.label.clone(), entry) {
		None => InsertAction::InsertedNew,
		Some(_) => InsertAction::ReplacedExisting,
	}
}
