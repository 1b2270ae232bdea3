//! Build-wide equation registry.
//!
//! Maps each equation label to its owning document and sequence number, and
//! tracks which documents contain any math at all. One instance lives in the
//! build environment; parallel workers each fill a private instance over a
//! disjoint set of documents which the coordinator folds back with
//! [`EquationRegistry::merge`].
//!
//! The registry derives `serde` traits so the host can keep it in its
//! incremental build cache. Duplicate-label diagnostics are not persisted.

mod collision;
mod merge;

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

pub use collision::{DuplicateLabel, NoteOutcome};

use crate::counter::{EQUATION_COUNTER, SerialCounter};
use crate::ids::{DocumentId, EquationEntry};


/// Math found in one document, as reported by the document parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMath {
	/// Whether the document has at least one inline or block math node.
	pub has_math_nodes: bool,
	/// Labels of labelled math blocks, in document order.
	pub labels: Vec<String>,
}

/// Label to (document, number) mapping plus per-document presence flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationRegistry {
	equations: FxHashMap<String, EquationEntry>,
	has_equations: FxHashMap<DocumentId, bool>,
	#[serde(skip)]
	collisions: Vec<DuplicateLabel>,
}

impl EquationRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `label` to `document` with the next `eqno` serial.
	///
	/// A label that is already bound keeps its original binding; the conflict
	/// is logged, recorded in [`collisions`](Self::collisions) and the counter
	/// is left untouched.
	pub fn note_equation(
		&mut self,
		document: &DocumentId,
		label: &str,
		counter: &mut dyn SerialCounter,
	) -> NoteOutcome {
		let slot = match self.equations.entry(label.to_owned()) {
			Entry::Vacant(slot) => slot,
			Entry::Occupied(existing) => {
				let existing = existing.get();
				let dup = DuplicateLabel {
					label: label.to_owned(),
					existing_document: existing.document.clone(),
					new_document: document.clone(),
					kept_number: existing.number,
				};
				warn!(
					label,
					document = %document,
					other = %existing.document,
					"{dup}"
				);
				self.collisions.push(dup.clone());
				return NoteOutcome::KeptExisting(dup);
			}
		};

		let number = counter.next_serial(EQUATION_COUNTER) + 1;
		trace!(label, document = %document, number, "noted equation");
		slot.insert(EquationEntry {
			label: label.to_owned(),
			document: document.clone(),
			number,
		});
		NoteOutcome::Inserted(number)
	}

	/// Returns the sequence number bound to `label`.
	pub fn get_number(&self, label: &str) -> Option<u64> {
		self.equations.get(label).map(|entry| entry.number)
	}

	pub fn get(&self, label: &str) -> Option<&EquationEntry> {
		self.equations.get(label)
	}

	/// Stores the math presence flag for `document`, replacing any previous one.
	pub fn record_document_equations(&mut self, document: &DocumentId, has_any_math_node: bool) {
		self.has_equations.insert(document.clone(), has_any_math_node);
	}

	/// Document-processing hook: records presence and notes every label.
	///
	/// Returns the outcome for each label in document order. Callers that
	/// reprocess a changed document invalidate it first.
	pub fn process_document(
		&mut self,
		document: &DocumentId,
		math: &DocumentMath,
		counter: &mut dyn SerialCounter,
	) -> Vec<NoteOutcome> {
		let outcomes = math
			.labels
			.iter()
			.map(|label| self.note_equation(document, label, counter))
			.collect();
		self.record_document_equations(document, math.has_math_nodes || !math.labels.is_empty());
		outcomes
	}

	/// Drops every equation owned by `document` and its presence flag.
	///
	/// Returns how many equations were removed.
	pub fn invalidate_document(&mut self, document: &DocumentId) -> usize {
		let before = self.equations.len();
		self.equations.retain(|_, entry| entry.document != *document);
		self.has_equations.remove(document);
		let removed = before - self.equations.len();
		debug!(document = %document, removed, "invalidated document equations");
		removed
	}

	/// True if any recorded document contains math.
	pub fn has_any_equations(&self) -> bool {
		self.has_equations.values().any(|&has| has)
	}

	/// Presence flag recorded for `document`, if it was processed.
	pub fn document_has_equations(&self, document: &DocumentId) -> Option<bool> {
		self.has_equations.get(document).copied()
	}

	pub fn len(&self) -> usize {
		self.equations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.equations.is_empty()
	}

	/// All entries, in no particular order.
	pub fn equations(&self) -> impl Iterator<Item = &EquationEntry> {
		self.equations.values()
	}

	/// Entries owned by `document`, ordered by number.
	pub fn equations_in(&self, document: &DocumentId) -> Vec<&EquationEntry> {
		let mut entries: Vec<_> = self.equations.values().filter(|entry| entry.document == *document).collect();
		entries.sort_unstable_by_key(|entry| entry.number);
		entries
	}

	/// Documents with a recorded presence flag.
	pub fn documents(&self) -> impl Iterator<Item = &DocumentId> {
		self.has_equations.keys()
	}

	/// Duplicate labels rejected since this instance was created.
	pub fn collisions(&self) -> &[DuplicateLabel] {
		&self.collisions
	}

	pub fn take_collisions(&mut self) -> Vec<DuplicateLabel> {
		std::mem::take(&mut self.collisions)
	}
}
