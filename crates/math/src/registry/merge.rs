//! Folding worker registries back into the coordinator's instance.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::EquationRegistry;
use super::collision::{InsertAction, insert_entry};
use crate::error::RegistryError;
use crate::ids::DocumentId;

impl EquationRegistry {
	/// Copies equations and presence flags for `other_documents` out of `other`.
	///
	/// `other_documents` must be exactly the documents `other` processed and
	/// must be disjoint from documents already known here. Overlaps are not
	/// detected: incoming entries overwrite same-label entries silently. Use
	/// [`merge_checked`](Self::merge_checked) to refuse overlapping input.
	pub fn merge<'a>(&mut self, other_documents: impl IntoIterator<Item = &'a DocumentId>, other: &EquationRegistry) {
		let documents: FxHashSet<&DocumentId> = other_documents.into_iter().collect();
		self.merge_from(&documents, other);
	}

	/// Like [`merge`](Self::merge), but rejects input that would overlap.
	///
	/// Fails without modifying `self` when a listed document already has a
	/// presence flag or owns equations here, or when an incoming label is
	/// already bound here.
	pub fn merge_checked<'a>(
		&mut self,
		other_documents: impl IntoIterator<Item = &'a DocumentId>,
		other: &EquationRegistry,
	) -> Result<(), RegistryError> {
		let documents: FxHashSet<&DocumentId> = other_documents.into_iter().collect();

		let mut overlapping: Vec<DocumentId> = documents
			.iter()
			.filter(|doc| self.has_equations.contains_key(**doc) || self.equations.values().any(|e| e.document == ***doc))
			.map(|doc| (*doc).clone())
			.collect();
		if !overlapping.is_empty() {
			overlapping.sort();
			return Err(RegistryError::OverlappingDocuments(overlapping));
		}

		let mut conflicting: Vec<String> = other
			.equations
			.values()
			.filter(|entry| documents.contains(&entry.document) && self.equations.contains_key(&entry.label))
			.map(|entry| entry.label.clone())
			.collect();
		if !conflicting.is_empty() {
			conflicting.sort();
			return Err(RegistryError::ConflictingLabels(conflicting));
		}

		self.merge_from(&documents, other);
		Ok(())
	}

	fn merge_from(&mut self, documents: &FxHashSet<&DocumentId>, other: &EquationRegistry) {
		let mut merged = 0usize;
		let mut replaced = 0usize;
		for entry in other.equations.values() {
			if documents.contains(&entry.document) {
				if insert_entry(&mut self.equations, entry.clone()) == InsertAction::ReplacedExisting {
					replaced += 1;
				}
				merged += 1;
			}
		}

		for &document in documents {
			let has = other.has_equations.get(document).copied().unwrap_or(false);
			self.has_equations.insert(document.clone(), has);
		}

		debug!(documents = documents.len(), equations = merged, replaced, "merged equation registry");
	}
}
