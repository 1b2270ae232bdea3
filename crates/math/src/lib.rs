//! Equation numbering and cross-reference resolution.
//!
//! This crate is the math domain of the document builder. It provides:
//! - [`EquationRegistry`]: label to (document, number) bindings, per-document
//!   math presence, invalidation and merging of worker registries
//! - [`ReferenceResolver`]: turns `eq` / `numref` references into link targets
//!   with flat or figure-style numbers
//! - [`NumberingConfig`]: the `math_*` settings that drive display
//! - [`SerialCounter`]: the injected source of sequence numbers
//!
//! Parsing documents, rendering links and persisting build state belong to
//! the host; this crate only exchanges plain data with it.

pub mod config;
pub mod counter;
mod error;
pub mod ids;
pub mod registry;
pub mod resolver;
pub mod role;
pub mod template;

#[cfg(test)]
mod test_log;

pub use config::{ConfigError, NumberingConfig};
pub use counter::{EQUATION_COUNTER, SerialCounter, SerialNumbers, SharedSerialNumbers};
pub use error::{RegistryError, TemplateError};
pub use ids::{AnchorId, DocumentId, EquationEntry};
pub use registry::{DocumentMath, DuplicateLabel, EquationRegistry, NoteOutcome};
pub use resolver::{FigureNumberTable, FigureNumbers, PendingReference, ReferenceResolver, ResolvedReference};
pub use role::{ExtensionManifest, ROLES, ReferenceKind, ReferenceRole, dangling_message, manifest};
