//! Numbering and formatting settings.
//!
//! Field names follow the host's configuration keys so a `[math]` table can
//! be deserialized directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::ReferenceTemplate;

/// Settings consulted when a reference is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberingConfig {
	/// Number equations like figures (per-section tuples) when `numfig` is on.
	pub math_numfig: bool,
	/// Global switch for figure-style numbering.
	pub numfig: bool,
	/// Replaces the last `.` of a hierarchical number, e.g. `"-"` gives `1-2`.
	pub math_numsep: Option<String>,
	/// Display template with a `{number}` placeholder.
	pub math_eqref_format: Option<String>,
}

impl Default for NumberingConfig {
	fn default() -> Self {
		Self {
			math_numfig: true,
			numfig: false,
			math_numsep: None,
			math_eqref_format: None,
		}
	}
}

impl NumberingConfig {
	/// Parses and validates a TOML table of settings.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.math_numsep.as_deref() == Some("") {
			return Err(ConfigError::EmptySeparator);
		}
		Ok(())
	}

	/// True when both figure-numbering switches are on.
	#[inline]
	pub fn figure_style(&self) -> bool {
		self.math_numfig && self.numfig
	}

	/// Template source in effect; unset and empty both mean the default.
	pub fn eqref_format(&self) -> &str {
		match self.math_eqref_format.as_deref() {
			Some(format) if !format.is_empty() => format,
			_ => ReferenceTemplate::DEFAULT,
		}
	}
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid math configuration: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("math_numsep must not be empty")]
	EmptySeparator,
}
