//! Reference display templates.
//!
//! A template is literal text with `{number}` placeholders. `{{` and `}}`
//! produce literal braces. Format specs and conversions (`{number:>3}`,
//! `{number!r}`) are not supported. Anything else in braces is rejected so
//! the caller can fall back to the plain parenthesized number.

use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
	Literal(String),
	Number,
}

/// A parsed equation reference template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTemplate {
	pieces: Vec<Piece>,
}

impl ReferenceTemplate {
	/// Template used when none is configured.
	pub const DEFAULT: &'static str = "({number})";

	pub fn parse(source: &str) -> Result<Self, TemplateError> {
		let mut pieces = Vec::new();
		let mut literal = String::new();
		let mut chars = source.char_indices().peekable();

		while let Some((pos, ch)) = chars.next() {
			match ch {
				'{' if chars.next_if(|&(_, c)| c == '{').is_some() => literal.push('{'),
				'}' if chars.next_if(|&(_, c)| c == '}').is_some() => literal.push('}'),
				'}' => return Err(TemplateError::UnbalancedBrace(pos)),
				'{' => {
					let mut field = String::new();
					let mut closed = false;
					for (_, c) in chars.by_ref() {
						if c == '}' {
							closed = true;
							break;
						}
						field.push(c);
					}
					if !closed {
						return Err(TemplateError::UnbalancedBrace(pos));
					}
					if field != "number" {
						return Err(if field.bytes().all(|b| b.is_ascii_digit()) {
							TemplateError::PositionalField(field)
						} else if field.strip_prefix("number").is_some_and(|rest| rest.starts_with([':', '!'])) {
							TemplateError::UnsupportedFormatSpec(field)
						} else {
							TemplateError::UnknownField(field)
						});
					}
					if !literal.is_empty() {
						pieces.push(Piece::Literal(std::mem::take(&mut literal)));
					}
					pieces.push(Piece::Number);
				}
				_ => literal.push(ch),
			}
		}

		if !literal.is_empty() {
			pieces.push(Piece::Literal(literal));
		}
		Ok(Self { pieces })
	}

	/// Substitutes `number` for every placeholder.
	pub fn render(&self, number: &str) -> String {
		let mut out = String::new();
		for piece in &self.pieces {
			match piece {
				Piece::Literal(text) => out.push_str(text),
				Piece::Number => out.push_str(number),
			}
		}
		out
	}
}

impl Default for ReferenceTemplate {
	fn default() -> Self {
		Self {
			pieces: vec![
				Piece::Literal("(".to_owned()),
				Piece::Number,
				Piece::Literal(")".to_owned()),
			],
		}
	}
}

/// Text used when the configured template cannot be applied.
pub fn fallback_text(number: u64) -> String {
	format!("({number})")
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("({number})", "3.1", "(3.1)")]
	#[case("Eq. {number}", "7", "Eq. 7")]
	#[case("{number}/{number}", "2", "2/2")]
	#[case("{{{number}}}", "4", "{4}")]
	#[case("no placeholder", "4", "no placeholder")]
	#[case("", "4", "")]
	fn renders(#[case] source: &str, #[case] number: &str, #[case] expected: &str) {
		let template = ReferenceTemplate::parse(source).unwrap();
		assert_eq!(template.render(number), expected);
	}

	#[rstest]
	#[case("{bad_field}", TemplateError::UnknownField("bad_field".into()))]
	#[case("Eq.{number:>3}", TemplateError::UnsupportedFormatSpec("number:>3".into()))]
	#[case("{number!r}", TemplateError::UnsupportedFormatSpec("number!r".into()))]
	#[case("{numbers}", TemplateError::UnknownField("numbers".into()))]
	#[case("({})", TemplateError::PositionalField(String::new()))]
	#[case("{0}", TemplateError::PositionalField("0".into()))]
	#[case("(eq {number", TemplateError::UnbalancedBrace(4))]
	#[case("number}", TemplateError::UnbalancedBrace(6))]
	fn rejects(#[case] source: &str, #[case] expected: TemplateError) {
		assert_eq!(ReferenceTemplate::parse(source), Err(expected));
	}

	#[test]
	fn format_spec_error_names_the_field() {
		let err = ReferenceTemplate::parse("{number:>3}").unwrap_err();
		assert_eq!(err.to_string(), "format spec in {number:>3} is not supported");
	}

	#[test]
	fn default_matches_parsed_default() {
		assert_eq!(ReferenceTemplate::parse(ReferenceTemplate::DEFAULT).unwrap(), ReferenceTemplate::default());
	}

	#[test]
	fn fallback_is_parenthesized() {
		assert_eq!(fallback_text(5), "(5)");
	}
}
