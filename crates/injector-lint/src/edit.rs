//! Code fixes and the text edits they are rendered into.

use std::ops::Range;

use injector_syntax::ast::NodePath;
use injector_syntax::SyntaxError;
use serde::Serialize;
use thiserror::Error;

pub use injector_syntax::ast::NodeEdit;

/// Replace the bytes in `range` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range: offset..offset,
            replacement: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }
}

/// A fix offered for one diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeFix {
    /// Title shown for the code action.
    pub title: String,
    /// Rule the fix belongs to.
    pub rule_id: &'static str,
    /// The single node replacement the fix consists of.
    pub edit: NodeEdit,
    /// `edit` rendered against the document's text.
    pub text_edits: Vec<TextEdit>,
    /// Whether the replaced node has to be laid out again.
    pub needs_relayout: bool,
}

/// Why a fix could not be built or applied.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("no field declaration at offset {offset}")]
    NoFieldAtSpan { offset: usize },

    #[error("member {index} of type '{type_name}' is not a field")]
    NotAField { type_name: String, index: usize },

    #[error("field '{name}' is not a single-variable readonly instance field")]
    NotEligible { name: String },

    #[error("no type declaration at {path}")]
    TypeNotFound { path: NodePath },

    #[error("member {index} of type '{type_name}' is not a constructor")]
    ConstructorNotFound { type_name: String, index: usize },

    #[error("a constructor of type '{type_name}' does not parse")]
    UnparsedConstructor { type_name: String },

    #[error("text edit {start}..{end} is out of bounds or overlaps another edit")]
    InvalidTextEdit { start: usize, end: usize },

    #[error("fixed source does not parse: {0}")]
    Reparse(#[source] SyntaxError),
}

/// Apply `edits` to `source`.
///
/// Edits address the original text; they are applied back to front so
/// earlier offsets stay valid. Overlapping edits are rejected.
pub fn apply_text_edits(source: &str, edits: &[TextEdit]) -> Result<String, FixError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.range.start.cmp(&a.range.start).then(b.range.end.cmp(&a.range.end)));

    let mut out = source.to_string();
    let mut limit = source.len();
    for edit in sorted {
        let Range { start, end } = edit.range;
        let valid = start <= end
            && end <= limit
            && source.is_char_boundary(start)
            && source.is_char_boundary(end);
        if !valid {
            return Err(FixError::InvalidTextEdit { start, end });
        }
        out.replace_range(start..end, &edit.replacement);
        limit = start;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_text_edits_back_to_front() {
        let edits = vec![
            TextEdit::insert(0, ">"),
            TextEdit::replace(4..7, "X"),
            TextEdit::insert(11, "!"),
        ];
        assert_eq!(apply_text_edits("abc def ghi", &edits).unwrap(), ">abc X ghi!");
    }

    #[test]
    fn test_apply_no_edits() {
        assert_eq!(apply_text_edits("abc", &[]).unwrap(), "abc");
    }

    #[test]
    fn test_overlapping_edits_are_rejected() {
        let edits = vec![TextEdit::replace(0..5, "x"), TextEdit::replace(3..8, "y")];
        assert!(matches!(
            apply_text_edits("0123456789", &edits),
            Err(FixError::InvalidTextEdit { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_edit_is_rejected() {
        let edits = vec![TextEdit::insert(10, "x")];
        assert!(apply_text_edits("short", &edits).is_err());
    }
}
