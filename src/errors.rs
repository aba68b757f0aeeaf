//! Error types with rich diagnostics using miette
//!
//! Spec errors carry the JSON source and a span so a malformed question-bank
//! entry points at the offending line.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based line/column pair as reported by serde_json.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (index, text) in self.source.split_inclusive('\n').enumerate() {
            if index + 1 == line {
                return (offset + column.saturating_sub(1)).min(self.source.len());
            }
            offset += text.len();
        }
        self.source.len()
    }

    /// Turn a serde_json failure into a diagnostic pointing into this source.
    pub fn spec_error(&self, err: serde_json::Error) -> SpecError {
        let offset = self.offset_of(err.line(), err.column());
        let len = usize::from(offset < self.source.len());
        let span = SourceSpan::from((offset, len));
        match err.classify() {
            serde_json::error::Category::Data => SpecError::Invalid {
                message: err.to_string(),
                src: self.named_source(),
                span,
            },
            serde_json::error::Category::Eof => SpecError::UnexpectedEnd {
                src: self.named_source(),
                span,
            },
            _ => SpecError::Syntax {
                message: err.to_string(),
                src: self.named_source(),
                span,
            },
        }
    }
}

// ============================================================================
// Spec Errors
// ============================================================================

/// Errors raised while reading a diagram spec or question item
#[derive(Error, Diagnostic, Debug)]
pub enum SpecError {
    #[error("malformed JSON: {message}")]
    #[diagnostic(code(geofig::spec::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unexpected end of input")]
    #[diagnostic(
        code(geofig::spec::eof),
        help("the spec is truncated; check for a missing closing brace")
    )]
    UnexpectedEnd {
        #[source_code]
        src: NamedSource<String>,
        #[label("input ends here")]
        span: SourceSpan,
    },

    #[error("invalid diagram spec: {message}")]
    #[diagnostic(code(geofig::spec::invalid))]
    Invalid {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("does not match the expected shape")]
        span: SourceSpan,
    },
}

// ============================================================================
// Answer Errors
// ============================================================================

/// A placement answer that is not a literal `"x,y"` pair
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum AnswerError {
    #[error("expected `x,y`, got {0:?}")]
    #[diagnostic(code(geofig::answer::shape))]
    Shape(String),

    #[error("not a number: {0:?}")]
    #[diagnostic(code(geofig::answer::number))]
    Number(String),
}

// ============================================================================
// Interaction Errors
// ============================================================================

/// The session was dropped before the student answered.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
#[error("interactive diagram dropped before an answer was given")]
#[diagnostic(code(geofig::interact::abandoned))]
pub struct Abandoned;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_lines() {
        let ctx = SourceContext::new("<input>", "{\n  \"a\": 1,\n  \"b\"\n}");
        assert_eq!(ctx.offset_of(1, 1), 0);
        assert_eq!(ctx.offset_of(2, 3), 4);
        assert_eq!(ctx.offset_of(3, 1), 12);
        assert_eq!(ctx.offset_of(99, 1), ctx.source.len());
    }

    #[test]
    fn truncated_json_is_eof() {
        let src = "{\"type\": \"symmetry\"";
        let ctx = SourceContext::new("<input>", src);
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        assert!(matches!(ctx.spec_error(err), SpecError::UnexpectedEnd { .. }));
    }
}
