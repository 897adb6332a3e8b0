//! Parse error types and error reporting

use crate::token::{Span, Token};
use thiserror::Error;

/// A parse error with location and contextual information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at {}:{}: {message}", .span.line, .span.column)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub span: Span,

    /// Human-readable error message
    pub message: String,

    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token found
    UnexpectedToken { expected: Vec<Token>, found: Token },

    /// Unexpected end of file
    UnexpectedEof { expected: Vec<Token> },

    /// Invalid syntax
    InvalidSyntax { reason: String },

    /// Construct outside the supported subset
    Unsupported { construct: String },

    /// Missing closing delimiter
    UnclosedDelimiter { open: Token, expected_close: Token },

    /// Parser exceeded iteration/depth limit
    ParserLimitExceeded { message: String },
}

fn describe(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|tok| match tok {
            Token::Identifier(_) => "identifier".to_string(),
            other => format!("'{}'", other),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ParseError {
    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: Vec<Token>, found: Token, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Expected {}, found '{}'", describe(&expected), found)
        } else {
            format!("Expected one of {}, found '{}'", describe(&expected), found)
        };

        Self {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(expected: Vec<Token>, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Unexpected end of file, expected {}", describe(&expected))
        } else {
            format!("Unexpected end of file, expected one of {}", describe(&expected))
        };

        Self {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(reason: impl Into<String>, span: Span) -> Self {
        let reason = reason.into();
        Self {
            message: format!("Invalid syntax: {}", reason),
            kind: ParseErrorKind::InvalidSyntax { reason },
            span,
            suggestion: None,
        }
    }

    /// Create an "unsupported construct" error.
    pub fn unsupported(construct: impl Into<String>, span: Span) -> Self {
        let construct = construct.into();
        Self {
            message: format!("Unsupported construct: {}", construct),
            kind: ParseErrorKind::Unsupported { construct },
            span,
            suggestion: None,
        }
    }

    /// Create an "unclosed delimiter" error.
    pub fn unclosed_delimiter(open: Token, expected_close: Token, span: Span) -> Self {
        Self {
            message: format!("Unclosed '{}', expected '{}'", open, expected_close),
            kind: ParseErrorKind::UnclosedDelimiter {
                open,
                expected_close,
            },
            span,
            suggestion: None,
        }
    }

    /// Create a "parser limit exceeded" error.
    pub fn parser_limit_exceeded(message: impl Into<String>, span: Span) -> Self {
        let message = message.into();
        Self {
            kind: ParseErrorKind::ParserLimitExceeded {
                message: message.clone(),
            },
            span,
            message: format!("Parser limit exceeded: {}", message),
            suggestion: None,
        }
    }

    /// Add a suggestion to this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::unexpected_token(
            vec![Token::Semicolon],
            Token::RightBrace,
            Span::new(10, 11, 2, 5),
        );
        assert_eq!(err.message, "Expected ';', found '}'");
        assert_eq!(err.to_string(), "Parse error at 2:5: Expected ';', found '}'");
    }

    #[test]
    fn test_identifier_described_by_kind() {
        let err = ParseError::unexpected_eof(
            vec![Token::Identifier(String::new()), Token::LeftBrace],
            Span::new(0, 0, 1, 1),
        );
        assert_eq!(
            err.message,
            "Unexpected end of file, expected one of identifier, '{'"
        );
    }

    #[test]
    fn test_with_suggestion() {
        let err = ParseError::invalid_syntax("bad", Span::new(0, 1, 1, 1))
            .with_suggestion("remove it");
        assert_eq!(err.suggestion.as_deref(), Some("remove it"));
    }
}
