//! Injector syntax front end
//!
//! Lexer, parser, AST and printer for the subset of C# that the injection
//! analysis needs: namespaces, type declarations and their members in full,
//! and statement/expression bodies deep enough to find every assignment.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

use thiserror::Error;

pub use ast::CompilationUnit;
pub use lexer::LexError;
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use printer::{PrintOptions, Printer};
pub use token::Span;

/// Failure to turn source text into a [`CompilationUnit`].
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("{} lex error(s), first: {}", .0.len(), first_message(.0))]
    Lex(Vec<LexError>),

    #[error("{} parse error(s), first: {}", .0.len(), first_message(.0))]
    Parse(Vec<ParseError>),
}

impl SyntaxError {
    /// Every error as `(span, message)`, in source order.
    pub fn diagnostics(&self) -> Vec<(Span, String)> {
        match self {
            SyntaxError::Lex(errors) => errors.iter().map(|e| (e.span(), e.to_string())).collect(),
            SyntaxError::Parse(errors) => errors.iter().map(|e| (e.span, e.message.clone())).collect(),
        }
    }
}

fn first_message<E: std::fmt::Display>(errors: &[E]) -> String {
    errors.first().map(|e| e.to_string()).unwrap_or_default()
}

/// Lex and parse `source`.
pub fn parse_source(source: &str) -> Result<CompilationUnit, SyntaxError> {
    let parser = Parser::new(source).map_err(SyntaxError::Lex)?;
    let unit = parser.parse().map_err(SyntaxError::Parse)?;
    tracing::debug!(
        bytes = source.len(),
        members = unit.members.len(),
        "parsed compilation unit"
    );
    Ok(unit)
}

/// Lex and parse `source`, keeping the tree recovered around parse errors.
///
/// Lex errors stay fatal. Parse errors come back next to the tree; members
/// that failed to parse are missing from it.
pub fn parse_source_recovering(
    source: &str,
) -> Result<(CompilationUnit, Vec<ParseError>), SyntaxError> {
    let parser = Parser::new(source).map_err(SyntaxError::Lex)?;
    let (unit, errors) = parser.parse_recovering();
    tracing::debug!(
        bytes = source.len(),
        members = unit.members.len(),
        errors = errors.len(),
        "parsed compilation unit with recovery"
    );
    Ok((unit, errors))
}
