//! Parser for the C# declaration subset
//!
//! This module implements a recursive descent parser that transforms the
//! token stream from the lexer into a [`CompilationUnit`]. Declarations are
//! parsed in full; statements and expressions are parsed deep enough to find
//! assignments anywhere in a body.
//!
//! Ambiguous constructs (local declaration vs. expression statement, cast vs.
//! parenthesized expression, generic invocation vs. comparison) are resolved
//! by speculative parsing: take a [`Checkpoint`], try one reading, and
//! [`Parser::restore`] on failure.

pub mod decl;
pub mod error;
pub mod expr;
pub mod guards;
pub mod precedence;
pub mod recovery;
pub mod stmt;
pub mod types;

use crate::ast::*;
use crate::lexer::{LexError, Lexer};
use crate::token::{Span, Token};

pub use error::{ParseError, ParseErrorKind};

/// Parser state.
pub struct Parser {
    /// Pre-tokenized input, always terminated by `Token::Eof`
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Accumulated parse errors (allows continuing after errors)
    errors: Vec<ParseError>,

    /// Current statement/expression nesting depth
    pub(crate) depth: usize,
}

/// Saved parser position for backtracking.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pos: usize,
    errors: usize,
}

impl Parser {
    /// Create a new parser from source code.
    pub fn new(source: &str) -> Result<Self, Vec<LexError>> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            depth: 0,
        })
    }

    /// Parse the entire source file.
    ///
    /// Returns the compilation unit on success, or all accumulated errors.
    pub fn parse(self) -> Result<CompilationUnit, Vec<ParseError>> {
        let (unit, errors) = self.parse_recovering();
        if errors.is_empty() {
            Ok(unit)
        } else {
            Err(errors)
        }
    }

    /// Parse the whole input, keeping what could be parsed around errors.
    ///
    /// Members that fail to parse are left out of the tree; their errors are
    /// returned alongside it.
    pub fn parse_recovering(mut self) -> (CompilationUnit, Vec<ParseError>) {
        let start_span = self.current_span();
        let usings = self.parse_usings();
        let mut members = Vec::new();

        while !self.at_eof() {
            if self.check(&Token::Namespace) && self.is_file_scoped_namespace() {
                match decl::parse_file_scoped_namespace(&mut self) {
                    Ok(ns) => members.push(NamespaceMember::Namespace(ns)),
                    Err(err) => {
                        self.errors.push(err);
                        recovery::sync_to_member_boundary(&mut self);
                    }
                }
                continue;
            }
            self.parse_namespace_member_into(&mut members);
        }

        let end_span = self.current_span();
        let span = self.combine_spans(&start_span, &end_span);
        let unit = CompilationUnit {
            usings,
            members,
            span,
        };
        (unit, self.errors)
    }

    /// Parse one namespace or type member, recording an error and
    /// resynchronizing on failure.
    pub(crate) fn parse_namespace_member_into(&mut self, members: &mut Vec<NamespaceMember>) {
        let before = self.pos;
        match decl::parse_namespace_member(self) {
            Ok(member) => members.push(member),
            Err(err) => {
                self.errors.push(err);
                recovery::sync_to_member_boundary(self);
                // Always make progress
                if self.pos == before && !self.at_eof() {
                    self.advance();
                }
            }
        }
    }

    pub(crate) fn parse_usings(&mut self) -> Vec<UsingDirective> {
        let mut usings = Vec::new();
        while self.check(&Token::Using) {
            match decl::parse_using(self) {
                Ok(using) => usings.push(using),
                Err(err) => {
                    self.errors.push(err);
                    recovery::skip_past(self, &Token::Semicolon);
                }
            }
        }
        usings
    }

    fn is_file_scoped_namespace(&self) -> bool {
        let mut i = self.pos + 1;
        while let Some((tok, _)) = self.tokens.get(i) {
            match tok {
                Token::Identifier(_) | Token::Dot => i += 1,
                Token::Semicolon => return true,
                _ => return false,
            }
        }
        false
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    /// Peek at the next token (lookahead).
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.peek_nth(1)
    }

    /// Peek `n` tokens ahead of the current one.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.current_span()
        } else {
            self.tokens[self.pos - 1].1
        }
    }

    /// Advance to the next token, returning the previous current token.
    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(expected)
    }

    /// Check if the current token matches any of the given kinds.
    pub fn check_any(&self, expected: &[Token]) -> bool {
        expected.iter().any(|tok| self.check(tok))
    }

    /// Check if the current token is the contextual keyword `word`.
    pub fn check_contextual(&self, word: &str) -> bool {
        self.current().identifier() == Some(word)
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Consume the current token if it matches the expected kind.
    pub fn expect(&mut self, expected: Token) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected_token(&[expected]))
        }
    }

    /// Consume the current token if it matches, reporting whether it did.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume an identifier token.
    pub fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        let span = self.current_span();
        match self.current() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Identifier::new(name, span))
            }
            _ => Err(self.unexpected_token(&[Token::Identifier(String::new())])),
        }
    }

    /// Whether the current `>` is immediately followed by another `>`,
    /// which together spell the shift operator.
    pub fn at_right_shift(&self) -> bool {
        if !self.check(&Token::Greater) {
            return false;
        }
        match self.tokens.get(self.pos + 1) {
            Some((Token::Greater, next)) => next.start == self.current_span().end,
            _ => false,
        }
    }

    // ========================================================================
    // Backtracking
    // ========================================================================

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            errors: self.errors.len(),
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.errors.truncate(checkpoint.errors);
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Record a parse error without aborting the current production.
    pub fn error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Create an "unexpected token" error at the current position.
    pub fn unexpected_token(&self, expected: &[Token]) -> ParseError {
        let span = self.current_span();
        if self.at_eof() {
            ParseError::unexpected_eof(expected.to_vec(), span)
        } else {
            ParseError::unexpected_token(expected.to_vec(), self.current().clone(), span)
        }
    }

    // ========================================================================
    // Utilities
    // ========================================================================

    /// Combine two spans into a single span.
    pub fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        start.to(end)
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: &Span) -> Span {
        start.to(&self.previous_span())
    }
}
