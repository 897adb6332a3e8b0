//! Error recovery strategies for the parser.
//!
//! After an error the parser skips tokens to a point where parsing can
//! resume, so one malformed member or statement does not hide the rest of
//! the file's errors.

use super::{ParseError, Parser};
use crate::token::Token;

/// Synchronize to the next statement boundary.
///
/// Stops after a `;`, or before a `}` or a token that starts a statement.
pub fn sync_to_statement_boundary(parser: &mut Parser) {
    while !parser.at_eof() {
        match parser.current() {
            Token::If
            | Token::While
            | Token::Do
            | Token::For
            | Token::Foreach
            | Token::Try
            | Token::Return
            | Token::Break
            | Token::Continue
            | Token::Throw => return,

            Token::Semicolon => {
                parser.advance();
                return;
            }

            Token::RightBrace => return,

            Token::LeftBrace => {
                skip_balanced(parser);
            }

            _ => {
                parser.advance();
            }
        }
    }
}

/// Synchronize to the next member or type boundary.
///
/// Nested braces are skipped as a unit, so a broken member body does not
/// leak its closing brace into the enclosing type.
pub fn sync_to_member_boundary(parser: &mut Parser) {
    while !parser.at_eof() {
        match parser.current() {
            Token::Semicolon => {
                parser.advance();
                return;
            }
            Token::LeftBrace => {
                skip_balanced(parser);
                return;
            }
            Token::RightBrace => return,
            Token::LeftBracket => return,
            tok if tok.is_modifier() => return,
            Token::Class | Token::Struct | Token::Interface | Token::Enum | Token::Namespace => {
                return
            }
            _ => {
                parser.advance();
            }
        }
    }
}

/// Skip a balanced `{ ... }`, `( ... )` or `[ ... ]` group starting at the
/// current token. Does nothing if the current token opens no group.
///
/// Returns false if the input ended before the group was closed.
pub fn skip_balanced(parser: &mut Parser) -> bool {
    let (open, close) = match parser.current() {
        Token::LeftBrace => (Token::LeftBrace, Token::RightBrace),
        Token::LeftParen => (Token::LeftParen, Token::RightParen),
        Token::LeftBracket => (Token::LeftBracket, Token::RightBracket),
        _ => return true,
    };

    let mut depth = 0usize;
    while !parser.at_eof() {
        if parser.check(&open) {
            depth += 1;
        } else if parser.check(&close) {
            depth -= 1;
            if depth == 0 {
                parser.advance();
                return true;
            }
        }
        parser.advance();
    }
    false
}

/// Like [`skip_balanced`], but fails if the group is never closed.
pub fn expect_balanced(parser: &mut Parser) -> Result<(), ParseError> {
    let open_span = parser.current_span();
    let open = parser.current().clone();
    if skip_balanced(parser) {
        return Ok(());
    }
    let close = match open {
        Token::LeftParen => Token::RightParen,
        Token::LeftBracket => Token::RightBracket,
        _ => Token::RightBrace,
    };
    Err(ParseError::unclosed_delimiter(open, close, open_span))
}

/// Skip tokens until we find one of the expected tokens.
pub fn skip_until(parser: &mut Parser, expected: &[Token]) {
    while !parser.at_eof() && !parser.check_any(expected) {
        parser.advance();
    }
}

/// Skip tokens up to and including `token`.
pub fn skip_past(parser: &mut Parser, token: &Token) {
    skip_until(parser, std::slice::from_ref(token));
    parser.eat(token);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_to_statement_boundary() {
        let mut parser = Parser::new("x y z; return;").unwrap();
        sync_to_statement_boundary(&mut parser);
        assert!(matches!(parser.current(), Token::Return));
    }

    #[test]
    fn test_sync_to_member_boundary_skips_body() {
        let mut parser = Parser::new("broken ( { a; { b; } } public int X;").unwrap();
        sync_to_member_boundary(&mut parser);
        assert!(matches!(parser.current(), Token::Public));
    }

    #[test]
    fn test_skip_balanced_nested() {
        let mut parser = Parser::new("{ { } ( ) } next").unwrap();
        skip_balanced(&mut parser);
        assert_eq!(parser.current().identifier(), Some("next"));
    }

    #[test]
    fn test_expect_balanced_unclosed() {
        let mut parser = Parser::new("{ a { b }").unwrap();
        assert!(expect_balanced(&mut parser).is_err());
    }
}
