//! Parser guards to prevent infinite loops and stack overflow

use super::{ParseError, Parser};
use crate::token::Span;

/// Maximum iterations for any parser loop
const MAX_LOOP_ITERATIONS: usize = 100_000;

/// Maximum statement/expression nesting depth before rejecting the parse
pub const MAX_PARSE_DEPTH: usize = 64;

/// Guard against infinite loops in parser
///
/// # Example
///
/// ```ignore
/// let mut guard = LoopGuard::new("type_members");
/// while !parser.check(&Token::RightBrace) {
///     guard.check(parser.current_span())?;
///     // ... parse a member ...
/// }
/// ```
pub struct LoopGuard {
    name: &'static str,
    count: usize,
    max: usize,
}

impl LoopGuard {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            count: 0,
            max: MAX_LOOP_ITERATIONS,
        }
    }

    #[inline]
    pub fn with_limit(name: &'static str, max: usize) -> Self {
        Self { name, count: 0, max }
    }

    /// Count one iteration, failing once the limit is passed.
    #[inline]
    pub fn check(&mut self, span: Span) -> Result<(), ParseError> {
        self.count += 1;
        if self.count > self.max {
            return Err(ParseError::parser_limit_exceeded(
                format!("Loop '{}' exceeded {} iterations", self.name, self.max),
                span,
            ));
        }
        Ok(())
    }
}

/// Run `f` one nesting level deeper, failing when the depth limit is hit.
///
/// The depth is restored whether `f` succeeds or not.
pub fn with_depth<T>(
    parser: &mut Parser,
    name: &'static str,
    f: impl FnOnce(&mut Parser) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    parser.depth += 1;
    if parser.depth > MAX_PARSE_DEPTH {
        parser.depth -= 1;
        return Err(ParseError::parser_limit_exceeded(
            format!("Maximum nesting depth ({}) exceeded in {}", MAX_PARSE_DEPTH, name),
            parser.current_span(),
        ));
    }

    let result = f(parser);

    parser.depth -= 1;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_guard_under_limit() {
        let mut guard = LoopGuard::with_limit("test", 10);
        for _ in 0..10 {
            assert!(guard.check(Span::SYNTHETIC).is_ok());
        }
    }

    #[test]
    fn test_loop_guard_exceeds_limit() {
        let mut guard = LoopGuard::with_limit("test", 10);
        for _ in 0..10 {
            let _ = guard.check(Span::SYNTHETIC);
        }
        assert!(guard.check(Span::SYNTHETIC).is_err());
    }

    #[test]
    fn test_with_depth_restores_depth() {
        let mut parser = Parser::new("x").unwrap();
        let result = with_depth(&mut parser, "test", |p| {
            assert_eq!(p.depth, 1);
            Err::<(), _>(ParseError::invalid_syntax("fail", Span::SYNTHETIC))
        });
        assert!(result.is_err());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_with_depth_exceeds_limit() {
        let mut parser = Parser::new("x").unwrap();
        parser.depth = MAX_PARSE_DEPTH;
        let result = with_depth(&mut parser, "test", |_| Ok(()));
        assert!(result.is_err());
        assert_eq!(parser.depth, MAX_PARSE_DEPTH);
    }
}
