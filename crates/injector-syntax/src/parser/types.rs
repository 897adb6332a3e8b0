//! Type reference parsing

use super::{ParseError, Parser};
use crate::ast::*;
use crate::token::Token;

/// Parse a type reference: `string`, `IList<Order>`, `A.B`, `int[]`,
/// `Guid?`, `List<int>[]?`.
pub fn parse_type(parser: &mut Parser) -> Result<TypeRef, ParseError> {
    let start_span = parser.current_span();

    if parser.check(&Token::LeftParen) {
        return Err(ParseError::unsupported("tuple type", start_span));
    }

    let mut ty = parse_named_type(parser)?;

    loop {
        if parser.check(&Token::Question) {
            parser.advance();
            ty = TypeRef {
                span: parser.span_from(&start_span),
                kind: TypeRefKind::Nullable(Box::new(ty)),
            };
        } else if parser.check(&Token::LeftBracket)
            && matches!(parser.peek(), Some(Token::RightBracket) | Some(Token::Comma))
        {
            parser.advance();
            let mut rank = 1u8;
            while parser.eat(&Token::Comma) {
                rank = rank.saturating_add(1);
            }
            parser.expect(Token::RightBracket)?;
            ty = TypeRef {
                span: parser.span_from(&start_span),
                kind: TypeRefKind::Array {
                    element: Box::new(ty),
                    rank,
                },
            };
        } else {
            break;
        }
    }

    Ok(ty)
}

fn parse_named_type(parser: &mut Parser) -> Result<TypeRef, ParseError> {
    let start_span = parser.current_span();

    // `global::System.String`
    if matches!(parser.peek(), Some(Token::Colon)) && parser.peek_nth(2) == Some(&Token::Colon) {
        let alias = parser.expect_identifier()?;
        parser.advance();
        parser.advance();
        let ty = parse_named_type(parser)?;
        return Ok(TypeRef {
            kind: TypeRefKind::Aliased {
                alias,
                ty: Box::new(ty),
            },
            span: parser.span_from(&start_span),
        });
    }

    let mut segments = vec![parse_segment(parser)?];
    while parser.check(&Token::Dot) && matches!(parser.peek(), Some(Token::Identifier(_))) {
        parser.advance();
        segments.push(parse_segment(parser)?);
    }

    Ok(TypeRef {
        kind: TypeRefKind::Named(segments),
        span: parser.span_from(&start_span),
    })
}

fn parse_segment(parser: &mut Parser) -> Result<TypeSegment, ParseError> {
    let name = parser.expect_identifier()?;
    let type_args = if parser.check(&Token::Less) {
        parse_type_args(parser)?
    } else {
        Vec::new()
    };
    Ok(TypeSegment { name, type_args })
}

/// Parse `<T1, T2>`.
pub fn parse_type_args(parser: &mut Parser) -> Result<Vec<TypeRef>, ParseError> {
    parser.expect(Token::Less)?;
    let mut args = vec![parse_type(parser)?];
    while parser.eat(&Token::Comma) {
        args.push(parse_type(parser)?);
    }
    parser.expect(Token::Greater)?;
    Ok(args)
}

/// Speculatively parse type arguments in expression position
/// (`Create<T>(...)`). Restores the parser and returns `None` unless the
/// closing `>` is followed by a token that cannot continue a comparison.
pub fn try_parse_type_args(parser: &mut Parser) -> Option<Vec<TypeRef>> {
    let checkpoint = parser.checkpoint();
    match parse_type_args(parser) {
        Ok(args)
            if parser.check_any(&[
                Token::LeftParen,
                Token::Dot,
                Token::RightParen,
                Token::Semicolon,
                Token::Comma,
            ]) =>
        {
            Some(args)
        }
        _ => {
            parser.restore(checkpoint);
            None
        }
    }
}

/// Parse declaration type parameters: `<T, in TIn, out TOut>`.
pub fn parse_type_params(parser: &mut Parser) -> Result<Vec<Identifier>, ParseError> {
    let mut params = Vec::new();
    if !parser.eat(&Token::Less) {
        return Ok(params);
    }
    loop {
        // Variance annotations
        if parser.check_any(&[Token::In, Token::Out]) {
            parser.advance();
        }
        params.push(parser.expect_identifier()?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }
    parser.expect(Token::Greater)?;
    Ok(params)
}

/// Skip `where T : class, new()` constraint clauses up to `stop`.
pub fn skip_constraint_clauses(parser: &mut Parser, stop: &[Token]) {
    while parser.check_contextual("where") {
        while !parser.at_eof() && !parser.check_any(stop) {
            if parser.check(&Token::LeftParen) {
                super::recovery::skip_balanced(parser);
                continue;
            }
            parser.advance();
            if parser.check_contextual("where") {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(source: &str) -> TypeRef {
        let mut parser = Parser::new(source).unwrap();
        parse_type(&mut parser).unwrap()
    }

    #[test]
    fn test_simple_and_qualified() {
        assert_eq!(ty("string").to_string(), "string");
        assert_eq!(ty("System.IO.Stream").to_string(), "System.IO.Stream");
    }

    #[test]
    fn test_nested_generics_close_with_adjacent_greater() {
        assert_eq!(
            ty("Dictionary<string, List<int>>").to_string(),
            "Dictionary<string, List<int>>"
        );
    }

    #[test]
    fn test_array_and_nullable() {
        assert_eq!(ty("int[]").to_string(), "int[]");
        assert_eq!(ty("int[,]").to_string(), "int[,]");
        assert_eq!(ty("Guid?").to_string(), "Guid?");
        assert_eq!(ty("string[]?").to_string(), "string[]?");
    }

    #[test]
    fn test_global_alias_kept() {
        let source = "global::System.Collections.Generic.List<int>? x";
        let parsed = ty(source);
        assert_eq!(parsed.to_string(), "global::System.Collections.Generic.List<int>?");
        assert_eq!(parsed.span.slice(source), "global::System.Collections.Generic.List<int>?");
        let TypeRefKind::Nullable(inner) = &parsed.kind else {
            panic!("expected nullable, got {:?}", parsed.kind);
        };
        assert!(matches!(&inner.kind, TypeRefKind::Aliased { alias, .. } if alias.name == "global"));
    }

    #[test]
    fn test_type_span_covers_text() {
        let source = "IList<Order> x";
        let parsed = ty(source);
        assert_eq!(parsed.span.slice(source), "IList<Order>");
    }

    #[test]
    fn test_try_parse_type_args_rejects_comparison() {
        let mut parser = Parser::new("< b && c > d").unwrap();
        assert!(try_parse_type_args(&mut parser).is_none());
        assert!(parser.check(&Token::Less));

        let mut parser = Parser::new("<int>(x)").unwrap();
        let args = try_parse_type_args(&mut parser).unwrap();
        assert_eq!(args.len(), 1);
        assert!(parser.check(&Token::LeftParen));
    }

    #[test]
    fn test_type_params_with_variance() {
        let mut parser = Parser::new("<in T, out U>").unwrap();
        let params = parse_type_params(&mut parser).unwrap();
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["T", "U"]);
    }
}
