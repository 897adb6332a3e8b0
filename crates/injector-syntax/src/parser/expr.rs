//! Expression parsing
//!
//! Precedence climbing over the table in [`super::precedence`], with
//! dedicated productions for assignment, the conditional operator, lambdas
//! and casts.

use super::guards::with_depth;
use super::precedence::{binary_operator, get_precedence, is_right_associative, Precedence};
use super::types::{parse_type, try_parse_type_args};
use super::{stmt, ParseError, Parser};
use crate::ast::*;
use crate::token::{Span, Token};

/// Parse an expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    with_depth(parser, "expression", parse_assignment)
}

/// Parse a variable initializer: an expression or a brace-enclosed
/// array/collection initializer.
pub fn parse_variable_initializer(parser: &mut Parser) -> Result<Expression, ParseError> {
    if parser.check(&Token::LeftBrace) {
        return parse_initializer_list(parser).map(Expression::InitializerList);
    }
    parse_expression(parser)
}

/// Parse a parenthesized argument list: `(a, name: b, out var c)`.
pub fn parse_argument_list(parser: &mut Parser) -> Result<Vec<Argument>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let args = parse_arguments(parser, &Token::RightParen)?;
    parser.expect(Token::RightParen)?;
    Ok(args)
}

fn parse_bracket_argument_list(parser: &mut Parser) -> Result<Vec<Argument>, ParseError> {
    parser.expect(Token::LeftBracket)?;
    let args = parse_arguments(parser, &Token::RightBracket)?;
    parser.expect(Token::RightBracket)?;
    Ok(args)
}

fn parse_arguments(parser: &mut Parser, close: &Token) -> Result<Vec<Argument>, ParseError> {
    let mut args = Vec::new();
    if parser.check(close) {
        return Ok(args);
    }
    loop {
        args.push(parse_argument(parser)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }
    Ok(args)
}

fn parse_argument(parser: &mut Parser) -> Result<Argument, ParseError> {
    let start_span = parser.current_span();

    let name = if matches!(parser.current(), Token::Identifier(_))
        && matches!(parser.peek(), Some(Token::Colon))
    {
        let name = parser.expect_identifier()?;
        parser.advance();
        Some(name)
    } else {
        None
    };

    let modifier = match parser.current() {
        Token::Ref => Some(ParameterModifier::Ref),
        Token::Out => Some(ParameterModifier::Out),
        Token::In => Some(ParameterModifier::In),
        _ => None,
    };
    if modifier.is_some() {
        parser.advance();
    }

    // `out var x` / `out int x`: the declared variable stands in for the value
    let value = if modifier == Some(ParameterModifier::Out) && out_declaration_follows(parser) {
        parse_type(parser)?;
        Expression::Identifier(parser.expect_identifier()?)
    } else {
        parse_expression(parser)?
    };

    Ok(Argument {
        name,
        modifier,
        value,
        span: parser.span_from(&start_span),
    })
}

fn out_declaration_follows(parser: &mut Parser) -> bool {
    if !matches!(parser.current(), Token::Identifier(_)) {
        return false;
    }
    let checkpoint = parser.checkpoint();
    let result = parse_type(parser).is_ok() && matches!(parser.current(), Token::Identifier(_));
    parser.restore(checkpoint);
    result
}

/// Parse `{ a, b, Name = c }`.
fn parse_initializer_list(parser: &mut Parser) -> Result<InitializerList, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftBrace)?;

    let mut elements = Vec::new();
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        elements.push(parse_variable_initializer(parser)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }
    parser.expect(Token::RightBrace)?;

    Ok(InitializerList {
        elements,
        span: parser.span_from(&start_span),
    })
}

// ============================================================================
// Assignment and conditional
// ============================================================================

fn parse_assignment(parser: &mut Parser) -> Result<Expression, ParseError> {
    if at_lambda(parser) {
        return parse_lambda(parser);
    }

    let start_span = parser.current_span();
    let left = parse_conditional(parser)?;

    let Some(operator) = assignment_operator(parser.current()) else {
        return Ok(left);
    };
    parser.advance();

    // Assignments are right-associative: `a = b = c`
    let right = if parser.check(&Token::LeftBrace) {
        Expression::InitializerList(parse_initializer_list(parser)?)
    } else {
        parse_expression(parser)?
    };

    Ok(Expression::Assignment(AssignmentExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span: parser.span_from(&start_span),
    }))
}

fn assignment_operator(token: &Token) -> Option<AssignmentOperator> {
    let op = match token {
        Token::Equal => AssignmentOperator::Assign,
        Token::PlusEqual => AssignmentOperator::AddAssign,
        Token::MinusEqual => AssignmentOperator::SubtractAssign,
        Token::StarEqual => AssignmentOperator::MultiplyAssign,
        Token::SlashEqual => AssignmentOperator::DivideAssign,
        Token::PercentEqual => AssignmentOperator::ModuloAssign,
        Token::AmpEqual => AssignmentOperator::AndAssign,
        Token::PipeEqual => AssignmentOperator::OrAssign,
        Token::CaretEqual => AssignmentOperator::XorAssign,
        Token::QuestionQuestionEqual => AssignmentOperator::CoalesceAssign,
        _ => return None,
    };
    Some(op)
}

fn parse_conditional(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    let condition = parse_binary(parser, Precedence::NullCoalescing)?;

    if !parser.eat(&Token::Question) {
        return Ok(condition);
    }
    let then_expr = parse_expression(parser)?;
    parser.expect(Token::Colon)?;
    let else_expr = parse_expression(parser)?;

    Ok(Expression::Conditional(ConditionalExpression {
        condition: Box::new(condition),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
        span: parser.span_from(&start_span),
    }))
}

// ============================================================================
// Binary operators
// ============================================================================

fn parse_binary(parser: &mut Parser, min_prec: Precedence) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    let mut left = parse_unary(parser)?;

    loop {
        let (prec, operator) = if parser.at_right_shift() {
            (Precedence::Shift, Some(BinaryOperator::RightShift))
        } else {
            (
                get_precedence(parser.current()),
                binary_operator(parser.current()),
            )
        };
        if prec == Precedence::None || prec < min_prec {
            break;
        }

        match parser.current() {
            Token::Is => {
                parser.advance();
                left = parse_is_pattern(parser, left, start_span)?;
                continue;
            }
            Token::As => {
                parser.advance();
                let ty = parse_type(parser)?;
                left = Expression::TypeTest(TypeTestExpression {
                    kind: TypeTestKind::As,
                    operand: Box::new(left),
                    ty,
                    binding: None,
                    span: parser.span_from(&start_span),
                });
                continue;
            }
            _ => {}
        }

        let Some(operator) = operator else {
            break;
        };
        let right_assoc = is_right_associative(parser.current());
        if operator == BinaryOperator::RightShift {
            parser.advance();
        }
        parser.advance();

        let right = if right_assoc {
            parse_binary(parser, prec)?
        } else {
            parse_tighter_operand(parser, prec)?
        };

        left = Expression::Binary(BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span: parser.span_from(&start_span),
        });
    }

    Ok(left)
}

/// Right operand of a left-associative operator at level `prec`.
fn parse_tighter_operand(parser: &mut Parser, prec: Precedence) -> Result<Expression, ParseError> {
    if prec == Precedence::Multiplicative {
        parse_unary(parser)
    } else {
        parse_binary(parser, prec.next())
    }
}

/// Parse the pattern after `is`: `null`, `not null`, `T`, `T name`.
fn parse_is_pattern(
    parser: &mut Parser,
    operand: Expression,
    start_span: Span,
) -> Result<Expression, ParseError> {
    let negated = parser.check_contextual("not");
    if negated {
        parser.advance();
    }

    let tested = if parser.check(&Token::Null) {
        let null_span = parser.current_span();
        parser.advance();
        Expression::Binary(BinaryExpression {
            operator: BinaryOperator::Equal,
            left: Box::new(operand),
            right: Box::new(Expression::Literal(Literal {
                kind: LiteralKind::Null,
                raw: "null".to_string(),
                span: null_span,
            })),
            span: parser.span_from(&start_span),
        })
    } else if matches!(parser.current(), Token::Identifier(_)) {
        let ty = parse_type(parser)?;
        let binding = if matches!(parser.current(), Token::Identifier(_)) && !negated {
            Some(parser.expect_identifier()?)
        } else {
            None
        };
        Expression::TypeTest(TypeTestExpression {
            kind: TypeTestKind::Is,
            operand: Box::new(operand),
            ty,
            binding,
            span: parser.span_from(&start_span),
        })
    } else {
        return Err(ParseError::unsupported("pattern", parser.current_span()));
    };

    if !negated {
        return Ok(tested);
    }
    Ok(Expression::Unary(UnaryExpression {
        operator: UnaryOperator::Not,
        operand: Box::new(tested),
        cast_type: None,
        span: parser.span_from(&start_span),
    }))
}

// ============================================================================
// Unary and postfix
// ============================================================================

fn parse_unary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();

    let operator = match parser.current() {
        Token::Plus => Some(UnaryOperator::Plus),
        Token::Minus => Some(UnaryOperator::Minus),
        Token::Bang => Some(UnaryOperator::Not),
        Token::Tilde => Some(UnaryOperator::BitwiseNot),
        Token::PlusPlus => Some(UnaryOperator::PreIncrement),
        Token::MinusMinus => Some(UnaryOperator::PreDecrement),
        Token::Await => Some(UnaryOperator::Await),
        _ => None,
    };

    if let Some(operator) = operator {
        parser.advance();
        let operand = with_depth(parser, "unary", parse_unary)?;
        return Ok(Expression::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
            cast_type: None,
            span: parser.span_from(&start_span),
        }));
    }

    if parser.check(&Token::Throw) {
        parser.advance();
        let value = parse_expression(parser)?;
        return Ok(Expression::Throw(ThrowExpression {
            value: Box::new(value),
            span: parser.span_from(&start_span),
        }));
    }

    if parser.check(&Token::LeftParen) {
        if let Some(cast_type) = try_parse_cast_type(parser) {
            let operand = with_depth(parser, "cast", parse_unary)?;
            return Ok(Expression::Unary(UnaryExpression {
                operator: UnaryOperator::Cast,
                operand: Box::new(operand),
                cast_type: Some(cast_type),
                span: parser.span_from(&start_span),
            }));
        }
    }

    parse_postfix(parser)
}

/// Speculatively read `(Type)` as a cast. Only accepted when the closing
/// paren is followed by a token that can start the cast operand and cannot
/// continue a parenthesized expression.
fn try_parse_cast_type(parser: &mut Parser) -> Option<TypeRef> {
    let checkpoint = parser.checkpoint();
    parser.advance();
    if let Ok(ty) = parse_type(parser) {
        if parser.eat(&Token::RightParen) && starts_cast_operand(parser.current()) {
            return Some(ty);
        }
    }
    parser.restore(checkpoint);
    None
}

fn starts_cast_operand(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::NumberLiteral(_)
            | Token::StringLiteral(_)
            | Token::CharLiteral(_)
            | Token::True
            | Token::False
            | Token::Null
            | Token::LeftParen
            | Token::This
            | Token::Base
            | Token::New
            | Token::Bang
            | Token::Tilde
            | Token::Await
    )
}

fn parse_postfix(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    let mut expr = parse_primary(parser)?;

    loop {
        match parser.current() {
            Token::Dot | Token::QuestionDot => {
                let conditional = parser.check(&Token::QuestionDot);
                parser.advance();
                let name = parser.expect_identifier()?;
                let type_args = if parser.check(&Token::Less) {
                    try_parse_type_args(parser).unwrap_or_default()
                } else {
                    Vec::new()
                };
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    name,
                    type_args,
                    conditional,
                    span: parser.span_from(&start_span),
                });
            }
            Token::LeftParen => {
                let args = parse_argument_list(parser)?;
                expr = Expression::Invocation(InvocationExpression {
                    callee: Box::new(expr),
                    args,
                    span: parser.span_from(&start_span),
                });
            }
            Token::LeftBracket => {
                let args = parse_bracket_argument_list(parser)?;
                expr = Expression::ElementAccess(ElementAccessExpression {
                    object: Box::new(expr),
                    args,
                    conditional: false,
                    span: parser.span_from(&start_span),
                });
            }
            Token::PlusPlus | Token::MinusMinus | Token::Bang => {
                let operator = match parser.advance() {
                    Token::PlusPlus => PostfixOperator::Increment,
                    Token::MinusMinus => PostfixOperator::Decrement,
                    _ => PostfixOperator::NullForgiving,
                };
                expr = Expression::Postfix(PostfixExpression {
                    operator,
                    operand: Box::new(expr),
                    span: parser.span_from(&start_span),
                });
            }
            _ => break,
        }
    }

    Ok(expr)
}

// ============================================================================
// Primary expressions
// ============================================================================

fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();

    match parser.current().clone() {
        Token::NumberLiteral(raw) => Ok(literal(parser, LiteralKind::Number, raw)),
        Token::StringLiteral(raw) => Ok(literal(parser, LiteralKind::String, raw)),
        Token::CharLiteral(raw) => Ok(literal(parser, LiteralKind::Char, raw)),
        Token::True => Ok(literal(parser, LiteralKind::Boolean, "true".to_string())),
        Token::False => Ok(literal(parser, LiteralKind::Boolean, "false".to_string())),
        Token::Null => Ok(literal(parser, LiteralKind::Null, "null".to_string())),
        Token::This => {
            parser.advance();
            Ok(Expression::This(start_span))
        }
        Token::Base => {
            parser.advance();
            Ok(Expression::Base(start_span))
        }
        Token::New => parse_object_creation(parser),
        Token::LeftBrace => parse_initializer_list(parser).map(Expression::InitializerList),
        Token::LeftParen => {
            parser.advance();
            let expression = parse_expression(parser)?;
            if parser.check(&Token::Comma) {
                return Err(ParseError::unsupported("tuple expression", start_span));
            }
            parser.expect(Token::RightParen)?;
            Ok(Expression::Paren(ParenExpression {
                expression: Box::new(expression),
                span: parser.span_from(&start_span),
            }))
        }
        Token::Identifier(name) => {
            if matches!(parser.peek(), Some(Token::LeftParen)) {
                if let Some(kind) = TypeOperatorKind::from_keyword(&name) {
                    return parse_type_operator(parser, kind);
                }
            }

            let name = parser.expect_identifier()?;
            if parser.check(&Token::Less) {
                if let Some(type_args) = try_parse_type_args(parser) {
                    return Ok(Expression::GenericName(GenericNameExpression {
                        name,
                        type_args,
                        span: parser.span_from(&start_span),
                    }));
                }
            }
            Ok(Expression::Identifier(name))
        }
        _ => Err(parser.unexpected_token(&[
            Token::Identifier(String::new()),
            Token::NumberLiteral(String::new()),
            Token::LeftParen,
        ])),
    }
}

fn literal(parser: &mut Parser, kind: LiteralKind, raw: String) -> Expression {
    let span = parser.current_span();
    parser.advance();
    Expression::Literal(Literal { kind, raw, span })
}

/// Parse `typeof(T)`, `default(T)` or `sizeof(T)`.
fn parse_type_operator(
    parser: &mut Parser,
    kind: TypeOperatorKind,
) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    parser.advance();
    parser.expect(Token::LeftParen)?;
    let ty = parse_type(parser)?;
    parser.expect(Token::RightParen)?;
    Ok(Expression::TypeOperator(TypeOperatorExpression {
        kind,
        ty,
        span: parser.span_from(&start_span),
    }))
}

/// Parse `new T(args) { ... }`, `new T[n]`, `new[] { ... }`, `new { ... }`
/// and target-typed `new(args)`.
fn parse_object_creation(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::New)?;

    let mut ty = None;
    let mut is_array = false;
    let mut args = Vec::new();

    if parser.check(&Token::LeftBracket) {
        parser.advance();
        while parser.eat(&Token::Comma) {}
        parser.expect(Token::RightBracket)?;
        is_array = true;
    } else if matches!(parser.current(), Token::Identifier(_)) {
        let parsed = parse_type(parser)?;
        is_array = matches!(parsed.kind, TypeRefKind::Array { .. });
        ty = Some(parsed);
    }

    if parser.check(&Token::LeftParen) {
        args = parse_argument_list(parser)?;
    } else if parser.check(&Token::LeftBracket) && ty.is_some() {
        args = parse_bracket_argument_list(parser)?;
        is_array = true;
    }

    let initializer = if parser.check(&Token::LeftBrace) {
        Some(parse_initializer_list(parser)?)
    } else {
        None
    };

    if ty.is_none() && is_array && initializer.is_none() {
        return Err(ParseError::invalid_syntax(
            "implicitly typed array requires an initializer",
            start_span,
        ));
    }

    Ok(Expression::ObjectCreation(ObjectCreationExpression {
        ty,
        is_array,
        args,
        initializer,
        span: parser.span_from(&start_span),
    }))
}

// ============================================================================
// Lambdas
// ============================================================================

/// Whether a lambda or anonymous method starts at the current token.
fn at_lambda(parser: &Parser) -> bool {
    let offset = if parser.check(&Token::Async) { 1 } else { 0 };
    match parser.peek_nth(offset) {
        Some(Token::Identifier(name)) if name == "delegate" => {
            matches!(parser.peek_nth(offset + 1), Some(Token::LeftParen | Token::LeftBrace))
        }
        Some(Token::Identifier(_)) => matches!(parser.peek_nth(offset + 1), Some(Token::Arrow)),
        Some(Token::LeftParen) => {
            matches!(closing_paren_offset(parser, offset), Some(close) if matches!(parser.peek_nth(close + 1), Some(Token::Arrow)))
        }
        _ => false,
    }
}

/// Offset of the `)` matching the `(` at `open`, relative to the current
/// token.
fn closing_paren_offset(parser: &Parser, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut offset = open;
    loop {
        match parser.peek_nth(offset)? {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            Token::Eof => return None,
            _ => {}
        }
        offset += 1;
    }
}

fn parse_lambda(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    let is_async = parser.eat(&Token::Async);

    // `delegate (int x) { ... }`
    if parser.check_contextual("delegate") {
        parser.advance();
        let params = if parser.check(&Token::LeftParen) {
            parse_lambda_params(parser)?
        } else {
            Vec::new()
        };
        let body = stmt::parse_block(parser)?;
        return Ok(Expression::Lambda(LambdaExpression {
            is_async,
            params,
            body: LambdaBody::Block(body),
            span: parser.span_from(&start_span),
        }));
    }

    let params = if parser.check(&Token::LeftParen) {
        parse_lambda_params(parser)?
    } else {
        vec![LambdaParameter {
            ty: None,
            name: parser.expect_identifier()?,
        }]
    };
    parser.expect(Token::Arrow)?;

    let body = if parser.check(&Token::LeftBrace) {
        LambdaBody::Block(stmt::parse_block(parser)?)
    } else {
        LambdaBody::Expression(Box::new(parse_expression(parser)?))
    };

    Ok(Expression::Lambda(LambdaExpression {
        is_async,
        params,
        body,
        span: parser.span_from(&start_span),
    }))
}

/// Parse `(a, b)` or `(int a, string b)`.
fn parse_lambda_params(parser: &mut Parser) -> Result<Vec<LambdaParameter>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut params = Vec::new();
    if parser.eat(&Token::RightParen) {
        return Ok(params);
    }
    loop {
        if parser.check_any(&[Token::Ref, Token::Out, Token::In]) {
            parser.advance();
        }
        let untyped = matches!(parser.current(), Token::Identifier(_))
            && matches!(parser.peek(), Some(Token::Comma | Token::RightParen));
        let ty = if untyped {
            None
        } else {
            Some(parse_type(parser)?)
        };
        let name = parser.expect_identifier()?;
        params.push(LambdaParameter { ty, name });
        if !parser.eat(&Token::Comma) {
            break;
        }
    }
    parser.expect(Token::RightParen)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(source: &str) -> Expression {
        let mut parser = Parser::new(source).unwrap();
        let parsed = parse_expression(&mut parser).unwrap();
        assert!(parser.at_eof(), "trailing input in {source:?}");
        parsed
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let Expression::Assignment(outer) = expr("a = b = c") else {
            panic!("expected assignment");
        };
        assert_eq!(outer.left.as_identifier(), Some("a"));
        assert!(matches!(*outer.right, Expression::Assignment(_)));
    }

    #[test]
    fn test_left_associative_subtraction() {
        let Expression::Binary(outer) = expr("a - b - c") else {
            panic!("expected binary");
        };
        assert!(matches!(*outer.left, Expression::Binary(_)));
        assert_eq!(outer.right.as_identifier(), Some("c"));
    }

    #[test]
    fn test_right_shift_from_two_tokens() {
        let Expression::Binary(binary) = expr("a >> 2") else {
            panic!("expected binary");
        };
        assert_eq!(binary.operator, BinaryOperator::RightShift);
    }

    #[test]
    fn test_cast_vs_parenthesized() {
        assert!(matches!(
            expr("(IService)provider"),
            Expression::Unary(UnaryExpression {
                operator: UnaryOperator::Cast,
                ..
            })
        ));
        assert!(matches!(expr("(a) - b"), Expression::Binary(_)));
    }

    #[test]
    fn test_generic_invocation_vs_comparison() {
        let Expression::Invocation(call) = expr("Resolve<ILogger>()") else {
            panic!("expected invocation");
        };
        assert!(matches!(*call.callee, Expression::GenericName(_)));
        assert!(matches!(expr("a < b"), Expression::Binary(_)));
    }

    #[test]
    fn test_lambda_forms() {
        assert!(matches!(expr("x => x + 1"), Expression::Lambda(_)));
        assert!(matches!(expr("(a, b) => { }"), Expression::Lambda(_)));
        assert!(matches!(expr("async () => await Task.Delay(1)"), Expression::Lambda(_)));
        assert!(matches!(expr("delegate { }"), Expression::Lambda(_)));
    }

    #[test]
    fn test_throw_expression_in_coalesce() {
        let Expression::Assignment(assign) =
            expr("_x = x ?? throw new ArgumentNullException(nameof(x))")
        else {
            panic!("expected assignment");
        };
        let Expression::Binary(coalesce) = assign.right.as_ref() else {
            panic!("expected coalesce");
        };
        assert!(matches!(*coalesce.right, Expression::Throw(_)));
    }

    #[test]
    fn test_is_not_null() {
        assert!(matches!(
            expr("x is not null"),
            Expression::Unary(UnaryExpression {
                operator: UnaryOperator::Not,
                ..
            })
        ));
        assert!(matches!(expr("x is Foo f"), Expression::TypeTest(_)));
    }

    #[test]
    fn test_object_creation_forms() {
        for source in [
            "new List<int>()",
            "new Foo { Bar = 1 }",
            "new int[3]",
            "new[] { 1, 2 }",
            "new()",
        ] {
            assert!(
                matches!(expr(source), Expression::ObjectCreation(_)),
                "{source}"
            );
        }
    }

    #[test]
    fn test_out_var_argument() {
        let Expression::Invocation(call) = expr("map.TryGetValue(key, out var value)") else {
            panic!("expected invocation");
        };
        assert_eq!(call.args[1].modifier, Some(ParameterModifier::Out));
        assert_eq!(call.args[1].value.as_identifier(), Some("value"));
    }
}
