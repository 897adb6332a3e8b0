//! Statement parsing

use super::guards::{with_depth, LoopGuard};
use super::types::parse_type;
use super::{decl, expr, recovery, ParseError, Parser};
use crate::ast::*;
use crate::token::{Span, Token};

/// Parse `{ statements }`, recovering from errors inside the block.
pub fn parse_block(parser: &mut Parser) -> Result<Block, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftBrace)?;

    let mut statements = Vec::new();
    let mut guard = LoopGuard::new("block");
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        let before = parser.pos;
        match parse_statement(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(err) => {
                parser.error(err);
                recovery::sync_to_statement_boundary(parser);
                if parser.pos == before && !parser.at_eof() && !parser.check(&Token::RightBrace) {
                    parser.advance();
                }
            }
        }
    }

    if parser.at_eof() {
        return Err(ParseError::unclosed_delimiter(
            Token::LeftBrace,
            Token::RightBrace,
            start_span,
        ));
    }
    parser.advance();

    Ok(Block {
        statements,
        span: parser.span_from(&start_span),
    })
}

/// Parse a statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    with_depth(parser, "statement", parse_statement_inner)
}

fn parse_statement_inner(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    match parser.current() {
        Token::LeftBrace => parse_block(parser).map(Statement::Block),
        Token::Semicolon => {
            parser.advance();
            Ok(Statement::Empty(start_span))
        }
        Token::If => parse_if_statement(parser),
        Token::While => parse_while_statement(parser),
        Token::Do => parse_do_while_statement(parser),
        Token::For => parse_for_statement(parser),
        Token::Foreach => parse_foreach_statement(parser),
        Token::Return => {
            parser.advance();
            let value = parse_optional_expression(parser)?;
            parser.expect(Token::Semicolon)?;
            Ok(Statement::Return(ReturnStatement {
                value,
                span: parser.span_from(&start_span),
            }))
        }
        Token::Throw => {
            parser.advance();
            let value = parse_optional_expression(parser)?;
            parser.expect(Token::Semicolon)?;
            Ok(Statement::Throw(ThrowStatement {
                value,
                span: parser.span_from(&start_span),
            }))
        }
        Token::Try => parse_try_statement(parser),
        Token::Break | Token::Continue => {
            let is_break = parser.check(&Token::Break);
            parser.advance();
            parser.expect(Token::Semicolon)?;
            let span = parser.span_from(&start_span);
            Ok(if is_break {
                Statement::Break(span)
            } else {
                Statement::Continue(span)
            })
        }
        Token::Using => parse_using_statement(parser),
        Token::Const => {
            parser.advance();
            let decl = parse_local_decl(parser, true, start_span)?;
            parser.expect(Token::Semicolon)?;
            Ok(Statement::LocalDecl(LocalDecl {
                span: parser.span_from(&start_span),
                ..decl
            }))
        }
        Token::Identifier(word) if matches!(parser.peek(), Some(Token::LeftParen)) && word == "switch" => {
            parse_switch_statement(parser)
        }
        Token::Identifier(word) if matches!(parser.peek(), Some(Token::LeftParen)) && word == "lock" => {
            parse_lock_statement(parser)
        }
        // Iterator statements read as the jump they end in
        Token::Identifier(word)
            if word == "yield" && matches!(parser.peek(), Some(Token::Return | Token::Break)) =>
        {
            parser.advance();
            parse_statement_inner(parser)
        }
        _ => {
            if let Some(decl) = try_parse_local_decl(parser, start_span)? {
                parser.expect(Token::Semicolon)?;
                return Ok(Statement::LocalDecl(LocalDecl {
                    span: parser.span_from(&start_span),
                    ..decl
                }));
            }
            parse_expression_statement(parser)
        }
    }
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    let expression = expr::parse_expression(parser)?;
    parser.expect(Token::Semicolon)?;
    Ok(Statement::Expression(ExpressionStatement {
        expression,
        span: parser.span_from(&start_span),
    }))
}

fn parse_optional_expression(parser: &mut Parser) -> Result<Option<Expression>, ParseError> {
    if parser.check(&Token::Semicolon) {
        Ok(None)
    } else {
        expr::parse_expression(parser).map(Some)
    }
}

fn parse_parenthesized(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect(Token::LeftParen)?;
    let expression = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;
    Ok(expression)
}

// ============================================================================
// Local declarations
// ============================================================================

/// Whether the tokens at the current position read as `Type name` followed
/// by `=`, `;`, `,` or `in`. The parser position is left unchanged.
fn looks_like_local_decl(parser: &mut Parser) -> bool {
    if !matches!(parser.current(), Token::Identifier(_)) {
        return false;
    }
    let checkpoint = parser.checkpoint();
    let result = parse_type(parser).is_ok()
        && matches!(parser.current(), Token::Identifier(_))
        && matches!(
            parser.peek(),
            Some(Token::Equal | Token::Semicolon | Token::Comma | Token::In)
        );
    parser.restore(checkpoint);
    result
}

fn try_parse_local_decl(
    parser: &mut Parser,
    start_span: Span,
) -> Result<Option<LocalDecl>, ParseError> {
    if !looks_like_local_decl(parser) {
        return Ok(None);
    }
    parse_local_decl(parser, false, start_span).map(Some)
}

/// Parse `Type a = 1, b` (without the terminating `;`).
fn parse_local_decl(
    parser: &mut Parser,
    is_const: bool,
    start_span: Span,
) -> Result<LocalDecl, ParseError> {
    let ty = parse_type(parser)?;
    let mut variables = Vec::new();
    loop {
        let name = parser.expect_identifier()?;
        variables.push(decl::parse_declarator_rest(parser, name)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }
    Ok(LocalDecl {
        is_const,
        ty,
        variables,
        span: parser.span_from(&start_span),
    })
}

// ============================================================================
// Control flow
// ============================================================================

fn parse_if_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::If)?;
    let condition = parse_parenthesized(parser)?;
    let then_branch = Box::new(parse_statement(parser)?);
    let else_branch = if parser.eat(&Token::Else) {
        Some(Box::new(parse_statement(parser)?))
    } else {
        None
    };

    Ok(Statement::If(IfStatement {
        condition,
        then_branch,
        else_branch,
        span: parser.span_from(&start_span),
    }))
}

fn parse_while_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::While)?;
    let condition = parse_parenthesized(parser)?;
    let body = Box::new(parse_statement(parser)?);

    Ok(Statement::While(WhileStatement {
        condition,
        body,
        span: parser.span_from(&start_span),
    }))
}

fn parse_do_while_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Do)?;
    let body = Box::new(parse_statement(parser)?);
    parser.expect(Token::While)?;
    let condition = parse_parenthesized(parser)?;
    parser.expect(Token::Semicolon)?;

    Ok(Statement::DoWhile(DoWhileStatement {
        body,
        condition,
        span: parser.span_from(&start_span),
    }))
}

fn parse_for_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::For)?;
    parser.expect(Token::LeftParen)?;

    let init = if parser.check(&Token::Semicolon) {
        None
    } else {
        let init_start = parser.current_span();
        match try_parse_local_decl(parser, init_start)? {
            Some(decl) => Some(ForInit::Declaration(decl)),
            None => Some(ForInit::Expressions(parse_expression_list(
                parser,
                &Token::Semicolon,
            )?)),
        }
    };
    parser.expect(Token::Semicolon)?;

    let condition = parse_optional_expression(parser)?;
    parser.expect(Token::Semicolon)?;

    let update = parse_expression_list(parser, &Token::RightParen)?;
    parser.expect(Token::RightParen)?;

    let body = Box::new(parse_statement(parser)?);

    Ok(Statement::For(ForStatement {
        init,
        condition,
        update,
        body,
        span: parser.span_from(&start_span),
    }))
}

fn parse_expression_list(parser: &mut Parser, end: &Token) -> Result<Vec<Expression>, ParseError> {
    let mut exprs = Vec::new();
    if parser.check(end) {
        return Ok(exprs);
    }
    loop {
        exprs.push(expr::parse_expression(parser)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }
    Ok(exprs)
}

fn parse_foreach_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Foreach)?;
    parser.expect(Token::LeftParen)?;
    let ty = parse_type(parser)?;
    let variable = parser.expect_identifier()?;
    parser.expect(Token::In)?;
    let iterable = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;
    let body = Box::new(parse_statement(parser)?);

    Ok(Statement::Foreach(ForeachStatement {
        ty,
        variable,
        iterable,
        body,
        span: parser.span_from(&start_span),
    }))
}

fn parse_switch_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.advance();
    let value = parse_parenthesized(parser)?;
    parser.expect(Token::LeftBrace)?;

    let mut sections = Vec::new();
    let mut guard = LoopGuard::new("switch_sections");
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        let section_start = parser.current_span();

        let mut labels = Vec::new();
        while at_switch_label(parser) {
            labels.push(parse_switch_label(parser)?);
        }
        if labels.is_empty() {
            return Err(ParseError::invalid_syntax(
                "expected 'case' or 'default' label",
                parser.current_span(),
            ));
        }

        let mut statements = Vec::new();
        while !at_switch_label(parser) && !parser.check(&Token::RightBrace) && !parser.at_eof() {
            statements.push(parse_statement(parser)?);
        }

        sections.push(SwitchSection {
            labels,
            statements,
            span: parser.span_from(&section_start),
        });
    }
    parser.expect(Token::RightBrace)?;

    Ok(Statement::Switch(SwitchStatement {
        value,
        sections,
        span: parser.span_from(&start_span),
    }))
}

fn at_switch_label(parser: &Parser) -> bool {
    parser.check_contextual("case")
        || (parser.check_contextual("default") && matches!(parser.peek(), Some(Token::Colon)))
}

fn parse_switch_label(parser: &mut Parser) -> Result<SwitchLabel, ParseError> {
    let span = parser.current_span();
    if parser.check_contextual("default") {
        parser.advance();
        parser.expect(Token::Colon)?;
        return Ok(SwitchLabel::Default(span));
    }

    parser.advance();
    let value = expr::parse_expression(parser)?;
    // Declaration pattern designation: `case Circle c:`
    if matches!(parser.current(), Token::Identifier(_)) && !parser.check_contextual("when") {
        parser.advance();
    }
    if parser.check_contextual("when") {
        parser.advance();
        expr::parse_expression(parser)?;
    }
    parser.expect(Token::Colon)?;
    Ok(SwitchLabel::Case(value))
}

fn parse_try_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Try)?;
    let body = parse_block(parser)?;

    let mut catches = Vec::new();
    while parser.check(&Token::Catch) {
        let catch_start = parser.current_span();
        parser.advance();

        let (ty, variable) = if parser.eat(&Token::LeftParen) {
            let ty = parse_type(parser)?;
            let variable = if matches!(parser.current(), Token::Identifier(_)) {
                Some(parser.expect_identifier()?)
            } else {
                None
            };
            parser.expect(Token::RightParen)?;
            (Some(ty), variable)
        } else {
            (None, None)
        };

        let filter = if parser.check_contextual("when") {
            parser.advance();
            Some(parse_parenthesized(parser)?)
        } else {
            None
        };

        let body = parse_block(parser)?;
        catches.push(CatchClause {
            ty,
            variable,
            filter,
            body,
            span: parser.span_from(&catch_start),
        });
    }

    let finally = if parser.eat(&Token::Finally) {
        Some(parse_block(parser)?)
    } else {
        None
    };

    if catches.is_empty() && finally.is_none() {
        return Err(parser.unexpected_token(&[Token::Catch, Token::Finally]));
    }

    Ok(Statement::Try(TryStatement {
        body,
        catches,
        finally,
        span: parser.span_from(&start_span),
    }))
}

fn parse_using_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Using)?;

    if parser.eat(&Token::LeftParen) {
        let resource_start = parser.current_span();
        let resource = match try_parse_local_decl(parser, resource_start)? {
            Some(decl) => UsingResource::Declaration(decl),
            None => UsingResource::Expression(expr::parse_expression(parser)?),
        };
        parser.expect(Token::RightParen)?;
        let body = Box::new(parse_statement(parser)?);
        return Ok(Statement::Using(UsingStatement {
            resource,
            body: Some(body),
            span: parser.span_from(&start_span),
        }));
    }

    let decl_start = parser.current_span();
    let decl = parse_local_decl(parser, false, decl_start)?;
    parser.expect(Token::Semicolon)?;
    Ok(Statement::Using(UsingStatement {
        resource: UsingResource::Declaration(decl),
        body: None,
        span: parser.span_from(&start_span),
    }))
}

fn parse_lock_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.advance();
    let target = parse_parenthesized(parser)?;
    let body = Box::new(parse_statement(parser)?);
    Ok(Statement::Lock(LockStatement {
        target,
        body,
        span: parser.span_from(&start_span),
    }))
}
