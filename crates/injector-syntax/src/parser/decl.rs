//! Declaration parsing: usings, namespaces, types and their members.

use super::guards::LoopGuard;
use super::types::{parse_type, parse_type_params, skip_constraint_clauses};
use super::{expr, recovery, stmt, ParseError, Parser};
use crate::ast::*;
use crate::token::{Span, Token};

// ============================================================================
// Usings and namespaces
// ============================================================================

/// Parse `using [static] [Alias =] Name;`.
pub fn parse_using(parser: &mut Parser) -> Result<UsingDirective, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Using)?;

    let is_static = parser.eat(&Token::Static);
    let alias = if matches!(parser.current(), Token::Identifier(_))
        && matches!(parser.peek(), Some(Token::Equal))
    {
        let alias = parser.expect_identifier()?;
        parser.advance();
        Some(alias)
    } else {
        None
    };

    let name = parse_qualified_name(parser)?;
    // Generic alias targets: `using Map = Dictionary<string, int>;`
    recovery::skip_until(parser, &[Token::Semicolon]);
    parser.expect(Token::Semicolon)?;

    Ok(UsingDirective {
        is_static,
        alias,
        name,
        span: parser.span_from(&start_span),
    })
}

/// Parse a dotted name: `System.Collections.Generic`.
pub fn parse_qualified_name(parser: &mut Parser) -> Result<QualifiedName, ParseError> {
    let start_span = parser.current_span();
    let mut segments = vec![parser.expect_identifier()?];
    while parser.check(&Token::Dot) && matches!(parser.peek(), Some(Token::Identifier(_))) {
        parser.advance();
        segments.push(parser.expect_identifier()?);
    }
    Ok(QualifiedName {
        segments,
        span: parser.span_from(&start_span),
    })
}

/// Parse `namespace A.B;` and everything after it.
pub fn parse_file_scoped_namespace(parser: &mut Parser) -> Result<NamespaceDecl, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Namespace)?;
    let name = parse_qualified_name(parser)?;
    parser.expect(Token::Semicolon)?;

    let usings = parser.parse_usings();
    let mut members = Vec::new();
    while !parser.at_eof() {
        parser.parse_namespace_member_into(&mut members);
    }

    Ok(NamespaceDecl {
        name,
        file_scoped: true,
        usings,
        members,
        span: parser.span_from(&start_span),
    })
}

/// Parse a block namespace or a type declaration.
pub fn parse_namespace_member(parser: &mut Parser) -> Result<NamespaceMember, ParseError> {
    let start_span = parser.current_span();

    if parser.check(&Token::Namespace) {
        return parse_block_namespace(parser).map(NamespaceMember::Namespace);
    }

    let attributes = parse_attribute_lists(parser)?;
    let modifiers = parse_modifiers(parser);

    if is_type_keyword(parser.current()) {
        return parse_type_decl(parser, attributes, modifiers, start_span).map(NamespaceMember::Type);
    }

    if parser.check_contextual("record") {
        return Err(ParseError::unsupported(
            "record declaration",
            parser.current_span(),
        ));
    }

    Err(parser.unexpected_token(&[
        Token::Namespace,
        Token::Class,
        Token::Struct,
        Token::Interface,
        Token::Enum,
    ]))
}

fn parse_block_namespace(parser: &mut Parser) -> Result<NamespaceDecl, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Namespace)?;
    let name = parse_qualified_name(parser)?;
    let open_span = parser.current_span();
    parser.expect(Token::LeftBrace)?;

    let usings = parser.parse_usings();
    let mut members = Vec::new();
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        parser.parse_namespace_member_into(&mut members);
    }

    if parser.at_eof() {
        return Err(ParseError::unclosed_delimiter(
            Token::LeftBrace,
            Token::RightBrace,
            open_span,
        ));
    }
    parser.expect(Token::RightBrace)?;

    Ok(NamespaceDecl {
        name,
        file_scoped: false,
        usings,
        members,
        span: parser.span_from(&start_span),
    })
}

fn is_type_keyword(token: &Token) -> bool {
    matches!(
        token,
        Token::Class | Token::Struct | Token::Interface | Token::Enum
    )
}

// ============================================================================
// Attributes and modifiers
// ============================================================================

/// Parse zero or more `[...]` attribute sections.
pub fn parse_attribute_lists(parser: &mut Parser) -> Result<Vec<AttributeList>, ParseError> {
    let mut lists = Vec::new();
    while parser.check(&Token::LeftBracket) {
        let start_span = parser.current_span();
        parser.advance();

        // Target specifier: `[assembly: ...]`, `[return: ...]`
        if matches!(parser.peek(), Some(Token::Colon))
            && matches!(parser.current(), Token::Identifier(_) | Token::Return)
        {
            parser.advance();
            parser.advance();
        }

        let mut attributes = Vec::new();
        loop {
            let attr_start = parser.current_span();
            let name = parse_qualified_name(parser)?;
            let args = if parser.check(&Token::LeftParen) {
                expr::parse_argument_list(parser)?
            } else {
                Vec::new()
            };
            attributes.push(Attribute {
                name,
                args,
                span: parser.span_from(&attr_start),
            });
            if !parser.eat(&Token::Comma) || parser.check(&Token::RightBracket) {
                break;
            }
        }
        parser.expect(Token::RightBracket)?;

        lists.push(AttributeList {
            attributes,
            span: parser.span_from(&start_span),
        });
    }
    Ok(lists)
}

/// Parse a run of modifier keywords.
pub fn parse_modifiers(parser: &mut Parser) -> Modifiers {
    let mut items = Vec::new();
    loop {
        let kind = match parser.current() {
            Token::Public => ModifierKind::Public,
            Token::Private => ModifierKind::Private,
            Token::Protected => ModifierKind::Protected,
            Token::Internal => ModifierKind::Internal,
            Token::Static => ModifierKind::Static,
            Token::Readonly => ModifierKind::Readonly,
            Token::Const => ModifierKind::Const,
            Token::Abstract => ModifierKind::Abstract,
            Token::Sealed => ModifierKind::Sealed,
            Token::Partial => ModifierKind::Partial,
            Token::Virtual => ModifierKind::Virtual,
            Token::Override => ModifierKind::Override,
            Token::Async => ModifierKind::Async,
            Token::Extern => ModifierKind::Extern,
            Token::Unsafe => ModifierKind::Unsafe,
            Token::Volatile => ModifierKind::Volatile,
            Token::New => ModifierKind::New,
            _ => break,
        };
        let span = parser.current_span();
        parser.advance();
        items.push(Modifier { kind, span });
    }
    Modifiers::new(items)
}

// ============================================================================
// Type declarations
// ============================================================================

/// Parse a type declaration after its attributes and modifiers.
pub fn parse_type_decl(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    start_span: Span,
) -> Result<TypeDecl, ParseError> {
    let kind = match parser.current() {
        Token::Class => TypeKind::Class,
        Token::Struct => TypeKind::Struct,
        Token::Interface => TypeKind::Interface,
        Token::Enum => TypeKind::Enum,
        _ => {
            return Err(parser.unexpected_token(&[
                Token::Class,
                Token::Struct,
                Token::Interface,
                Token::Enum,
            ]))
        }
    };
    parser.advance();

    let name = parser.expect_identifier()?;
    let type_params = parse_type_params(parser)?;

    if parser.check(&Token::LeftParen) {
        return Err(ParseError::unsupported(
            "primary constructor",
            parser.current_span(),
        ));
    }

    let mut base_types = Vec::new();
    if parser.eat(&Token::Colon) {
        base_types.push(parse_type(parser)?);
        while parser.eat(&Token::Comma) {
            base_types.push(parse_type(parser)?);
        }
    }
    skip_constraint_clauses(parser, &[Token::LeftBrace]);

    let open_brace = parser.current_span();
    let mut members = Vec::new();
    let mut has_unparsed_constructor = false;

    if kind == TypeKind::Enum {
        if !parser.check(&Token::LeftBrace) {
            return Err(parser.unexpected_token(&[Token::LeftBrace]));
        }
        recovery::expect_balanced(parser)?;
    } else {
        parser.expect(Token::LeftBrace)?;
        let mut guard = LoopGuard::new("type_members");
        while !parser.check(&Token::RightBrace) && !parser.at_eof() {
            guard.check(parser.current_span())?;
            let before = parser.pos;
            let errors_before = parser.errors.len();
            match parse_member(parser, &name.name) {
                Ok(member) => {
                    // A constructor whose body lost statements to recovery
                    if matches!(member, Member::Constructor(_))
                        && parser.errors.len() > errors_before
                    {
                        has_unparsed_constructor = true;
                    }
                    members.push(member);
                }
                Err(err) => {
                    if starts_constructor(parser, before, &name.name) {
                        has_unparsed_constructor = true;
                    }
                    parser.error(err);
                    recovery::sync_to_member_boundary(parser);
                    if parser.pos == before && !parser.at_eof() {
                        parser.advance();
                    }
                }
            }
        }
        if parser.at_eof() {
            return Err(ParseError::unclosed_delimiter(
                Token::LeftBrace,
                Token::RightBrace,
                open_brace,
            ));
        }
        parser.advance();
    }

    let close_brace = parser.previous_span();
    let span = parser.combine_spans(&start_span, &close_brace);
    parser.eat(&Token::Semicolon);

    Ok(TypeDecl {
        attributes,
        modifiers,
        kind,
        name,
        type_params,
        base_types,
        members,
        open_brace,
        close_brace,
        has_unparsed_constructor,
        span,
    })
}

/// True when the tokens at `from` open a constructor of `type_name`:
/// attribute lists and modifiers, then `TypeName(`.
fn starts_constructor(parser: &Parser, from: usize, type_name: &str) -> bool {
    let mut i = from;
    let mut brackets = 0usize;
    while let Some((tok, _)) = parser.tokens.get(i) {
        match tok {
            Token::LeftBracket => brackets += 1,
            Token::RightBracket => brackets = brackets.saturating_sub(1),
            _ if brackets > 0 => {}
            tok if tok.is_modifier() => {}
            tok => {
                return tok.identifier() == Some(type_name)
                    && matches!(parser.tokens.get(i + 1), Some((Token::LeftParen, _)));
            }
        }
        i += 1;
    }
    false
}

// ============================================================================
// Members
// ============================================================================

/// Parse one member of the type named `type_name`.
pub fn parse_member(parser: &mut Parser, type_name: &str) -> Result<Member, ParseError> {
    let start_span = parser.current_span();
    let attributes = parse_attribute_lists(parser)?;
    let modifiers = parse_modifiers(parser);

    if is_type_keyword(parser.current()) {
        return parse_type_decl(parser, attributes, modifiers, start_span).map(Member::Type);
    }

    if parser.current().identifier() == Some(type_name)
        && matches!(parser.peek(), Some(Token::LeftParen))
    {
        return parse_constructor(parser, attributes, modifiers, start_span)
            .map(Member::Constructor);
    }

    if parser.check(&Token::Tilde) {
        return parse_finalizer(parser, attributes, modifiers, start_span).map(Member::Method);
    }

    if parser.check_contextual("delegate") {
        return parse_delegate(parser, attributes, modifiers, start_span).map(Member::Method);
    }

    if (parser.check_contextual("implicit") || parser.check_contextual("explicit"))
        && parser.peek().and_then(Token::identifier) == Some("operator")
    {
        return parse_conversion_operator(parser, attributes, modifiers, start_span)
            .map(Member::Method);
    }

    // Events share field and property syntax
    if parser.check_contextual("event") {
        parser.advance();
    }

    let ty = parse_type(parser)?;

    if parser.check_contextual("operator") {
        return parse_operator(parser, attributes, modifiers, ty, start_span).map(Member::Method);
    }

    if parser.check(&Token::This) {
        let name = Identifier::new("this", parser.current_span());
        parser.advance();
        if !parser.check(&Token::LeftBracket) {
            return Err(parser.unexpected_token(&[Token::LeftBracket]));
        }
        recovery::expect_balanced(parser)?;
        return parse_property_rest(parser, attributes, modifiers, ty, name, start_span)
            .map(Member::Property);
    }

    let mut name = parser.expect_identifier()?;
    // Explicit interface implementation: `void IDisposable.Dispose()`
    while parser.check(&Token::Dot) && matches!(parser.peek(), Some(Token::Identifier(_))) {
        parser.advance();
        name = parser.expect_identifier()?;
    }

    match parser.current() {
        Token::LeftParen | Token::Less => {
            parse_method_rest(parser, attributes, modifiers, ty, name, start_span)
                .map(Member::Method)
        }
        Token::LeftBrace | Token::Arrow => {
            parse_property_rest(parser, attributes, modifiers, ty, name, start_span)
                .map(Member::Property)
        }
        _ => parse_field_rest(parser, attributes, modifiers, ty, name, start_span)
            .map(Member::Field),
    }
}

fn parse_field_rest(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    ty: TypeRef,
    first: Identifier,
    start_span: Span,
) -> Result<FieldDecl, ParseError> {
    let mut variables = vec![parse_declarator_rest(parser, first)?];
    while parser.eat(&Token::Comma) {
        let name = parser.expect_identifier()?;
        variables.push(parse_declarator_rest(parser, name)?);
    }
    parser.expect(Token::Semicolon)?;

    Ok(FieldDecl {
        attributes,
        modifiers,
        ty,
        variables,
        span: parser.span_from(&start_span),
    })
}

/// Parse the optional `= initializer` after a declared variable name.
pub fn parse_declarator_rest(
    parser: &mut Parser,
    name: Identifier,
) -> Result<VariableDeclarator, ParseError> {
    let start_span = name.span;
    let initializer = if parser.eat(&Token::Equal) {
        Some(expr::parse_variable_initializer(parser)?)
    } else {
        None
    };
    Ok(VariableDeclarator {
        name,
        initializer,
        span: parser.span_from(&start_span),
    })
}

fn parse_constructor(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    start_span: Span,
) -> Result<ConstructorDecl, ParseError> {
    let name = parser.expect_identifier()?;
    let params = parse_parameter_list(parser)?;

    let initializer = if parser.eat(&Token::Colon) {
        let init_start = parser.current_span();
        let kind = match parser.current() {
            Token::Base => ConstructorInitializerKind::Base,
            Token::This => ConstructorInitializerKind::This,
            _ => return Err(parser.unexpected_token(&[Token::Base, Token::This])),
        };
        parser.advance();
        let args = expr::parse_argument_list(parser)?;
        Some(ConstructorInitializer {
            kind,
            args,
            span: parser.span_from(&init_start),
        })
    } else {
        None
    };

    let body = parse_function_body(parser)?;

    Ok(ConstructorDecl {
        attributes,
        modifiers,
        name,
        params,
        initializer,
        body,
        span: parser.span_from(&start_span),
        synthesized: false,
    })
}

fn parse_method_rest(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    return_type: TypeRef,
    name: Identifier,
    start_span: Span,
) -> Result<MethodDecl, ParseError> {
    let type_params = parse_type_params(parser)?;
    let params = parse_parameter_list(parser)?;
    skip_constraint_clauses(parser, &[Token::LeftBrace, Token::Arrow, Token::Semicolon]);
    let body = parse_function_body(parser)?;

    Ok(MethodDecl {
        attributes,
        modifiers,
        return_type,
        name,
        type_params,
        params,
        body,
        span: parser.span_from(&start_span),
    })
}

fn parse_finalizer(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    start_span: Span,
) -> Result<MethodDecl, ParseError> {
    let tilde_span = parser.current_span();
    parser.expect(Token::Tilde)?;
    let ident = parser.expect_identifier()?;
    let name = Identifier::new(format!("~{}", ident.name), tilde_span.to(&ident.span));
    let return_type = TypeRef::named("void", tilde_span);
    parse_method_rest(parser, attributes, modifiers, return_type, name, start_span)
}

fn parse_delegate(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    start_span: Span,
) -> Result<MethodDecl, ParseError> {
    parser.advance();
    let return_type = parse_type(parser)?;
    let name = parser.expect_identifier()?;
    parse_method_rest(parser, attributes, modifiers, return_type, name, start_span)
}

fn parse_conversion_operator(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    start_span: Span,
) -> Result<MethodDecl, ParseError> {
    let keyword = parser.expect_identifier()?;
    let operator = parser.expect_identifier()?;
    let return_type = parse_type(parser)?;
    let name = Identifier::new(
        format!("{} {}", keyword.name, operator.name),
        keyword.span.to(&operator.span),
    );
    parse_method_rest(parser, attributes, modifiers, return_type, name, start_span)
}

fn parse_operator(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    return_type: TypeRef,
    start_span: Span,
) -> Result<MethodDecl, ParseError> {
    let keyword_span = parser.current_span();
    parser.advance();
    let mut symbol = parser.advance().to_string();
    // `>>` arrives as two tokens
    if symbol == ">" && parser.check(&Token::Greater) {
        parser.advance();
        symbol.push('>');
    }
    let name = Identifier::new(
        format!("operator {}", symbol),
        parser.span_from(&keyword_span),
    );
    parse_method_rest(parser, attributes, modifiers, return_type, name, start_span)
}

fn parse_property_rest(
    parser: &mut Parser,
    attributes: Vec<AttributeList>,
    modifiers: Modifiers,
    ty: TypeRef,
    name: Identifier,
    start_span: Span,
) -> Result<PropertyDecl, ParseError> {
    let body = if parser.eat(&Token::Arrow) {
        let expression = expr::parse_expression(parser)?;
        parser.expect(Token::Semicolon)?;
        PropertyBody::Expression(expression)
    } else {
        PropertyBody::Accessors(parse_accessors(parser)?)
    };

    let initializer = if parser.eat(&Token::Equal) {
        let value = expr::parse_variable_initializer(parser)?;
        parser.expect(Token::Semicolon)?;
        Some(value)
    } else {
        None
    };

    Ok(PropertyDecl {
        attributes,
        modifiers,
        ty,
        name,
        body,
        initializer,
        span: parser.span_from(&start_span),
    })
}

fn parse_accessors(parser: &mut Parser) -> Result<Vec<Accessor>, ParseError> {
    parser.expect(Token::LeftBrace)?;
    let mut accessors = Vec::new();
    let mut guard = LoopGuard::new("accessors");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        let start_span = parser.current_span();
        parse_attribute_lists(parser)?;
        let modifiers = parse_modifiers(parser);

        let kind = match parser.current().identifier() {
            Some("get") => AccessorKind::Get,
            Some("set") => AccessorKind::Set,
            Some("init") => AccessorKind::Init,
            Some("add") => AccessorKind::Add,
            Some("remove") => AccessorKind::Remove,
            _ => {
                return Err(ParseError::invalid_syntax(
                    "expected accessor (get, set, init, add or remove)",
                    parser.current_span(),
                ))
            }
        };
        parser.advance();
        let body = parse_function_body(parser)?;

        accessors.push(Accessor {
            modifiers,
            kind,
            body,
            span: parser.span_from(&start_span),
        });
    }

    parser.expect(Token::RightBrace)?;
    Ok(accessors)
}

// ============================================================================
// Parameters and bodies
// ============================================================================

/// Parse `(Type name, ref Type name = default, ...)`.
pub fn parse_parameter_list(parser: &mut Parser) -> Result<ParameterList, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftParen)?;

    let mut params = Vec::new();
    if !parser.check(&Token::RightParen) {
        loop {
            params.push(parse_parameter(parser)?);
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
    }
    parser.expect(Token::RightParen)?;

    Ok(ParameterList {
        params,
        span: parser.span_from(&start_span),
    })
}

fn parse_parameter(parser: &mut Parser) -> Result<Parameter, ParseError> {
    let start_span = parser.current_span();
    let attributes = parse_attribute_lists(parser)?;

    let modifier = match parser.current() {
        Token::Ref => Some(ParameterModifier::Ref),
        Token::Out => Some(ParameterModifier::Out),
        Token::In => Some(ParameterModifier::In),
        Token::Params => Some(ParameterModifier::Params),
        Token::This => Some(ParameterModifier::This),
        _ => None,
    };
    if modifier.is_some() {
        parser.advance();
    }

    let ty = parse_type(parser)?;
    let name = parser.expect_identifier()?;
    let default_value = if parser.eat(&Token::Equal) {
        Some(expr::parse_expression(parser)?)
    } else {
        None
    };

    Ok(Parameter {
        attributes,
        modifier,
        ty,
        name,
        default_value,
        span: parser.span_from(&start_span),
    })
}

/// Parse a block body, an expression body `=> expr;`, or a bare `;`.
pub fn parse_function_body(parser: &mut Parser) -> Result<FunctionBody, ParseError> {
    match parser.current() {
        Token::LeftBrace => stmt::parse_block(parser).map(FunctionBody::Block),
        Token::Arrow => {
            let start_span = parser.current_span();
            parser.advance();
            let expression = expr::parse_expression(parser)?;
            parser.expect(Token::Semicolon)?;
            Ok(FunctionBody::Expression {
                expression,
                span: parser.span_from(&start_span),
            })
        }
        Token::Semicolon => {
            let span = parser.current_span();
            parser.advance();
            Ok(FunctionBody::None(span))
        }
        _ => Err(parser.unexpected_token(&[Token::LeftBrace, Token::Arrow, Token::Semicolon])),
    }
}
