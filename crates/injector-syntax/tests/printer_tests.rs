//! Tests for printing synthesized and parsed nodes

use injector_syntax::ast::*;
use injector_syntax::token::Span;
use injector_syntax::{parse_source, PrintOptions, Printer};

fn synthesized_constructor(type_name: &str, param_type: &str, field: &str, param: &str) -> ConstructorDecl {
    ConstructorDecl {
        attributes: Vec::new(),
        modifiers: Modifiers::public(),
        name: Identifier::synthetic(type_name),
        params: ParameterList {
            params: vec![Parameter {
                attributes: Vec::new(),
                modifier: None,
                ty: TypeRef::named(param_type, Span::SYNTHETIC),
                name: Identifier::synthetic(param),
                default_value: None,
                span: Span::SYNTHETIC,
            }],
            span: Span::SYNTHETIC,
        },
        initializer: None,
        body: FunctionBody::Block(Block::synthetic(vec![Statement::Expression(
            ExpressionStatement::synthetic(Expression::assign(
                Identifier::synthetic(field),
                Identifier::synthetic(param),
            )),
        )])),
        span: Span::SYNTHETIC,
        synthesized: true,
    }
}

#[test]
fn test_constructor_in_allman_style() {
    let ctor = synthesized_constructor("TypeName", "string", "_navigationService", "navigationService");
    let printer = Printer::new(PrintOptions::default().with_indent_unit("\t"));
    assert_eq!(
        printer.constructor(&ctor, "\t\t"),
        "public TypeName(string navigationService)\n\t\t{\n\t\t\t_navigationService = navigationService;\n\t\t}"
    );
}

#[test]
fn test_crlf_newlines() {
    let ctor = synthesized_constructor("A", "int", "_x", "x");
    let options = PrintOptions::default().detect_newline("class A\r\n{\r\n}");
    assert_eq!(options.newline, "\r\n");
    let printer = Printer::new(options);
    assert_eq!(
        printer.constructor(&ctor, ""),
        "public A(int x)\r\n{\r\n    _x = x;\r\n}"
    );
}

#[test]
fn test_parsed_nodes_are_copied_verbatim() {
    let source = "class A { public A(IFoo foo /* keep */) { Init( 1,2 ); } }";
    let unit = parse_source(source).unwrap();
    let (_, decl) = unit.types().remove(0);
    let ctor = decl.constructors().next().unwrap();

    let printer = Printer::new(PrintOptions::default()).with_source(source);
    assert_eq!(printer.parameter(&ctor.params.params[0]), "IFoo foo");
    assert_eq!(printer.statement(&ctor.statements()[0], ""), "Init( 1,2 );");
}

#[test]
fn test_mixed_block_keeps_parsed_statements_and_prints_new_ones() {
    let source = "class A { public A(IFoo foo) { _foo = foo; } }";
    let unit = parse_source(source).unwrap();
    let (_, decl) = unit.types().remove(0);
    let ctor = decl.constructors().next().unwrap();

    let mut statements = ctor.statements().to_vec();
    statements.push(Statement::Expression(ExpressionStatement::synthetic(
        Expression::assign(Identifier::synthetic("_bar"), Identifier::synthetic("bar")),
    )));

    let printer = Printer::new(PrintOptions::default()).with_source(source);
    assert_eq!(
        printer.block(&statements, "    "),
        "{\n        _foo = foo;\n        _bar = bar;\n    }"
    );
}

#[test]
fn test_expression_printing_without_source() {
    let source = "class A { public A() { _x = flag ? new List<int>() : items?.First() ?? throw new Error(nameof(x)); } }";
    let unit = parse_source(source).unwrap();
    let (_, decl) = unit.types().remove(0);
    let ctor = decl.constructors().next().unwrap();

    let printer = Printer::new(PrintOptions::default());
    assert_eq!(
        printer.statement(&ctor.statements()[0], ""),
        "_x = flag ? new List<int>() : items?.First() ?? throw new Error(nameof(x));"
    );
}

#[test]
fn test_control_flow_printing_without_source() {
    let source = "class A { public A() { if (a) b(); else { c = 1; } } }";
    let unit = parse_source(source).unwrap();
    let (_, decl) = unit.types().remove(0);
    let ctor = decl.constructors().next().unwrap();

    let printer = Printer::new(PrintOptions::default());
    assert_eq!(
        printer.statement(&ctor.statements()[0], ""),
        "if (a)\n{\n    b();\n}\nelse\n{\n    c = 1;\n}"
    );
}

#[test]
fn test_synthesized_parameter_keeps_declared_type_text() {
    let source = "class A { private readonly global::System.Collections.Generic.Dictionary<string,  int> _map; }";
    let unit = parse_source(source).unwrap();
    let (_, decl) = unit.types().remove(0);
    let field = decl.fields().next().unwrap();

    let param = Parameter {
        attributes: Vec::new(),
        modifier: None,
        ty: field.ty.clone(),
        name: Identifier::synthetic("map"),
        default_value: None,
        span: Span::SYNTHETIC,
    };

    let printer = Printer::new(PrintOptions::default()).with_source(source);
    assert_eq!(
        printer.parameter(&param),
        "global::System.Collections.Generic.Dictionary<string,  int> map"
    );

    // Without the source the type is printed structurally
    let printer = Printer::new(PrintOptions::default());
    assert_eq!(
        printer.parameter(&param),
        "global::System.Collections.Generic.Dictionary<string, int> map"
    );
}
