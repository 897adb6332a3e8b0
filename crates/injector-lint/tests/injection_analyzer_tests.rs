//! End-to-end tests for the injection analyzer and its fix

use injector_lint::rules::injection_analyzer::{analyze, analyze_unit, build_fix};
use injector_lint::{Document, FixError, LintConfig, LintDiagnostic, Linter, NodeEdit, Severity};
use injector_syntax::ast::{Member, Statement};
use injector_syntax::parse_source;

const NAVIGATION_SOURCE: &str = "
using System;
using System.Collections.Generic;
using System.Linq;
using System.Text;
using System.Threading.Tasks;
using System.Diagnostics;

namespace ConsoleApplication1
{
\tclass TypeName
\t{
\t\tprivate readonly string _navigationService;
\t}
}";

const NAVIGATION_FIXED: &str = "
using System;
using System.Collections.Generic;
using System.Linq;
using System.Text;
using System.Threading.Tasks;
using System.Diagnostics;

namespace ConsoleApplication1
{
\tclass TypeName
\t{
\t\tprivate readonly string _navigationService;

\t\tpublic TypeName(string navigationService)
\t\t{
\t\t\t_navigationService = navigationService;
\t\t}
\t}
}";

fn document(source: &str) -> Document {
    match Document::parse("Test0.cs", source) {
        Ok(doc) => doc,
        Err(err) => panic!("parse failed: {:?}", err.diagnostics()),
    }
}

fn diagnostics(doc: &Document) -> Vec<LintDiagnostic> {
    Linter::new().lint_document(doc).diagnostics
}

/// Apply the fix for the only diagnostic of `source` and return the new text.
fn fix_single(source: &str) -> String {
    let doc = document(source);
    let diags = diagnostics(&doc);
    assert_eq!(diags.len(), 1, "expected one diagnostic, got {diags:?}");
    let linter = Linter::new();
    let fix = linter.fixes_for(&doc, &diags[0]).unwrap().expect("fix offered");
    doc.apply(&fix).unwrap().source
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_navigation_service_diagnostic() {
    let doc = document(NAVIGATION_SOURCE);
    let diags = diagnostics(&doc);
    assert_eq!(diags.len(), 1);

    let diag = &diags[0];
    assert_eq!(diag.rule, "InjectionAnalyzer");
    assert_eq!(
        diag.message,
        "Readonly Field '_navigationService' is injected in none of the constructors."
    );
    assert_eq!(diag.severity, Severity::Info);
    assert_eq!(diag.span.line, 13);
    // Columns count characters; the two leading tabs are two columns.
    assert_eq!(diag.span.column, 27);
    assert_eq!(diag.span.slice(NAVIGATION_SOURCE), "_navigationService");
}

#[test]
fn test_empty_input_has_no_diagnostics() {
    assert!(diagnostics(&document("")).is_empty());
}

#[test]
fn test_zero_constructors_gives_one_info_diagnostic() {
    let diags = diagnostics(&document("class A { private readonly IFoo _foo; }"));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, "InjectionAnalyzer");
    assert_eq!(diags[0].severity, Severity::Info);
}

#[test]
fn test_assignment_in_any_constructor_suppresses_diagnostic() {
    let unassigned = "class A { readonly IFoo _foo; public A() { } public A(int x) { Use(x); } }";
    assert_eq!(diagnostics(&document(unassigned)).len(), 1);

    let assigned = "class A { readonly IFoo _foo; public A() { } public A(IFoo foo) { if (foo != null) { _foo = foo; } } }";
    assert!(diagnostics(&document(assigned)).is_empty());
}

#[test]
fn test_static_and_multi_variable_fields_never_diagnosed() {
    let source = "class A {\n\
                  private static readonly string _shared;\n\
                  private readonly string a, b;\n\
                  private string _mutable;\n\
                  }";
    assert!(diagnostics(&document(source)).is_empty());
}

#[test]
fn test_analyze_is_deterministic() {
    let unit = parse_source(
        "namespace N { class A { readonly int _a; readonly int _b; class B { readonly int _c; } } }",
    )
    .unwrap();
    let (_, decl) = unit.types().remove(0);
    assert_eq!(analyze(decl), analyze(decl));

    let first = analyze_unit(&unit);
    let second = analyze_unit(&unit);
    assert_eq!(first, second);
    let names: Vec<&str> = first.iter().map(|d| d.message.split('\'').nth(1).unwrap()).collect();
    assert_eq!(names, vec!["_a", "_b", "_c"]);
}

#[test]
fn test_severity_override_applies_to_rule() {
    let config = LintConfig::from_pairs([("InjectionAnalyzer", "warn")]).unwrap();
    let result = Linter::with_config(config).lint_document(&document("class A { readonly int _x; }"));
    assert_eq!(result.diagnostics[0].severity, Severity::Warn);
}

#[test]
fn test_unicode_field_name() {
    let source = "class A\n{\n    private readonly IFoo _ñame;\n}";
    let diags = diagnostics(&document(source));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "Readonly Field '_ñame' is injected in none of the constructors.");
    assert_eq!((diags[0].span.line, diags[0].span.column), (3, 27));
    assert!(fix_single(source).contains("public A(IFoo ñame)"));
}

#[test]
fn test_unrelated_parse_errors_keep_analysis() {
    let source = "record Person(string Name);

class A
{
    private readonly IFoo _foo;

    bool IsEmpty(string s) { return s is { Length: 0 }; }
}";
    let doc = document(source);
    assert_eq!(doc.parse_errors.len(), 2);

    let diags = diagnostics(&doc);
    let codes: Vec<&str> = diags.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["L0001", "L0001", "L3001"]);
    assert_eq!(diags[2].span.line, 5);
}

#[test]
fn test_unparsed_constructor_suppresses_type() {
    let source = "class A
{
    private readonly IFoo _foo;

    public A(IFoo foo) { _foo = foo is { } f ? f : null; }
}

class B
{
    private readonly IBar _bar;
}";
    let doc = document(source);
    let diags = diagnostics(&doc);
    let codes: Vec<&str> = diags.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["L0001", "L3001"]);
    assert!(diags[1].message.contains("'_bar'"));

    let field = doc.find_field_at(source.find("_foo").unwrap()).unwrap();
    assert!(matches!(
        build_fix(&doc, &field),
        Err(FixError::UnparsedConstructor { ref type_name }) if type_name == "A"
    ));
}

#[test]
fn test_fix_applies_in_file_with_parse_errors() {
    let source = "record Person(string Name);

class A
{
    private readonly IFoo _foo;
}";
    let doc = document(source);
    let fixed = Linter::new().fix_all(doc);
    assert_eq!(fixed.applied, 1);
    assert!(fixed.failures.is_empty());
    assert_eq!(
        fixed.document.source,
        "record Person(string Name);

class A
{
    private readonly IFoo _foo;

    public A(IFoo foo)
    {
        _foo = foo;
    }
}"
    );
}

// ============================================================================
// Fix
// ============================================================================

#[test]
fn test_navigation_service_fix_text() {
    assert_eq!(fix_single(NAVIGATION_SOURCE), NAVIGATION_FIXED);
}

#[test]
fn test_fixed_document_has_no_diagnostics() {
    let fixed = document(&fix_single(NAVIGATION_SOURCE));
    assert!(diagnostics(&fixed).is_empty());
}

#[test]
fn test_fix_without_constructor_builds_new_public_constructor() {
    let doc = document(NAVIGATION_SOURCE);
    let diags = diagnostics(&doc);
    let fix = Linter::new().fixes_for(&doc, &diags[0]).unwrap().unwrap();

    assert_eq!(fix.title, "Inject dependency");
    assert_eq!(fix.rule_id, "InjectionAnalyzer");
    let replacement = match &fix.edit {
        NodeEdit::ReplaceType { replacement, .. } => replacement,
        other => panic!("Expected type replacement, got {other:?}"),
    };
    let ctor = match replacement.members.last() {
        Some(Member::Constructor(ctor)) => ctor,
        _ => panic!("Expected new constructor"),
    };
    assert_eq!(ctor.modifiers.to_string(), "public");
    assert_eq!(ctor.name.name, "TypeName");
    assert_eq!(ctor.params.params.len(), 1);
    assert_eq!(ctor.params.params[0].name.name, "navigationService");
    assert_eq!(ctor.params.params[0].ty.to_string(), "string");
    match ctor.statements() {
        [Statement::Expression(stmt)] => {
            let assign = match &stmt.expression {
                injector_syntax::ast::Expression::Assignment(assign) => assign,
                _ => panic!("Expected assignment"),
            };
            assert_eq!(assign.left.as_identifier(), Some("_navigationService"));
            assert_eq!(assign.right.as_identifier(), Some("navigationService"));
        }
        other => panic!("Expected a single statement, got {other:?}"),
    }

    // The tree-level edit and the text edits describe the same result.
    let rebuilt = doc.unit.with_edit(&fix.edit).unwrap();
    let reparsed = doc.apply(&fix).unwrap().unit;
    let (_, rebuilt_type) = rebuilt.types().remove(0);
    let (_, reparsed_type) = reparsed.types().remove(0);
    assert_eq!(rebuilt_type.members.len(), reparsed_type.members.len());
}

#[test]
fn test_fix_extends_first_constructor() {
    let source = "class A
{
    private readonly IBar _bar;

    public A(IFoo foo, int count)
    {
        _foo = foo;
    }
}";
    let expected = "class A
{
    private readonly IBar _bar;

    public A(IFoo foo, int count, IBar bar)
    {
        _foo = foo;
        _bar = bar;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_extension_keeps_existing_statements_in_tree() {
    let source = "class A { readonly IBar _bar; public A(IFoo p1, int p2) { Init(); } }";
    let doc = document(source);
    let diags = diagnostics(&doc);
    let fix = Linter::new().fixes_for(&doc, &diags[0]).unwrap().unwrap();
    assert!(fix.needs_relayout);

    let ctor = match &fix.edit {
        NodeEdit::ReplaceConstructor { replacement, .. } => replacement,
        other => panic!("Expected constructor replacement, got {other:?}"),
    };
    let params: Vec<&str> = ctor.params.params.iter().map(|p| p.name.name.as_str()).collect();
    assert_eq!(params, vec!["p1", "p2", "bar"]);
    assert_eq!(ctor.statements().len(), 2);
    assert_eq!(ctor.statements()[0].span().slice(source), "Init();");
}

#[test]
fn test_fix_relayouts_single_line_constructor() {
    let source = "class A
{
    private readonly IBar _bar;
    public A(IFoo foo) : base(foo) { Init(); }
}";
    let expected = "class A
{
    private readonly IBar _bar;
    public A(IFoo foo, IBar bar) : base(foo)
    {
        Init();
        _bar = bar;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_relayouts_empty_constructor() {
    let source = "class A
{
    private readonly IBar _bar;

    public A()
    {
    }
}";
    let expected = "class A
{
    private readonly IBar _bar;

    public A(IBar bar)
    {
        _bar = bar;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_relayouts_expression_bodied_constructor() {
    let source = "class A
{
    private readonly IBar _bar;
    private readonly int _count;

    public A(int count) => _count = count;
}";
    let expected = "class A
{
    private readonly IBar _bar;
    private readonly int _count;

    public A(int count, IBar bar)
    {
        _count = count;
        _bar = bar;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_keeps_crlf_line_endings() {
    let source = "class A\r\n{\r\n    private readonly IFoo _foo;\r\n}\r\n";
    let expected = "class A\r\n{\r\n    private readonly IFoo _foo;\r\n\r\n    public A(IFoo foo)\r\n    {\r\n        _foo = foo;\r\n    }\r\n}\r\n";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_in_single_line_type() {
    let source = "class A { readonly IFoo _foo; }";
    let expected = "class A { readonly IFoo _foo;\n\n    public A(IFoo foo)\n    {\n        _foo = foo;\n    }\n}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_keeps_comments_and_other_members() {
    let source = "class A
{
    // the service
    private readonly IFoo _foo;

    /* helper */
    void Run() { _foo.Go(); }
}";
    let expected = "class A
{
    // the service
    private readonly IFoo _foo;

    /* helper */
    void Run() { _foo.Go(); }

    public A(IFoo foo)
    {
        _foo = foo;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_in_nested_type_targets_nested_type() {
    let source = "class Outer
{
    public Outer() { }

    class Inner
    {
        private readonly ILog _log;
    }
}";
    let expected = "class Outer
{
    public Outer() { }

    class Inner
    {
        private readonly ILog _log;

        public Inner(ILog log)
        {
            _log = log;
        }
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_generic_field_type() {
    let fixed = fix_single("class A\n{\n    private readonly ILogger<A> _logger;\n}");
    assert!(fixed.contains("public A(ILogger<A> logger)"));
}

#[test]
fn test_fix_keeps_comment_in_empty_constructor() {
    let source = "class A
{
    private readonly IFoo _foo;

    public A()
    {
        // TODO: wire
    }
}";
    let expected = "class A
{
    private readonly IFoo _foo;

    public A(IFoo foo)
    {
        // TODO: wire
        _foo = foo;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_keeps_comments_in_single_line_constructor() {
    let source = "class A
{
    private readonly IFoo _foo;
    public A() /* ctor */ { Init(); /* keep */ }
}";
    let expected = "class A
{
    private readonly IFoo _foo;
    public A(IFoo foo) /* ctor */
    {
        Init(); /* keep */
        _foo = foo;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_keeps_comment_in_expression_body() {
    let source = "class A
{
    private readonly IFoo _foo;
    public A() => Init() /* first */;
}";
    let expected = "class A
{
    private readonly IFoo _foo;
    public A(IFoo foo)
    {
        Init() /* first */;
        _foo = foo;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_keeps_trailing_comment_on_its_statement() {
    let source = "class A
{
    private readonly IFoo _foo;

    public A()
    {
        Init(); // after init
    }
}";
    let expected = "class A
{
    private readonly IFoo _foo;

    public A(IFoo foo)
    {
        Init(); // after init
        _foo = foo;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_appends_before_unclosed_block_comment() {
    let source = "class A
{
    private readonly IFoo _foo;

    public A()
    {
        Init(); /* runs
        first */
    }
}";
    let expected = "class A
{
    private readonly IFoo _foo;

    public A(IFoo foo)
    {
        Init();
        _foo = foo; /* runs
        first */
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_moves_closing_brace_below_new_statement() {
    let source = "class A
{
    private readonly IFoo _foo;

    public A()
    {
        Init(); }
}";
    let expected = "class A
{
    private readonly IFoo _foo;

    public A(IFoo foo)
    {
        Init();
        _foo = foo;
    }
}";
    assert_eq!(fix_single(source), expected);
}

#[test]
fn test_fix_parameter_keeps_declared_type_text() {
    let source = "namespace App.System
{
    class A
    {
        private readonly global::System.IDisposable _d;

        public A(IFoo foo)
        {
        }
    }
}";
    let fixed = fix_single(source);
    assert!(
        fixed.contains("public A(IFoo foo, global::System.IDisposable d)"),
        "got {fixed}"
    );
}

#[test]
fn test_fix_new_constructor_keeps_declared_type_text() {
    let fixed = fix_single("class A\n{\n    private readonly Dictionary<string,  List<int>> _map;\n}");
    assert!(
        fixed.contains("public A(Dictionary<string,  List<int>> map)"),
        "got {fixed}"
    );
}

// ============================================================================
// Fix all
// ============================================================================

#[test]
fn test_fix_all_converges() {
    let source = "class A
{
    private readonly IFoo _foo;
    private readonly IBar _bar;
    private readonly int _count;
}";
    let expected = "class A
{
    private readonly IFoo _foo;
    private readonly IBar _bar;
    private readonly int _count;

    public A(IFoo foo, IBar bar, int count)
    {
        _foo = foo;
        _bar = bar;
        _count = count;
    }
}";
    let linter = Linter::new();
    let outcome = linter.fix_all(document(source));
    assert_eq!(outcome.applied, 3);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.document.source, expected);
    assert!(diagnostics(&outcome.document).is_empty());
}

#[test]
fn test_fix_all_without_diagnostics_is_identity() {
    let source = "class A { public A(IFoo foo) { _foo = foo; } readonly IFoo _foo; }";
    let outcome = Linter::new().fix_all(document(source));
    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.document.source, source);
}

#[test]
fn test_fix_all_reports_unfixable_field() {
    // `_` leaves an empty parameter name, so the fixed text does not parse.
    let outcome = Linter::new().fix_all(document("class A\n{\n    private readonly int _;\n}"));
    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.failures.len(), 1);
}
