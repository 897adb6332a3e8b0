//! Tests for statement and expression parsing inside member bodies

use injector_syntax::ast::visitor::walk_assignment;
use injector_syntax::ast::*;
use injector_syntax::parse_source;

/// Parse `body` as the block of a constructor and return its statements.
fn body(body: &str) -> Vec<Statement> {
    let source = format!("class A {{ public A() {{ {body} }} }}");
    let unit = match parse_source(&source) {
        Ok(unit) => unit,
        Err(err) => panic!("parse failed for {body:?}: {:?}", err.diagnostics()),
    };
    let (_, decl) = unit.types().remove(0);
    let statements = decl.constructors().next().unwrap().statements().to_vec();
    statements
}

/// Collects the left-hand side text of every assignment.
#[derive(Default)]
struct AssignmentCollector {
    targets: Vec<String>,
}

impl Visitor for AssignmentCollector {
    fn visit_assignment(&mut self, assign: &AssignmentExpression) {
        let target = match assign.left.as_ref() {
            Expression::Identifier(id) => id.name.clone(),
            Expression::Member(member) => format!(".{}", member.name.name),
            _ => "?".to_string(),
        };
        self.targets.push(format!("{target} {}", assign.operator.symbol()));
        walk_assignment(self, assign);
    }
}

fn assignments(source: &str) -> Vec<String> {
    let mut collector = AssignmentCollector::default();
    for stmt in body(source) {
        collector.visit_statement(&stmt);
    }
    collector.targets
}

#[test]
fn test_local_declarations() {
    let stmts = body("var a = 1; int b, c = 2; List<string> names = new List<string>(); const int K = 3;");
    assert_eq!(stmts.len(), 4);
    match &stmts[1] {
        Statement::LocalDecl(decl) => {
            assert_eq!(decl.variables.len(), 2);
            assert_eq!(decl.ty.to_string(), "int");
        }
        _ => panic!("Expected local declaration"),
    }
    match &stmts[3] {
        Statement::LocalDecl(decl) => assert!(decl.is_const),
        _ => panic!("Expected const declaration"),
    }
}

#[test]
fn test_control_flow_statements() {
    let stmts = body(
        "if (a) { b(); } else if (c) d(); else { }
         while (x > 0) x--;
         do { x++; } while (x < 10);
         for (int i = 0; i < n; i++) { }
         for (;;) break;
         foreach (var item in items) { continue; }
         return;",
    );
    assert!(matches!(stmts[0], Statement::If(_)));
    assert!(matches!(stmts[1], Statement::While(_)));
    assert!(matches!(stmts[2], Statement::DoWhile(_)));
    match &stmts[3] {
        Statement::For(stmt) => {
            assert!(matches!(stmt.init, Some(ForInit::Declaration(_))));
            assert!(stmt.condition.is_some());
            assert_eq!(stmt.update.len(), 1);
        }
        _ => panic!("Expected for"),
    }
    match &stmts[4] {
        Statement::For(stmt) => {
            assert!(stmt.init.is_none());
            assert!(stmt.condition.is_none());
        }
        _ => panic!("Expected for"),
    }
    assert!(matches!(stmts[5], Statement::Foreach(_)));
    assert!(matches!(stmts[6], Statement::Return(_)));
}

#[test]
fn test_switch_lock_using_try() {
    let stmts = body(
        "switch (mode) { case Mode.A: case Mode.B: run(); break; case Circle c when c.R > 0: break; default: throw new InvalidOperationException(); }
         lock (_sync) { _count++; }
         using (var scope = factory.CreateScope()) { }
         using var stream = File.OpenRead(path);
         try { work(); } catch (IOException ex) when (ex.HResult == 1) { } catch { throw; } finally { done(); }",
    );
    match &stmts[0] {
        Statement::Switch(stmt) => {
            assert_eq!(stmt.sections.len(), 3);
            assert_eq!(stmt.sections[0].labels.len(), 2);
            assert_eq!(stmt.sections[0].statements.len(), 2);
            assert!(matches!(stmt.sections[2].labels[0], SwitchLabel::Default(_)));
        }
        _ => panic!("Expected switch"),
    }
    assert!(matches!(stmts[1], Statement::Lock(_)));
    match &stmts[2] {
        Statement::Using(stmt) => assert!(stmt.body.is_some()),
        _ => panic!("Expected using statement"),
    }
    match &stmts[3] {
        Statement::Using(stmt) => assert!(stmt.body.is_none()),
        _ => panic!("Expected using declaration"),
    }
    match &stmts[4] {
        Statement::Try(stmt) => {
            assert_eq!(stmt.catches.len(), 2);
            assert!(stmt.catches[0].filter.is_some());
            assert!(stmt.catches[1].ty.is_none());
            assert!(stmt.finally.is_some());
        }
        _ => panic!("Expected try"),
    }
}

#[test]
fn test_assignments_found_at_any_depth() {
    let found = assignments(
        "_a = a;
         if (ok) { _b = b; } else { while (true) { _c = c; } }
         Action f = () => { _d = d; };
         items.ForEach(x => _e = x);
         this._f = f;
         _g += g;
         _h ??= h;",
    );
    assert_eq!(
        found,
        vec!["_a =", "_b =", "_c =", "_d =", "_e =", "._f =", "_g +=", "_h ??="]
    );
}

#[test]
fn test_chained_and_nested_assignments() {
    let found = assignments("_a = _b = value; var x = (_c = 1) + 2;");
    assert_eq!(found, vec!["_a =", "_b =", "_c ="]);
}

#[test]
fn test_assignments_in_initializers_and_arguments() {
    let found = assignments(
        "var o = new Options { Name = name, Inner = { Level = 1 } };
         Register(handler: () => _x = x);",
    );
    assert_eq!(found, vec!["Name =", "Inner =", "Level =", "_x ="]);
}

#[test]
fn test_expressions_commonly_found_in_constructors() {
    let stmts = body(
        "_logger = logger ?? throw new ArgumentNullException(nameof(logger));
         _items = new List<Item>(capacity);
         _map = new Dictionary<string, int> { { \"a\", 1 } };",
    );
    assert_eq!(stmts.len(), 3);
    assert!(matches!(stmts[0], Statement::Expression(_)));
}

#[test]
fn test_casts_generics_and_patterns() {
    body(
        "var svc = (IService)provider.GetService(typeof(IService));
         var typed = provider.GetRequiredService<ILogger<A>>();
         if (value is string s && s.Length > 0) { }
         if (value is not null) { }
         var masked = (flags >> 2) & 0xFF;
         var ok = count < max && other > min;
         var cond = flag ? a : b;
         var elem = arr[0]?.Name;
         var nf = maybe!.Value;
         await Task.Delay(10);",
    );
}

#[test]
fn test_empty_statements() {
    let stmts = body(";;");
    assert_eq!(stmts.len(), 2);
    assert!(matches!(stmts[0], Statement::Empty(_)));
}

#[test]
fn test_statement_errors_are_reported() {
    let source = "class A { public A() { _x = ; } }";
    let err = parse_source(source).unwrap_err();
    assert!(!err.diagnostics().is_empty());
}

#[test]
fn test_deep_nesting_is_rejected_not_overflowing() {
    let mut expr = String::from("x");
    for _ in 0..200 {
        expr = format!("({expr})");
    }
    let source = format!("class A {{ public A() {{ _x = {expr}; }} }}");
    assert!(parse_source(&source).is_err());
}
