//! Constructor assignment scan.

use injector_syntax::ast::visitor::{walk_assignment, walk_expression};
use injector_syntax::ast::{AssignmentExpression, AssignmentOperator, ConstructorDecl, Expression, Visitor};

/// True when any of `constructors` assigns `field_name` with a simple `=`
/// whose left side is the bare identifier.
///
/// The whole body is searched: nested blocks, loops, `try`, lambdas and
/// expression bodies. `this._x = x` and compound assignments do not count.
pub fn has_assignment<'a>(
    constructors: impl IntoIterator<Item = &'a ConstructorDecl>,
    field_name: &str,
) -> bool {
    constructors
        .into_iter()
        .any(|ctor| constructor_assigns(ctor, field_name))
}

/// True when the body of `ctor` assigns `field_name`.
pub fn constructor_assigns(ctor: &ConstructorDecl, field_name: &str) -> bool {
    let mut finder = AssignmentFinder {
        target: field_name,
        found: false,
    };
    finder.visit_function_body(&ctor.body);
    finder.found
}

struct AssignmentFinder<'a> {
    target: &'a str,
    found: bool,
}

impl Visitor for AssignmentFinder<'_> {
    fn visit_expression(&mut self, expr: &Expression) {
        if !self.found {
            walk_expression(self, expr);
        }
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpression) {
        if expr.operator == AssignmentOperator::Assign && expr.left.as_identifier() == Some(self.target) {
            self.found = true;
            return;
        }
        walk_assignment(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use injector_syntax::parse_source;

    fn assigns(members: &str, field: &str) -> bool {
        let source = format!("class A {{ {members} }}");
        let unit = parse_source(&source).unwrap();
        let (_, decl) = unit.types().remove(0);
        has_assignment(decl.constructors(), field)
    }

    #[test]
    fn test_direct_assignment() {
        assert!(assigns("public A(int x) { _x = x; }", "_x"));
        assert!(!assigns("public A(int x) { _y = x; }", "_x"));
    }

    #[test]
    fn test_assignment_at_depth() {
        assert!(assigns("public A(bool b) { if (b) { try { _x = 1; } catch { } } }", "_x"));
        assert!(assigns("public A() { foreach (var i in items) { while (i) { _x = i; } } }", "_x"));
        assert!(assigns("public A() { Run(() => { _x = 2; }); }", "_x"));
        assert!(assigns("public A() { var y = _x = 3; }", "_x"));
    }

    #[test]
    fn test_expression_bodied_constructor() {
        assert!(assigns("public A(int x) => _x = x;", "_x"));
    }

    #[test]
    fn test_any_constructor_counts() {
        assert!(assigns("public A() { } public A(int x) { _x = x; }", "_x"));
    }

    #[test]
    fn test_non_matching_forms() {
        assert!(!assigns("public A(int x) { this._x = x; }", "_x"));
        assert!(!assigns("public A(int x) { _x += x; }", "_x"));
        assert!(!assigns("public A(int x) { _x ??= x; }", "_x"));
        assert!(!assigns("public A(int x) { Use(_x); }", "_x"));
        assert!(!assigns("public A(int x) { _xy = x; }", "_x"));
    }

    #[test]
    fn test_static_constructor_is_not_scanned() {
        assert!(!assigns("static A() { _x = 1; }", "_x"));
    }

    #[test]
    fn test_no_constructors() {
        assert!(!assigns("void M() { _x = 1; }", "_x"));
    }
}
