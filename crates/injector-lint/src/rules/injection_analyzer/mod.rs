//! Rule: InjectionAnalyzer (L3001)
//!
//! Reports readonly instance fields that none of the constructors of their
//! declaring type assign, and fixes them by injecting the value through the
//! first constructor (or a new one).
//!
//! ```text
//! class TypeName
//! {
//!     private readonly string _navigationService;   // reported
//! }
//! ```
//!
//! Only a plain `=` to the bare field name counts as an assignment. Static
//! constructors are not instance constructors and are ignored. A type with a
//! constructor that did not parse in full is skipped.

mod classify;
mod fix;
mod scan;

pub use classify::{classify, FieldEntity};
pub use fix::{build_fix, parameter_name, FIX_TITLE};
pub use scan::{constructor_assigns, has_assignment};

use injector_syntax::ast::{CompilationUnit, NodePath, TypeDecl};

use crate::document::Document;
use crate::edit::{CodeFix, FixError};
use crate::rule::*;

pub struct InjectionAnalyzer;

static META: RuleMeta = RuleMeta {
    name: "InjectionAnalyzer",
    code: "L3001",
    description: "Readonly fields should be assigned from a constructor parameter",
    category: Category::BestPractice,
    default_severity: Severity::Info,
    fixable: true,
};

impl LintRule for InjectionAnalyzer {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn check_type(
        &self,
        decl: &TypeDecl,
        _path: &NodePath,
        _ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        analyze(decl)
    }

    fn fix(&self, document: &Document, diagnostic: &LintDiagnostic) -> Result<Option<CodeFix>, FixError> {
        if diagnostic.rule != META.name {
            return Ok(None);
        }
        let field = document
            .find_field_at(diagnostic.span.start)
            .ok_or(FixError::NoFieldAtSpan {
                offset: diagnostic.span.start,
            })?;
        build_fix(document, &field).map(Some)
    }
}

/// One diagnostic per eligible field of `decl` that no instance constructor
/// assigns, in field declaration order.
pub fn analyze(decl: &TypeDecl) -> Vec<LintDiagnostic> {
    if decl.has_unparsed_constructor {
        return Vec::new();
    }
    decl.fields()
        .filter_map(classify)
        .filter(|field| !has_assignment(decl.constructors(), &field.name.name))
        .map(|field| LintDiagnostic {
            rule: META.name,
            code: META.code,
            message: format!(
                "Readonly Field '{}' is injected in none of the constructors.",
                field.name.name
            ),
            span: field.name.span,
            severity: META.default_severity,
            fixable: META.fixable,
            notes: vec![],
        })
        .collect()
}

/// [`analyze`] over every type of `unit`, in source pre-order.
pub fn analyze_unit(unit: &CompilationUnit) -> Vec<LintDiagnostic> {
    unit.types()
        .into_iter()
        .flat_map(|(_, decl)| analyze(decl))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::Linter;
    use crate::rule::Severity;

    fn lint(source: &str) -> Vec<crate::rule::LintDiagnostic> {
        let linter = Linter::new();
        let result = linter.lint_source(source, "test.cs");
        result
            .diagnostics
            .into_iter()
            .filter(|d| d.rule == "InjectionAnalyzer")
            .collect()
    }

    fn has_rule(source: &str) -> bool {
        !lint(source).is_empty()
    }

    #[test]
    fn test_flags_field_without_constructor() {
        let diags = lint("class A { private readonly IFoo _foo; }");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Readonly Field '_foo' is injected in none of the constructors.");
        assert_eq!(diags[0].severity, Severity::Info);
        assert_eq!(diags[0].code, "L3001");
        assert!(diags[0].fixable);
    }

    #[test]
    fn test_flags_field_no_constructor_assigns() {
        assert!(has_rule("class A { readonly IFoo _foo; public A() { } public A(int x) { } }"));
    }

    #[test]
    fn test_allows_field_assigned_in_one_constructor() {
        assert!(!has_rule(
            "class A { readonly IFoo _foo; public A() { } public A(IFoo foo) { _foo = foo; } }"
        ));
    }

    #[test]
    fn test_allows_non_readonly_and_static_fields() {
        assert!(!has_rule("class A { private IFoo _foo; }"));
        assert!(!has_rule("class A { private static readonly IFoo _foo; }"));
        assert!(!has_rule("class A { private readonly string a, b; }"));
        assert!(!has_rule("class A { private const int Max = 2; }"));
    }

    #[test]
    fn test_static_constructor_assignment_does_not_count() {
        assert!(has_rule("class A { readonly int _x; static A() { _x = 1; } }"));
    }

    #[test]
    fn test_this_qualified_assignment_does_not_count() {
        assert!(has_rule("class A { readonly int _x; public A(int x) { this._x = x; } }"));
    }

    #[test]
    fn test_fields_reported_in_declaration_order() {
        let diags = lint("class A { readonly int _b; readonly int _a; int _c; readonly int _d; }");
        let names: Vec<&str> = diags.iter().map(|d| d.message.split('\'').nth(1).unwrap()).collect();
        assert_eq!(names, vec!["_b", "_a", "_d"]);
    }

    #[test]
    fn test_nested_type_fields_are_checked_against_their_own_constructors() {
        let diags = lint(
            "class Outer { readonly int _x; public Outer() { _x = 1; } \
             class Inner { readonly int _x; } }",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span.column, 86);
    }
}
