//! Lint runner: single-pass AST visitor that dispatches to all enabled rules.

use injector_syntax::ast::{CompilationUnit, Member, NamespaceDecl, NamespaceMember, NodePath, TypeDecl, Visitor};

use crate::rule::{LintContext, LintDiagnostic, LintRule};

/// Runs all enabled lint rules over a compilation unit in a single traversal.
///
/// Every type declaration, including types nested in other types and types
/// inside namespaces, is handed to each rule together with its [`NodePath`].
pub struct LintRunner<'a> {
    rules: Vec<&'a dyn LintRule>,
    ctx: LintContext<'a>,
    steps: Vec<usize>,
    diagnostics: Vec<LintDiagnostic>,
}

impl<'a> LintRunner<'a> {
    /// Create a new runner with the given rules and context.
    pub fn new(rules: Vec<&'a dyn LintRule>, ctx: LintContext<'a>) -> Self {
        Self {
            rules,
            ctx,
            steps: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run all rules over the unit and return collected diagnostics.
    pub fn run(mut self, unit: &CompilationUnit) -> Vec<LintDiagnostic> {
        self.visit_compilation_unit(unit);
        self.diagnostics
    }

    fn walk_namespace_members(&mut self, members: &[NamespaceMember]) {
        for (i, member) in members.iter().enumerate() {
            self.steps.push(i);
            match member {
                NamespaceMember::Namespace(ns) => self.visit_namespace(ns),
                NamespaceMember::Type(decl) => self.visit_type_decl(decl),
            }
            self.steps.pop();
        }
    }
}

impl Visitor for LintRunner<'_> {
    fn visit_compilation_unit(&mut self, unit: &CompilationUnit) {
        self.walk_namespace_members(&unit.members);
    }

    fn visit_namespace(&mut self, ns: &NamespaceDecl) {
        self.walk_namespace_members(&ns.members);
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl) {
        let path = NodePath::new(self.steps.clone());
        for rule in &self.rules {
            self.diagnostics.extend(rule.check_type(decl, &path, &self.ctx));
        }

        // Rules only look at type declarations; bodies are not walked.
        for (i, member) in decl.members.iter().enumerate() {
            if let Member::Type(inner) = member {
                self.steps.push(i);
                self.visit_type_decl(inner);
                self.steps.pop();
            }
        }
    }
}
