//! Injector linter
//!
//! AST-based lint analysis for C# source files, with code fixes. The one rule
//! shipped today, [`InjectionAnalyzer`](rules::injection_analyzer), reports
//! readonly fields that no constructor assigns and injects them through a
//! constructor parameter.
//!
//! # Architecture
//!
//! - Each rule implements [`LintRule`] and checks type declarations.
//! - The [`LintRunner`](runner::LintRunner) walks the tree once and
//!   dispatches every type, nested ones included, to all enabled rules.
//! - A rule's fix is a single [`NodeEdit`] rendered into [`TextEdit`]s
//!   against the document text ([`render`]).
//! - [`Linter`] is the public entry point: create one, then call
//!   [`lint_source`](Linter::lint_source), [`lint_document`](Linter::lint_document),
//!   [`fixes_for`](Linter::fixes_for) or [`fix_all`](Linter::fix_all).
//!
//! # Example
//!
//! ```ignore
//! use injector_lint::Linter;
//!
//! let linter = Linter::new();
//! let result = linter.lint_source("class A { readonly IFoo _foo; }", "a.cs");
//! for d in &result.diagnostics {
//!     println!("[{}] {}: {}", d.code, d.rule, d.message);
//! }
//! ```

pub mod config;
pub mod document;
pub mod edit;
pub mod render;
pub mod report;
pub mod rule;
pub mod rules;
mod runner;

pub use config::LintConfig;
pub use document::{Document, FieldRef};
pub use edit::{apply_text_edits, CodeFix, FixError, NodeEdit, TextEdit};
pub use rule::{Category, LintContext, LintDiagnostic, LintRule, ParseSeverityError, RuleMeta, Severity};

use injector_syntax::{Span, SyntaxError};
use runner::LintRunner;

/// Upper bound on fix rounds in [`Linter::fix_all`].
pub const MAX_FIX_ROUNDS: usize = 64;

/// Result of linting a single file.
#[derive(Debug)]
pub struct LintResult {
    /// All diagnostics emitted for this file.
    pub diagnostics: Vec<LintDiagnostic>,
    /// File path that was linted.
    pub file_path: String,
    /// Number of diagnostics that have a code fix.
    pub fixable_count: usize,
}

impl LintResult {
    /// True when any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

/// A fixable diagnostic whose fix could not be built or applied.
#[derive(Debug)]
pub struct FixFailure {
    pub diagnostic: LintDiagnostic,
    pub error: FixError,
}

/// Outcome of [`Linter::fix_all`].
#[derive(Debug)]
pub struct FixAllOutcome {
    /// The document after all applied fixes.
    pub document: Document,
    /// Number of fixes applied.
    pub applied: usize,
    /// Fixes that failed in the last round.
    pub failures: Vec<FixFailure>,
}

/// The injector linter. Holds a set of enabled rules and configuration.
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    /// Create a linter with all default rules and default severities.
    pub fn new() -> Self {
        Self {
            rules: rules::all_rules(),
            config: LintConfig::new(),
        }
    }

    /// Create a linter with configuration overrides.
    pub fn with_config(config: LintConfig) -> Self {
        Self {
            rules: rules::all_rules(),
            config,
        }
    }

    /// All registered rules, enabled or not.
    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lint a parsed document.
    ///
    /// Rules see the tree recovered around parse errors; each parse error is
    /// reported as an `L0001` diagnostic ahead of the rule diagnostics.
    pub fn lint_document(&self, document: &Document) -> LintResult {
        // Filter out disabled rules.
        let active_rules: Vec<&dyn LintRule> = self
            .rules()
            .filter(|r| !self.config.is_disabled(r.meta().name))
            .collect();

        let ctx = LintContext {
            source: &document.source,
            file_path: &document.path,
        };

        let runner = LintRunner::new(active_rules, ctx);
        let mut rule_diagnostics = runner.run(&document.unit);

        // Apply severity overrides and drop what ends up off.
        rule_diagnostics.retain_mut(|d| {
            let eff = self.config.effective_severity(d.rule, d.severity);
            if eff == Severity::Off {
                return false;
            }
            d.severity = eff;
            true
        });

        let mut diagnostics: Vec<LintDiagnostic> = document
            .parse_errors
            .iter()
            .map(|e| syntax_diagnostic("Parse error", e.span, &e.message))
            .collect();
        diagnostics.extend(rule_diagnostics);

        let fixable_count = diagnostics.iter().filter(|d| d.fixable).count();
        tracing::debug!(
            path = %document.path,
            diagnostics = diagnostics.len(),
            fixable = fixable_count,
            "linted document"
        );

        LintResult {
            diagnostics,
            file_path: document.path.clone(),
            fixable_count,
        }
    }

    /// Convenience: parse source code and lint it.
    ///
    /// Lex errors are converted to lint diagnostics so the caller gets a
    /// uniform result.
    pub fn lint_source(&self, source: &str, file_path: &str) -> LintResult {
        match Document::parse(file_path, source) {
            Ok(document) => self.lint_document(&document),
            Err(err) => LintResult {
                diagnostics: parse_error_diagnostics(&err),
                file_path: file_path.to_string(),
                fixable_count: 0,
            },
        }
    }

    /// The fix the emitting rule offers for `diagnostic`, if any.
    pub fn fixes_for(
        &self,
        document: &Document,
        diagnostic: &LintDiagnostic,
    ) -> Result<Option<CodeFix>, FixError> {
        match self.rules().find(|r| r.meta().name == diagnostic.rule) {
            Some(rule) if diagnostic.fixable => rule.fix(document, diagnostic),
            _ => Ok(None),
        }
    }

    /// Apply fixes until no fixable diagnostic is left.
    ///
    /// Each round lints the current document and applies the first fix that
    /// succeeds; the document is re-parsed in between. Stops when a round
    /// applies nothing or after [`MAX_FIX_ROUNDS`] rounds.
    pub fn fix_all(&self, document: Document) -> FixAllOutcome {
        let mut document = document;
        let mut applied = 0;

        for _ in 0..MAX_FIX_ROUNDS {
            let result = self.lint_document(&document);
            let mut failures = Vec::new();
            let mut next = None;

            for diagnostic in result.diagnostics.into_iter().filter(|d| d.fixable) {
                let attempt = self
                    .fixes_for(&document, &diagnostic)
                    .and_then(|fix| fix.map(|fix| document.apply(&fix)).transpose());
                match attempt {
                    Ok(Some(fixed)) => {
                        next = Some(fixed);
                        break;
                    }
                    Ok(None) => {}
                    Err(error) => {
                        tracing::warn!(
                            path = %document.path,
                            rule = diagnostic.rule,
                            error = %error,
                            "code fix failed"
                        );
                        failures.push(FixFailure { diagnostic, error });
                    }
                }
            }

            match next {
                Some(fixed) => {
                    document = fixed;
                    applied += 1;
                }
                None => {
                    return FixAllOutcome {
                        document,
                        applied,
                        failures,
                    }
                }
            }
        }

        tracing::warn!(path = %document.path, rounds = MAX_FIX_ROUNDS, "fix limit reached");
        FixAllOutcome {
            document,
            applied,
            failures: Vec::new(),
        }
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lex and parse errors as `parse-error` (L0001) diagnostics.
pub fn parse_error_diagnostics(err: &SyntaxError) -> Vec<LintDiagnostic> {
    let prefix = match err {
        SyntaxError::Lex(_) => "Lex error",
        SyntaxError::Parse(_) => "Parse error",
    };
    err.diagnostics()
        .into_iter()
        .map(|(span, message)| syntax_diagnostic(prefix, span, &message))
        .collect()
}

fn syntax_diagnostic(prefix: &str, span: Span, message: &str) -> LintDiagnostic {
    LintDiagnostic {
        rule: "parse-error",
        code: "L0001",
        message: format!("{}: {}", prefix, message),
        span,
        severity: Severity::Error,
        fixable: false,
        notes: vec![],
    }
}
