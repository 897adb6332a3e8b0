//! Lint rule trait and supporting types.
//!
//! Each lint rule implements `LintRule` and provides metadata (`RuleMeta`),
//! a `check_type` method that inspects type declarations, and optionally a
//! `fix` method that turns one of its diagnostics into a code fix.

use std::fmt;
use std::str::FromStr;

use injector_syntax::ast::{NodePath, TypeDecl};
use injector_syntax::Span;
use serde::Serialize;

use crate::document::Document;
use crate::edit::{CodeFix, FixError};

/// Severity level for a lint diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Advisory finding (never affects exit code).
    Info,
    /// Reports as a warning (does not affect exit code).
    Warn,
    /// Reports as an error (causes non-zero exit code).
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown severity name in configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected off, info, warn or error)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "allow" => Ok(Severity::Off),
            "info" | "note" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" | "deny" => Ok(Severity::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Category of a lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Likely bugs or logic errors.
    Correctness,
    /// Naming and formatting conventions.
    Style,
    /// Language idioms and recommended patterns.
    BestPractice,
}

/// Static metadata for a lint rule.
#[derive(Debug)]
pub struct RuleMeta {
    /// Rule name, e.g. "InjectionAnalyzer".
    pub name: &'static str,
    /// Lint code, e.g. "L3001".
    pub code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Category.
    pub category: Category,
    /// Default severity when no config override is set.
    pub default_severity: Severity,
    /// Whether the rule can provide code fixes.
    pub fixable: bool,
}

/// Context passed to each rule during lint checking.
pub struct LintContext<'a> {
    /// The original source code.
    pub source: &'a str,
    /// Path of the file being linted.
    pub file_path: &'a str,
}

/// A single lint diagnostic emitted by a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintDiagnostic {
    /// Rule name (e.g. "InjectionAnalyzer").
    pub rule: &'static str,
    /// Lint code (e.g. "L3001").
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Source location.
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Whether the emitting rule offers a fix for it.
    pub fixable: bool,
    /// Additional notes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Trait that every lint rule must implement.
///
/// Rules receive type declarations together with their path in the
/// compilation unit and return diagnostics. Default implementations return
/// nothing, so rules only override what is relevant to them.
pub trait LintRule: Send + Sync {
    /// Static metadata for this rule.
    fn meta(&self) -> &RuleMeta;

    /// Check one type declaration. Nested types are dispatched separately.
    fn check_type(
        &self,
        _decl: &TypeDecl,
        _path: &NodePath,
        _ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        vec![]
    }

    /// Build the fix for one of this rule's diagnostics on `document`.
    ///
    /// `Ok(None)` means the rule has no fix for it.
    fn fix(
        &self,
        _document: &Document,
        _diagnostic: &LintDiagnostic,
    ) -> Result<Option<CodeFix>, FixError> {
        Ok(None)
    }
}
