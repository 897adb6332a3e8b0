//! `injector lint`: report readonly fields that bypass constructor injection.

use std::path::PathBuf;

use injector_lint::report;
use injector_lint::{parse_error_diagnostics, Document, LintDiagnostic, Linter, Severity};
use serde::Serialize;
use termcolor::{ColorChoice, StandardStream};

use super::files::collect_source_files;
use crate::config::load_lint_config;
use crate::output::StyledOutput;
use crate::OutputFormat;

pub struct LintOptions {
    pub paths: Vec<String>,
    pub fix: bool,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

/// Totals over all linted files.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LintOutcome {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub fixable: usize,
    pub fixed_issues: usize,
    pub fixed_files: usize,
    /// Files that could not be read
    pub unreadable: usize,
}

impl LintOutcome {
    /// Whether the command exits with a failure status.
    pub fn failed(&self) -> bool {
        self.errors > 0 || self.unreadable > 0
    }

    fn count(&mut self, diagnostics: &[LintDiagnostic]) {
        for d in diagnostics {
            match d.severity {
                Severity::Error => self.errors += 1,
                Severity::Warn => self.warnings += 1,
                Severity::Info => self.infos += 1,
                Severity::Off => {}
            }
            if d.fixable {
                self.fixable += 1;
            }
        }
    }
}

pub fn execute(options: &LintOptions) -> anyhow::Result<LintOutcome> {
    // 1. Load lint config from injector.toml (if present)
    let linter = Linter::with_config(load_lint_config()?);

    // 2. Collect source files
    let source_files = collect_source_files(&options.paths)?;
    let mut outcome = LintOutcome {
        files: source_files.len(),
        ..LintOutcome::default()
    };
    if source_files.is_empty() {
        eprintln!("No .cs files found.");
        return Ok(outcome);
    }

    // 3. Lint each file
    let mut results = Vec::new();
    for path in source_files {
        let source = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                outcome.unreadable += 1;
                continue;
            }
        };
        let result = lint_file(&linter, path, source);
        outcome.count(&result.diagnostics);
        results.push(result);
    }

    // 4. Output diagnostics
    match options.format {
        OutputFormat::Json => println!("{}", render_json(&results)?),
        OutputFormat::Pretty => emit_pretty(&results, options.color)?,
    }

    // 5. Apply fixes
    let mut out = StyledOutput::new(options.color);
    if options.fix && outcome.fixable > 0 {
        let (fixed_issues, fixed_files) = apply_fixes(&linter, &results)?;
        outcome.fixed_issues = fixed_issues;
        outcome.fixed_files = fixed_files;
        if options.format == OutputFormat::Pretty {
            out.newline();
            out.success(&format!(
                "Fixed {} issue(s) in {} file(s).",
                fixed_issues, fixed_files
            ));
            out.newline();
        }
    } else if outcome.fixable > 0 && options.format == OutputFormat::Pretty {
        out.newline();
        out.info(&format!(
            "{} issue(s) are fixable. Run `injector lint --fix` to apply.",
            outcome.fixable
        ));
        out.newline();
    }

    // 6. Summary
    if options.format == OutputFormat::Pretty {
        print_summary(&mut out, &outcome);
    }

    Ok(outcome)
}

/// Diagnostics of one file, with its document unless it failed to lex.
pub struct FileLintResult {
    pub path: PathBuf,
    pub source: String,
    pub document: Option<Document>,
    pub diagnostics: Vec<LintDiagnostic>,
}

pub fn lint_file(linter: &Linter, path: PathBuf, source: String) -> FileLintResult {
    let path_str = path.display().to_string();
    match Document::parse(path_str, source.as_str()) {
        Ok(document) => {
            let diagnostics = linter.lint_document(&document).diagnostics;
            FileLintResult {
                path,
                source,
                document: Some(document),
                diagnostics,
            }
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "file does not lex");
            FileLintResult {
                path,
                source,
                document: None,
                diagnostics: parse_error_diagnostics(&err),
            }
        }
    }
}

// ── Pretty output (codespan bridge) ────────────────────────────────────────

fn emit_pretty(results: &[FileLintResult], color: ColorChoice) -> anyhow::Result<()> {
    let mut writer = StandardStream::stderr(color);
    for result in results.iter().filter(|r| !r.diagnostics.is_empty()) {
        report::emit(
            &mut writer,
            &result.path.display().to_string(),
            &result.source,
            &result.diagnostics,
        )?;
    }
    Ok(())
}

// ── JSON output ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    diagnostics: &'a [LintDiagnostic],
}

/// Files with diagnostics as a JSON array.
pub fn render_json(results: &[FileLintResult]) -> serde_json::Result<String> {
    let reports: Vec<FileReport<'_>> = results
        .iter()
        .filter(|r| !r.diagnostics.is_empty())
        .map(|r| FileReport {
            file: r.path.display().to_string(),
            diagnostics: &r.diagnostics,
        })
        .collect();
    serde_json::to_string_pretty(&reports)
}

// ── Fix application ────────────────────────────────────────────────────────

/// Fix every fixable diagnostic in place. Returns (issues fixed, files written).
fn apply_fixes(linter: &Linter, results: &[FileLintResult]) -> anyhow::Result<(usize, usize)> {
    let mut total_fixed = 0usize;
    let mut files_fixed = 0usize;

    for result in results {
        let Some(document) = &result.document else {
            continue;
        };
        if !result.diagnostics.iter().any(|d| d.fixable) {
            continue;
        }

        let fixed = linter.fix_all(document.clone());
        for failure in &fixed.failures {
            eprintln!(
                "{}:{}:{}: could not fix: {}",
                result.path.display(),
                failure.diagnostic.span.line,
                failure.diagnostic.span.column,
                failure.error
            );
        }
        if fixed.applied > 0 {
            std::fs::write(&result.path, &fixed.document.source)?;
            total_fixed += fixed.applied;
            files_fixed += 1;
        }
    }

    Ok((total_fixed, files_fixed))
}

// ── Colored summary ────────────────────────────────────────────────────────

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn print_summary(out: &mut StyledOutput, outcome: &LintOutcome) {
    out.newline();
    out.plain(&format!("Linted {} file{}", outcome.files, plural(outcome.files)));
    if outcome.errors == 0 && outcome.warnings == 0 && outcome.infos == 0 {
        out.plain(": ");
        out.success("no issues found.");
        out.newline();
        return;
    }

    out.plain(": ");
    let mut first = true;
    let mut separator = |out: &mut StyledOutput| {
        if !first {
            out.plain(", ");
        }
        first = false;
    };
    if outcome.errors > 0 {
        separator(out);
        out.error(&format!("{} error{}", outcome.errors, plural(outcome.errors)));
    }
    if outcome.warnings > 0 {
        separator(out);
        out.warning(&format!("{} warning{}", outcome.warnings, plural(outcome.warnings)));
    }
    if outcome.infos > 0 {
        separator(out);
        out.info(&format!("{} note{}", outcome.infos, plural(outcome.infos)));
    }
    out.plain(".");
    out.newline();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint(source: &str) -> FileLintResult {
        lint_file(&Linter::new(), PathBuf::from("Service.cs"), source.to_string())
    }

    #[test]
    fn test_lint_file_reports_field() {
        let result = lint("class A { private readonly IFoo _foo; }");
        assert!(result.document.is_some());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule, "InjectionAnalyzer");
    }

    #[test]
    fn test_lint_file_parse_error() {
        let result = lint("class A {");
        assert!(result.document.is_some());
        assert_eq!(result.diagnostics[0].code, "L0001");

        let mut outcome = LintOutcome::default();
        outcome.count(&result.diagnostics);
        assert!(outcome.failed());
    }

    #[test]
    fn test_lint_file_lex_error_has_no_document() {
        let result = lint("class A { int ` }");
        assert!(result.document.is_none());
        assert!(result.diagnostics[0].message.starts_with("Lex error: "));
    }

    #[test]
    fn test_lint_file_reports_rule_past_parse_error() {
        let result = lint("record R(int X);\nclass A { private readonly IFoo _foo; }");
        let codes: Vec<&str> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["L0001", "L3001"]);
    }

    #[test]
    fn test_info_diagnostics_do_not_fail() {
        let result = lint("class A { private readonly IFoo _foo; }");
        let mut outcome = LintOutcome::default();
        outcome.count(&result.diagnostics);
        assert_eq!(outcome.infos, 1);
        assert_eq!(outcome.fixable, 1);
        assert!(!outcome.failed());
    }

    #[test]
    fn test_render_json() {
        let results = vec![
            lint("class A { private readonly IFoo _foo; }"),
            lint("class B { }"),
        ];
        let json: serde_json::Value = serde_json::from_str(&render_json(&results).unwrap()).unwrap();
        let files = json.as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["file"], "Service.cs");

        let diag = &files[0]["diagnostics"][0];
        assert_eq!(diag["rule"], "InjectionAnalyzer");
        assert_eq!(diag["code"], "L3001");
        assert_eq!(diag["severity"], "info");
        assert_eq!(diag["fixable"], true);
        assert_eq!(
            diag["message"],
            "Readonly Field '_foo' is injected in none of the constructors."
        );
        assert_eq!(diag["span"]["line"], 1);
        assert_eq!(diag["span"]["column"], 33);
    }

    #[test]
    fn test_apply_fixes_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.cs");
        let source = "class A\n{\n    private readonly IFoo _foo;\n}\n";
        std::fs::write(&path, source).unwrap();

        let linter = Linter::new();
        let results = vec![lint_file(&linter, path.clone(), source.to_string())];
        let (issues, files) = apply_fixes(&linter, &results).unwrap();
        assert_eq!((issues, files), (1, 1));

        let fixed = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            fixed,
            "class A\n{\n    private readonly IFoo _foo;\n\n    public A(IFoo foo)\n    {\n        _foo = foo;\n    }\n}\n"
        );
    }

    #[test]
    fn test_apply_fixes_skips_unparsed_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken.cs");
        std::fs::write(&path, "class {").unwrap();

        let linter = Linter::new();
        let results = vec![lint_file(&linter, path.clone(), "class {".to_string())];
        assert_eq!(apply_fixes(&linter, &results).unwrap(), (0, 0));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class {");
    }
}
