//! Terminal rendering of lint diagnostics through codespan-reporting.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity as CsSeverity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::WriteColor;

use crate::rule::{LintDiagnostic, Severity};

/// Codespan severity for a lint severity; `None` for [`Severity::Off`].
pub fn codespan_severity(severity: Severity) -> Option<CsSeverity> {
    match severity {
        Severity::Off => None,
        Severity::Info => Some(CsSeverity::Note),
        Severity::Warn => Some(CsSeverity::Warning),
        Severity::Error => Some(CsSeverity::Error),
    }
}

/// Convert a lint diagnostic into a codespan diagnostic for `file_id`.
///
/// `source_len` clamps the label so a span at end of input still renders.
pub fn to_codespan(diag: &LintDiagnostic, file_id: usize, source_len: usize) -> Option<CsDiagnostic<usize>> {
    let severity = codespan_severity(diag.severity)?;
    let start = diag.span.start.min(source_len);
    let end = diag.span.end.clamp(start, source_len);
    let label = Label::primary(file_id, start..end).with_message(diag.rule);
    Some(
        CsDiagnostic::new(severity)
            .with_code(diag.code)
            .with_message(&diag.message)
            .with_labels(vec![label])
            .with_notes(diag.notes.clone()),
    )
}

/// Write `diagnostics` for one file to `writer`.
pub fn emit(
    writer: &mut dyn WriteColor,
    file_path: &str,
    source: &str,
    diagnostics: &[LintDiagnostic],
) -> Result<(), codespan_reporting::files::Error> {
    let mut files = SimpleFiles::new();
    let file_id = files.add(file_path.to_string(), source.to_string());
    let config = term::Config::default();
    for diag in diagnostics {
        if let Some(cs) = to_codespan(diag, file_id, source.len()) {
            term::emit(writer, &config, &files, &cs)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codespan_reporting::term::termcolor::NoColor;
    use injector_syntax::Span;

    fn diagnostic(severity: Severity, span: Span) -> LintDiagnostic {
        LintDiagnostic {
            rule: "InjectionAnalyzer",
            code: "L3001",
            message: "Readonly Field '_x' is injected in none of the constructors.".to_string(),
            span,
            severity,
            fixable: true,
            notes: vec![],
        }
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(codespan_severity(Severity::Info), Some(CsSeverity::Note));
        assert_eq!(codespan_severity(Severity::Warn), Some(CsSeverity::Warning));
        assert_eq!(codespan_severity(Severity::Error), Some(CsSeverity::Error));
        assert_eq!(codespan_severity(Severity::Off), None);
    }

    #[test]
    fn test_label_is_clamped_to_source() {
        let diag = diagnostic(Severity::Info, Span::new(40, 50, 3, 1));
        let cs = to_codespan(&diag, 0, 45).unwrap();
        assert_eq!(cs.labels[0].range, 40..45);
    }

    #[test]
    fn test_emit_plain_text() {
        let source = "class A\n{\n    readonly int _x;\n}\n";
        let start = source.find("_x").unwrap();
        let diag = diagnostic(Severity::Info, Span::new(start, start + 2, 3, 18));

        let mut out = NoColor::new(Vec::new());
        emit(&mut out, "a.cs", source, &[diag]).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("note[L3001]: Readonly Field '_x' is injected in none of the constructors."));
        assert!(text.contains("a.cs:3:18"));
    }

    #[test]
    fn test_off_diagnostics_are_not_emitted() {
        let mut out = NoColor::new(Vec::new());
        emit(&mut out, "a.cs", "class A { }", &[diagnostic(Severity::Off, Span::new(0, 5, 1, 1))]).unwrap();
        assert!(out.into_inner().is_empty());
    }
}
