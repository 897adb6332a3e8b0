//! `injector rules`: list the available lint rules.

use injector_lint::{Category, Linter, Severity};
use termcolor::ColorChoice;

use crate::config::load_lint_config;
use crate::output::StyledOutput;

pub fn execute(color: ColorChoice) -> anyhow::Result<()> {
    let linter = Linter::with_config(load_lint_config()?);
    let mut out = StyledOutput::new(color);

    for rule in linter.rules() {
        let meta = rule.meta();
        let severity = linter
            .config()
            .effective_severity(meta.name, meta.default_severity);

        out.bold(meta.code);
        out.plain(" ");
        out.plain(meta.name);
        out.plain(" ");
        write_severity(&mut out, severity);
        out.dim(&format!(" [{}]", category_label(meta.category)));
        if meta.fixable {
            out.success(" (fixable)");
        }
        out.newline();
        out.plain("    ");
        out.plain(meta.description);
        out.newline();
    }
    Ok(())
}

fn write_severity(out: &mut StyledOutput, severity: Severity) {
    match severity {
        Severity::Error => out.error(severity.as_str()),
        Severity::Warn => out.warning(severity.as_str()),
        Severity::Info => out.info(severity.as_str()),
        Severity::Off => out.dim(severity.as_str()),
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Correctness => "correctness",
        Category::Style => "style",
        Category::BestPractice => "best-practice",
    }
}
