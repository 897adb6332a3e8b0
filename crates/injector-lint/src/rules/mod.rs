//! Rule registry: all available lint rules.

pub mod injection_analyzer;

use crate::rule::LintRule;

/// Returns all available lint rules with their default configuration.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        // Best Practice
        Box::new(injection_analyzer::InjectionAnalyzer),
    ]
}
