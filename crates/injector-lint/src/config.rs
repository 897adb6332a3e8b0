//! Lint configuration: per-rule severity overrides.

use std::collections::HashMap;

use crate::rule::{ParseSeverityError, Severity};

/// Configuration for the linter, loaded from `[lint]` in `injector.toml`.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    /// Per-rule severity overrides. Key = rule name (e.g. "InjectionAnalyzer").
    overrides: HashMap<String, Severity>,
}

impl LintConfig {
    /// Create a new empty config (all rules use their default severity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `rule = "severity"` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ParseSeverityError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut config = Self::new();
        for (rule, severity) in pairs {
            let severity: Severity = severity.as_ref().parse()?;
            config.overrides.insert(rule.into(), severity);
        }
        Ok(config)
    }

    /// Set the severity for a specific rule.
    pub fn set_severity(&mut self, rule_name: &str, severity: Severity) {
        self.overrides.insert(rule_name.to_string(), severity);
    }

    /// Get the effective severity for a rule, falling back to its default.
    pub fn effective_severity(&self, rule_name: &str, default: Severity) -> Severity {
        self.overrides.get(rule_name).copied().unwrap_or(default)
    }

    /// Check if a rule is explicitly disabled.
    pub fn is_disabled(&self, rule_name: &str) -> bool {
        self.overrides.get(rule_name) == Some(&Severity::Off)
    }

    /// Rule names with an override, sorted.
    pub fn overridden_rules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
