//! `injector.toml` loading.
//!
//! ```toml
//! [lint]
//! InjectionAnalyzer = "warn"   # off | info | warn | error
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use injector_lint::LintConfig;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "injector.toml";

/// Contents of `injector.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InjectorConfig {
    /// Rule name to severity.
    #[serde(default)]
    pub lint: BTreeMap<String, String>,
}

impl InjectorConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid {}", path.display()))
    }

    /// Severity overrides for the linter.
    pub fn lint_config(&self) -> anyhow::Result<LintConfig> {
        Ok(LintConfig::from_pairs(
            self.lint.iter().map(|(rule, severity)| (rule.as_str(), severity.as_str())),
        )?)
    }
}

/// Walk up from `start` to find `injector.toml`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Lint configuration for the current directory; defaults when there is no
/// `injector.toml` above it.
pub fn load_lint_config() -> anyhow::Result<LintConfig> {
    let cwd = std::env::current_dir()?;
    match find_config(&cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            InjectorConfig::from_file(&path)?.lint_config()
        }
        None => Ok(LintConfig::new()),
    }
}
