//! Collector configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::report_mode::ReportMode;
use crate::errors::{DepwatchError, DepwatchResult};

/// Environment variable naming the checkstyle report destination.
pub const CHECKSTYLE_ENV: &str = "DEPRECATIONS_CHECKSTYLE";
/// Environment variable selecting the report mode.
pub const MODE_ENV: &str = "DEPRECATIONS_MODE";

const DEFAULT_SKIP_PREFIXES: &[&str] = &["std::", "core::", "alloc::", "test::", "depwatch_analysis::"];
const DEFAULT_LEGACY_PREFIXES: &[&str] = &[
    "testLegacy",
    "provideLegacy",
    "getLegacy",
    "test_legacy",
    "provide_legacy",
    "get_legacy",
];

/// Configuration for the deprecation collector and its reports.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DepwatchConfig {
    /// Checkstyle report destination. None disables the structured report.
    pub checkstyle_path: Option<PathBuf>,
    /// "weak", "strict", or a maximum count. Default: "weak".
    pub mode: Option<String>,
    /// Call sites listed per message in the text summary. Default: 3.
    pub max_call_sites: Option<usize>,
    /// Class prefixes of frames skipped when locating the call site.
    pub skip_prefixes: Option<Vec<String>>,
    /// Method-name prefixes that mark a legacy test.
    pub legacy_prefixes: Option<Vec<String>>,
    /// Group metadata value that marks a legacy test. Default: "legacy".
    pub legacy_group: Option<String>,
    /// Print the per-group summary after the text summary. Default: false.
    pub verbose: Option<bool>,
    /// Include stack traces in the per-group summary. Default: false.
    pub show_traces: Option<bool>,
}

impl DepwatchConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> DepwatchResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> DepwatchResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            DepwatchError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loading depwatch config");
        Self::from_toml_str(&source)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay values from the process environment. Environment wins.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup. Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = lookup(CHECKSTYLE_ENV) {
            self.checkstyle_path = Some(PathBuf::from(path));
        }
        if let Some(mode) = lookup(MODE_ENV) {
            self.mode = Some(mode);
        }
        self
    }

    /// Returns the effective report mode, defaulting to weak.
    pub fn effective_mode(&self) -> DepwatchResult<ReportMode> {
        match self.mode.as_deref() {
            Some(mode) => mode.parse(),
            None => Ok(ReportMode::Weak),
        }
    }

    /// Returns the effective call-site limit, defaulting to 3.
    pub fn effective_max_call_sites(&self) -> usize {
        self.max_call_sites.unwrap_or(3)
    }

    pub fn effective_skip_prefixes(&self) -> Vec<String> {
        self.skip_prefixes
            .clone()
            .unwrap_or_else(|| DEFAULT_SKIP_PREFIXES.iter().map(|s| s.to_string()).collect())
    }

    pub fn effective_legacy_prefixes(&self) -> Vec<String> {
        self.legacy_prefixes
            .clone()
            .unwrap_or_else(|| DEFAULT_LEGACY_PREFIXES.iter().map(|s| s.to_string()).collect())
    }

    pub fn effective_legacy_group(&self) -> String {
        self.legacy_group.clone().unwrap_or_else(|| "legacy".to_string())
    }

    pub fn effective_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn effective_show_traces(&self) -> bool {
        self.show_traces.unwrap_or(false)
    }
}
