//! Config schema and deserialization

use serde::Deserialize;
use std::path::Path;

/// Filename suffixes treated as scripts when no `scriptPatterns` are configured
pub const DEFAULT_SCRIPT_PATTERNS: &[&str] = &[".script.md", ".script.txt", ".script"];

/// Per-path override configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Optional maximum grade for matched files
    #[serde(default)]
    pub max_grade: Option<f64>,
}

/// Root config structure for .scriptgraderc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Maximum average grade (exit 1 if a script is above it)
    #[serde(default)]
    pub max_grade: Option<f64>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Custom script file suffixes (default: .script.md, .script.txt, .script)
    #[serde(default)]
    pub script_patterns: Vec<String>,

    /// Per-path configuration overrides
    #[serde(default)]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_max_grade: Option<f64>) -> Self {
        if cli_max_grade.is_some() {
            self.max_grade = cli_max_grade;
        }
        self
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            max_grade: self.max_grade,
        };

        // Apply matching overrides in order
        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(max_grade) = override_cfg.max_grade {
                    effective.max_grade = Some(max_grade);
                }
            }
        }

        effective
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| match globset::Glob::new(pattern) {
            Ok(glob) => glob.compile_matcher().is_match(file_path),
            Err(e) => {
                log::warn!("Ignoring invalid override pattern {}: {}", pattern, e);
                false
            }
        })
    }

    /// Merge a base config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.max_grade.is_none() {
            self.max_grade = base.max_grade;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.script_patterns.is_empty() {
            self.script_patterns = base.script_patterns;
        }

        // Base overrides come first so ours win
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Script file suffixes in effect
    pub fn get_script_patterns(&self) -> Vec<&str> {
        if self.script_patterns.is_empty() {
            DEFAULT_SCRIPT_PATTERNS.to_vec()
        } else {
            self.script_patterns.iter().map(|s| s.as_str()).collect()
        }
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub max_grade: Option<f64>,
}

impl EffectiveConfig {
    /// True when the script's average grade is above the configured maximum
    pub fn exceeds_max_grade(&self, average_grade: f64) -> bool {
        self.max_grade.is_some_and(|max| average_grade > max)
    }
}
