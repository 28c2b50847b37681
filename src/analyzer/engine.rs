//! Analysis engine - script segmentation, scoring and aggregation

use crate::cache::AnalysisCache;
use crate::error::{Result, ScriptError};
use crate::{ScriptReadabilityAnalysis, ScriptReport};
use std::fs;
use std::path::{Path, PathBuf};

use super::segment::segment;
use super::ScoreCalculator;

/// Pure script readability analyzer
pub struct ReadabilityAnalyzer;

impl ReadabilityAnalyzer {
    /// Analyze a raw script.
    ///
    /// Total and deterministic: every input, including the empty string,
    /// produces a well-formed analysis with at least one component.
    pub fn analyze(script: &str) -> ScriptReadabilityAnalysis {
        let components: Vec<_> = segment(script)
            .into_iter()
            .map(ScoreCalculator::score_component)
            .collect();

        let average = ScoreCalculator::average_grade(&components);

        ScriptReadabilityAnalysis {
            average_grade_level: ScoreCalculator::format_grade(average),
            passes_third_grade_test: ScoreCalculator::passes_third_grade_test(average),
            components,
        }
    }
}

/// Analyzes script files and sources
pub struct AnalysisEngine {
    /// Label used for scripts read from stdin
    stdin_label: PathBuf,
}

impl AnalysisEngine {
    /// Create a new analysis engine
    pub fn new() -> Self {
        Self {
            stdin_label: PathBuf::from("-"),
        }
    }

    /// Read a script file as UTF-8 text
    pub fn read_script(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ScriptError::NotFound(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Analyze a script file and return the report
    pub fn analyze_file(&self, path: &Path) -> Result<ScriptReport> {
        let content = Self::read_script(path)?;
        let report = self.analyze_source(path, &content);
        log::debug!(
            "{}: {} components, average grade {}",
            path.display(),
            report.analysis.components.len(),
            report.analysis.average_grade_level
        );
        Ok(report)
    }

    /// Analyze in-memory script text, reported under `path`
    pub fn analyze_source(&self, path: &Path, content: &str) -> ScriptReport {
        ScriptReport {
            file_path: path.to_path_buf(),
            analysis: ReadabilityAnalyzer::analyze(content),
        }
    }

    /// Analyze a script read from stdin
    pub fn analyze_stdin_text(&self, content: &str) -> ScriptReport {
        self.analyze_source(&self.stdin_label, content)
    }

    /// Analyze one file, serving the cached report when its content is unchanged
    pub fn analyze_cached(&self, path: &Path, cache: &AnalysisCache) -> Result<FileAnalysis> {
        let content = Self::read_script(path)?;
        if let Some(report) = cache.get(path, &content) {
            log::debug!("{}: served from cache", path.display());
            return Ok(FileAnalysis {
                report,
                content,
                from_cache: true,
            });
        }
        Ok(FileAnalysis {
            report: self.analyze_source(path, &content),
            content,
            from_cache: false,
        })
    }

    /// Analyze multiple files sequentially, keeping per-file errors
    pub fn analyze_many(
        &self,
        paths: &[PathBuf],
        cache: &AnalysisCache,
    ) -> Vec<Result<FileAnalysis>> {
        paths.iter().map(|p| self.analyze_cached(p, cache)).collect()
    }

    /// Analyze multiple files in parallel, preserving input order
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        cache: &AnalysisCache,
    ) -> Vec<Result<FileAnalysis>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze_cached(p, cache)).collect()
    }

    /// Calculate aggregate statistics across multiple reports
    pub fn aggregate_stats(reports: &[ScriptReport]) -> AggregateStats {
        if reports.is_empty() {
            return AggregateStats::default();
        }

        let total_grade: f64 = reports.iter().map(|r| r.analysis.average_grade()).sum();
        let average_grade = total_grade / reports.len() as f64;

        AggregateStats {
            files_analyzed: reports.len(),
            average_grade_level: ScoreCalculator::format_grade(average_grade),
            passing_files: reports
                .iter()
                .filter(|r| r.analysis.passes_third_grade_test)
                .count(),
            total_components: reports.iter().map(|r| r.analysis.components.len()).sum(),
            total_words: reports.iter().map(|r| r.analysis.total_words()).sum(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A script read from disk and analyzed, or served from the cache
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub report: ScriptReport,
    /// Script text, kept so fresh reports can be cached by the caller
    pub content: String,
    pub from_cache: bool,
}

/// Aggregate statistics from multiple script analyses
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStats {
    /// Number of scripts analyzed
    pub files_analyzed: usize,
    /// Mean of the per-script average grades, one decimal
    pub average_grade_level: String,
    /// Scripts that pass the third grade test
    pub passing_files: usize,
    /// Total number of components across all scripts
    pub total_components: usize,
    /// Total number of words across all scripts
    pub total_words: usize,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            files_analyzed: 0,
            average_grade_level: ScoreCalculator::format_grade(0.0),
            passing_files: 0,
            total_components: 0,
            total_words: 0,
        }
    }
}
