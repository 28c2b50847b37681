//! scriptgrade: readability grading for short-form video scripts
//!
//! Scripts are split into heading-delimited components (`**Hook:**`,
//! `**Bridge:**`, ...), each component is scored with the Flesch Reading Ease
//! formula, and the scores are mapped to approximate US grade levels. The
//! script passes the "third grade test" when its average grade is 3.5 or lower.
//!
//! ```
//! let analysis = scriptgrade::analyze("**Hook:** Wow! **WTA:** Try it.");
//! assert_eq!(analysis.components.len(), 2);
//! assert!(analysis.passes_third_grade_test);
//! ```

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod reporter;
pub mod watcher;

pub use analyzer::{AnalysisEngine, ReadabilityAnalyzer};
pub use error::ScriptError;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Analyze a raw script. Total over all inputs; see [`ReadabilityAnalyzer::analyze`].
pub fn analyze(script: &str) -> ScriptReadabilityAnalysis {
    ReadabilityAnalyzer::analyze(script)
}

/// A heading-delimited section of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptComponent {
    pub heading: String,
    pub content: String,
}

impl ScriptComponent {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }
}

/// Readability of a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReadability {
    /// Heading label without the surrounding `**` and `:`
    pub heading: String,
    /// Trimmed body text
    pub content: String,
    /// Number of word tokens
    pub word_count: usize,
    /// Flesch Reading Ease (0-100, higher is easier)
    pub readability_score: u8,
    /// Approximate US grade level
    pub grade_level: GradeLevel,
    /// Number of sentences
    #[serde(default)]
    pub sentence_count: usize,
    /// Total syllables across all words
    #[serde(default)]
    pub syllable_count: usize,
}

/// Result of analyzing one script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptReadabilityAnalysis {
    /// Mean component grade, formatted with one decimal (e.g. "3.5")
    pub average_grade_level: String,
    /// True when the average grade is 3.5 or lower
    pub passes_third_grade_test: bool,
    /// Components in the order their headings appear
    pub components: Vec<ComponentReadability>,
}

impl ScriptReadabilityAnalysis {
    /// Average grade as a number
    pub fn average_grade(&self) -> f64 {
        self.average_grade_level.parse().unwrap_or(0.0)
    }

    pub fn total_words(&self) -> usize {
        self.components.iter().map(|c| c.word_count).sum()
    }
}

/// Analysis of one script file (or stdin)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptReport {
    /// Path to the analyzed script (`-` for stdin)
    pub file_path: PathBuf,
    #[serde(flatten)]
    pub analysis: ScriptReadabilityAnalysis,
}

/// Approximate US school grade derived from a Flesch score.
///
/// Only the values 1, 2, 3, 6, 8, 10 and 12 occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeLevel(u8);

impl GradeLevel {
    /// Lowest band: any score below 30, including 0
    pub const HARDEST: GradeLevel = GradeLevel(12);

    /// Band table, highest threshold first. First match wins.
    const BANDS: [(u8, u8); 6] = [(90, 1), (80, 2), (70, 3), (60, 6), (50, 8), (30, 10)];

    pub fn from_score(score: u8) -> Self {
        Self::BANDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|&(_, grade)| GradeLevel(grade))
            .unwrap_or(Self::HARDEST)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "grade {}", self.0)
    }
}
