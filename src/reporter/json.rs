//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::ScriptReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single script as JSON
    pub fn report(&self, report: &ScriptReport) -> String {
        self.to_json(report, "{}")
    }

    /// Report with summary
    pub fn report_with_summary(&self, reports: &[ScriptReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: JsonSummary {
                files_analyzed: stats.files_analyzed,
                average_grade_level: &stats.average_grade_level,
                passing_files: stats.passing_files,
                total_components: stats.total_components,
                total_words: stats.total_words,
            },
        };
        self.to_json(&output, "{}")
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.unwrap_or_else(|e| {
            log::error!("Failed to encode JSON output: {}", e);
            fallback.to_string()
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [ScriptReport],
    summary: JsonSummary<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    files_analyzed: usize,
    average_grade_level: &'a str,
    passing_files: usize,
    total_components: usize,
    total_words: usize,
}
