//! Trend tracking - persist grades to .scriptgrade-history.json

use crate::ScriptReport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const HISTORY_FILENAME: &str = ".scriptgrade-history.json";
const MAX_RUNS: usize = 50;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub runs: Vec<HistoryRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRun {
    pub timestamp: String,
    pub files: HashMap<String, FileGrade>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileGrade {
    pub average_grade: f64,
    pub components: usize,
}

/// Load history from project root (or start empty)
pub fn load_history(project_root: &Path) -> HistoryFile {
    let path = project_root.join(HISTORY_FILENAME);
    let Ok(content) = fs::read_to_string(&path) else {
        return HistoryFile::default();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable history {}: {}", path.display(), e);
        HistoryFile::default()
    })
}

/// Save history to project root
pub fn save_history(project_root: &Path, history: &HistoryFile) -> anyhow::Result<()> {
    let path = project_root.join(HISTORY_FILENAME);
    let content = serde_json::to_string_pretty(history)?;
    fs::write(&path, content)?;
    Ok(())
}

/// Grade recorded for a file in the latest run
pub fn previous_grade(history: &HistoryFile, file_path: &Path) -> Option<f64> {
    let run = history.runs.last()?;
    let key = file_path.to_string_lossy().to_string();
    run.files.get(&key).map(|f| f.average_grade)
}

/// Build a new run from reports and append it, keeping the last 50 runs
pub fn append_run(history: &mut HistoryFile, reports: &[ScriptReport]) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let files = reports
        .iter()
        .map(|r| {
            (
                r.file_path.to_string_lossy().to_string(),
                FileGrade {
                    average_grade: r.analysis.average_grade(),
                    components: r.analysis.components.len(),
                },
            )
        })
        .collect();

    history.runs.push(HistoryRun { timestamp, files });
    if history.runs.len() > MAX_RUNS {
        history.runs.drain(0..history.runs.len() - MAX_RUNS);
    }
}

/// Format delta for console: " [was 6.0, easier by 2.5]", " [was 3.0, harder by 1.0]" or ""
pub fn format_delta(previous: Option<f64>, current: f64) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    // Compare in tenths, the precision grades are reported with
    let diff_tenths = ((current - prev) * 10.0).round() as i64;
    if diff_tenths == 0 {
        return format!(" [unchanged at {:.1}]", current);
    }
    let magnitude = diff_tenths.unsigned_abs() as f64 / 10.0;
    if diff_tenths < 0 {
        format!(" [was {:.1}, easier by {:.1}]", prev, magnitude)
    } else {
        format!(" [was {:.1}, harder by {:.1}]", prev, magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;

    fn make_report(path: &str, script: &str) -> ScriptReport {
        AnalysisEngine::new().analyze_source(Path::new(path), script)
    }

    fn run_with(path: &str, grade: f64) -> HistoryRun {
        let mut files = HashMap::new();
        files.insert(
            path.to_string(),
            FileGrade {
                average_grade: grade,
                components: 4,
            },
        );
        HistoryRun {
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            files,
        }
    }

    #[test]
    fn format_delta_no_previous_returns_empty() {
        assert_eq!(format_delta(None, 3.5), "");
    }

    #[test]
    fn format_delta_easier() {
        assert_eq!(format_delta(Some(6.0), 3.5), " [was 6.0, easier by 2.5]");
    }

    #[test]
    fn format_delta_harder() {
        assert_eq!(format_delta(Some(3.0), 4.0), " [was 3.0, harder by 1.0]");
    }

    #[test]
    fn format_delta_unchanged_ignores_float_noise() {
        assert_eq!(format_delta(Some(0.1 + 0.2), 0.3), " [unchanged at 0.3]");
    }

    #[test]
    fn previous_grade_empty_history_returns_none() {
        let history = HistoryFile::default();
        assert_eq!(previous_grade(&history, Path::new("hook.script.md")), None);
    }

    #[test]
    fn previous_grade_uses_last_run_not_first() {
        let history = HistoryFile {
            runs: vec![run_with("hook.script.md", 8.0), run_with("hook.script.md", 2.5)],
        };
        assert_eq!(previous_grade(&history, Path::new("hook.script.md")), Some(2.5));
        assert_eq!(previous_grade(&history, Path::new("other.script.md")), None);
    }

    #[test]
    fn append_run_records_reports() {
        let mut history = HistoryFile::default();
        append_run(
            &mut history,
            &[make_report("a.script.md", "**Hook:** Go. **WTA:** Try it.")],
        );

        assert_eq!(history.runs.len(), 1);
        let entry = &history.runs[0].files["a.script.md"];
        assert_eq!(entry.average_grade, 1.0);
        assert_eq!(entry.components, 2);
    }

    #[test]
    fn append_run_caps_at_max_runs() {
        let mut history = HistoryFile::default();
        let report = make_report("a.script.md", "Go.");
        for _ in 0..(MAX_RUNS + 5) {
            append_run(&mut history, std::slice::from_ref(&report));
        }
        assert_eq!(history.runs.len(), MAX_RUNS);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut history = HistoryFile::default();
        append_run(&mut history, &[make_report("a.script.md", "")]);
        save_history(dir.path(), &history).unwrap();

        let loaded = load_history(dir.path());
        assert_eq!(loaded.runs.len(), 1);
        assert_eq!(previous_grade(&loaded, Path::new("a.script.md")), Some(12.0));
    }

    #[test]
    fn load_missing_history_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_history(dir.path()).runs.is_empty());
    }
}
