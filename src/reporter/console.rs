//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{ComponentReadability, GradeLevel, ScriptReport};
use colored::Colorize;
use std::fmt::Write;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single script
    pub fn report(&self, report: &ScriptReport) {
        print!("{}", self.render(report));
    }

    /// Report multiple scripts with summary
    pub fn report_many(&self, reports: &[ScriptReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }
        print!("{}", self.render_summary(stats));
    }

    /// Report in quiet mode (just the average grade and verdict)
    pub fn report_quiet(&self, report: &ScriptReport) {
        println!("{}", self.render_quiet(report, ""));
    }

    /// One line: `path: 3.5 (PASS)` followed by an optional suffix
    pub fn render_quiet(&self, report: &ScriptReport, suffix: &str) -> String {
        format!(
            "{}: {} ({}){}",
            report.file_path.display(),
            report.analysis.average_grade_level,
            self.verdict(report.analysis.passes_third_grade_test),
            suffix
        )
    }

    /// Full report for one script as text
    pub fn render(&self, report: &ScriptReport) -> String {
        let analysis = &report.analysis;
        let mut out = String::new();

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            self.paint_bold(&format!("Script Readability: {}", report.file_path.display()))
        );
        let _ = writeln!(
            out,
            "   Components: {} | Words: {}",
            analysis.components.len(),
            analysis.total_words()
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "   Average grade: {} {}",
            self.paint_bold(&analysis.average_grade_level),
            self.verdict(analysis.passes_third_grade_test)
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "   {}", self.paint_bold("Components:"));
        for component in &analysis.components {
            self.render_component(&mut out, component);
        }
        let _ = writeln!(out);
        out
    }

    fn render_component(&self, out: &mut String, component: &ComponentReadability) {
        let _ = writeln!(
            out,
            "   {} {:>8} {} ({} words)",
            self.create_score_bar(component.readability_score),
            self.colorize_grade(component.grade_level),
            component.heading,
            component.word_count
        );

        if !self.verbose {
            return;
        }

        let description = ScoreCalculator::grade_description(component.grade_level);
        let _ = writeln!(out, "       {}", self.paint_dimmed(description));
        for rec in ScoreCalculator::recommendations(component) {
            let arrow = if self.use_colors {
                "→".cyan().to_string()
            } else {
                "→".to_string()
            };
            let _ = writeln!(out, "       {} {}", arrow, rec);
        }
    }

    /// Summary block for multiple scripts
    pub fn render_summary(&self, stats: &AggregateStats) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(out, "{}", self.paint_bold("Summary"));
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(out, "   Scripts analyzed: {}", stats.files_analyzed);
        let _ = writeln!(out, "   Average grade:    {}", stats.average_grade_level);
        let _ = writeln!(
            out,
            "   Passing:          {}/{}",
            stats.passing_files, stats.files_analyzed
        );
        let _ = writeln!(out, "   Total components: {}", stats.total_components);
        let _ = writeln!(out, "   Total words:      {}", stats.total_words);
        let _ = writeln!(out);
        out
    }

    fn verdict(&self, passes: bool) -> String {
        match (passes, self.use_colors) {
            (true, true) => "PASS".green().bold().to_string(),
            (false, true) => "FAIL".red().bold().to_string(),
            (true, false) => "PASS".to_string(),
            (false, false) => "FAIL".to_string(),
        }
    }

    fn colorize_grade(&self, grade: GradeLevel) -> String {
        let s = grade.to_string();
        if !self.use_colors {
            return s;
        }
        match grade.value() {
            1..=3 => s.green().to_string(),
            6 | 8 => s.yellow().to_string(),
            _ => s.red().to_string(),
        }
    }

    fn paint_bold(&self, s: &str) -> String {
        if self.use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn paint_dimmed(&self, s: &str) -> String {
        if self.use_colors {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = ((score as usize * 10) / 100).min(10);
        let empty = 10 - filled;

        let bar = format!("[{}{}] {:>3}", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            if score >= 70 {
                bar.green().to_string()
            } else if score >= 50 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
