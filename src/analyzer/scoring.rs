//! Flesch Reading Ease scoring and grade aggregation

use super::text::{self, TextStats};
use crate::{ComponentReadability, GradeLevel, ScriptComponent};

/// Average grade at or below which a script passes the third grade test
pub const THIRD_GRADE_THRESHOLD: f64 = 3.5;

/// Average sentence length (words) above which we suggest splitting sentences
const LONG_SENTENCE_WORDS: f64 = 14.0;
/// Average syllables per word above which we suggest simpler words
const LONG_WORD_SYLLABLES: f64 = 1.5;

const FLESCH_BASE: f64 = 206.835;
const FLESCH_SENTENCE_WEIGHT: f64 = 1.015;
const FLESCH_SYLLABLE_WEIGHT: f64 = 84.6;

/// Calculator for readability scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Flesch Reading Ease, clamped to 0-100 and rounded.
    ///
    /// Text with no words or no sentences scores 0.
    pub fn flesch_reading_ease(stats: &TextStats) -> u8 {
        if stats.words == 0 || stats.sentences == 0 {
            return 0;
        }

        let raw = FLESCH_BASE
            - FLESCH_SENTENCE_WEIGHT * stats.avg_sentence_length()
            - FLESCH_SYLLABLE_WEIGHT * stats.avg_syllables_per_word();
        raw.clamp(0.0, 100.0).round() as u8
    }

    /// Score one component
    pub fn score_component(component: ScriptComponent) -> ComponentReadability {
        let stats = text::measure(&component.content);
        let readability_score = Self::flesch_reading_ease(&stats);

        ComponentReadability {
            heading: component.heading,
            content: component.content,
            word_count: stats.words,
            readability_score,
            grade_level: GradeLevel::from_score(readability_score),
            sentence_count: stats.sentences,
            syllable_count: stats.syllables,
        }
    }

    /// Mean component grade rounded half-up to one decimal (0.0 when empty)
    pub fn average_grade(components: &[ComponentReadability]) -> f64 {
        if components.is_empty() {
            return 0.0;
        }
        let total: u32 = components.iter().map(|c| c.grade_level.value() as u32).sum();
        Self::round_to_tenth(total as f64 / components.len() as f64)
    }

    /// Format a grade with exactly one decimal digit
    pub fn format_grade(grade: f64) -> String {
        format!("{:.1}", Self::round_to_tenth(grade))
    }

    /// Compared on the rounded value so the verdict always agrees with the
    /// displayed grade.
    pub fn passes_third_grade_test(average_grade: f64) -> bool {
        Self::round_to_tenth(average_grade) <= THIRD_GRADE_THRESHOLD
    }

    fn round_to_tenth(value: f64) -> f64 {
        (value * 10.0).round() / 10.0
    }

    /// Get a description of the grade
    pub fn grade_description(grade: GradeLevel) -> &'static str {
        match grade.value() {
            1 => "Very easy - reads like casual speech",
            2 => "Easy - plain conversational language",
            3 => "Fairly easy - fine for a general audience",
            6 => "Standard - most viewers follow along",
            8 => "Fairly difficult - some viewers will drop off",
            10 => "Difficult - simplify for short-form video",
            _ => "Very difficult - rewrite with shorter words and sentences",
        }
    }

    /// Get recommendations for one component
    pub fn recommendations(component: &ComponentReadability) -> Vec<String> {
        let mut recs = Vec::new();

        if component.word_count == 0 {
            recs.push(format!("\"{}\" has no words yet", component.heading));
            return recs;
        }

        let stats = TextStats {
            words: component.word_count,
            sentences: component.sentence_count,
            syllables: component.syllable_count,
        };

        if stats.sentences == 0 {
            recs.push("End sentences with '.', '!' or '?'".to_string());
        } else if stats.avg_sentence_length() > LONG_SENTENCE_WORDS {
            recs.push(format!(
                "Split long sentences (average {:.1} words per sentence)",
                stats.avg_sentence_length()
            ));
        }

        if stats.avg_syllables_per_word() > LONG_WORD_SYLLABLES {
            recs.push(format!(
                "Use shorter words (average {:.2} syllables per word)",
                stats.avg_syllables_per_word()
            ));
        }

        if recs.is_empty() {
            recs.push("Reads easily".to_string());
        }

        recs
    }
}
