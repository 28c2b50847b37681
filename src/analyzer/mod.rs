//! Analyzer module - script readability analysis

pub mod engine;
pub mod scoring;
pub mod segment;
pub mod text;

pub use engine::{AggregateStats, AnalysisEngine, FileAnalysis, ReadabilityAnalyzer};
pub use scoring::ScoreCalculator;
