//! Analysis pipeline: scoring, aggregation and reporting.

pub mod analyzer;
pub mod report;

pub use analyzer::{AnalysisResult, RegimeAnalyzer, UnavailableIndicator};
