//! Text report for an analysis result.

use std::fmt;

use super::analyzer::{AnalysisResult, TIMESTAMP_FORMAT};
use crate::regime::MarketRegime;

const SEPARATOR: &str = "============================================================";
const RULE: &str = "------------------------------------------------------------";

/// Bar of one block per 0.1 of absolute score, at least one block.
pub fn score_bar(score: f64) -> String {
    let blocks = ((score.abs() * 10.0) as usize).max(1);
    "█".repeat(blocks)
}

fn marker(regime: MarketRegime) -> &'static str {
    match regime {
        MarketRegime::RiskOn => "🟢",
        MarketRegime::RiskOff => "🔴",
        MarketRegime::Mixed => "🟡",
    }
}

impl AnalysisResult {
    /// Generate the full text report.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(
            f,
            "   ANALYSIS COMPLETE - {}",
            self.timestamp.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f)?;
        writeln!(f, "   REGIME: {} {}", marker(self.regime), self.regime)?;
        writeln!(f, "   {}", self.regime.description())?;
        writeln!(f, "   COMPOSITE SCORE: {:+.3}", self.composite_score)?;
        writeln!(f, "   CONFIDENCE: {:.1}%", self.confidence)?;

        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "   CATEGORY BREAKDOWN:")?;
        writeln!(f, "{}", RULE)?;
        for (category, score) in &self.category_scores {
            writeln!(
                f,
                "   {:20} {:+.2}  {}",
                category.label(),
                score,
                score_bar(*score)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "   INDICATOR DETAILS:")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;
        for result in self.indicators.iter() {
            writeln!(
                f,
                "   {:22} {:+.2}  {:10}  {}",
                result.name.as_str(),
                result.score,
                score_bar(result.score),
                result.name.description()
            )?;
        }
        for missing in &self.unavailable {
            writeln!(f, "   {:22} n/a    ({})", missing.name.as_str(), missing.reason)?;
        }

        let guidance = &self.guidance;
        writeln!(f)?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "   TRADING IMPLICATIONS:")?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(
            f,
            "   • Position Sizing: {} ({:.0}-{:.0}%)",
            guidance.stance, guidance.sizing_pct.0, guidance.sizing_pct.1
        )?;
        writeln!(
            f,
            "   • Size Multiplier: {:.2}x",
            guidance.position_size_multiplier()
        )?;
        writeln!(f, "   • Strategies: {}", guidance.strategies)?;
        writeln!(
            f,
            "   • Hedging: {:.0}-{:.0}%",
            guidance.hedging_pct.0, guidance.hedging_pct.1
        )?;
        writeln!(f)?;
        writeln!(f, "{}", SEPARATOR)
    }
}
