//! End-to-end regime analysis.
//!
//! Runs every scorer against one [`MarketData`] snapshot, merges the scored
//! indicators into an immutable registry and aggregates it. Scorers are
//! evaluated in parallel; the registry is ordered by indicator, so the result
//! does not depend on evaluation order.

use chrono::{Local, NaiveDateTime};
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::data::{MarketData, SeriesSource, SourceError};
use crate::indicators::{
    self, series::round_to, IndicatorName, IndicatorRegistry, ScoreResult,
};
use crate::regime::{CategoryScores, MarketRegime, RegimeClassifier, RegimeConfig, RegimeGuidance};

/// Timestamp layout used in reports and serialized results.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_timestamp<S: Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

/// An indicator that could not be scored in this run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnavailableIndicator {
    pub name: IndicatorName,
    pub reason: String,
}

/// Output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub regime: MarketRegime,
    /// Composite score, 3 decimals.
    pub composite_score: f64,
    /// Agreement percentage, 1 decimal.
    pub confidence: f64,
    pub indicators: IndicatorRegistry,
    pub category_scores: CategoryScores,
    pub unavailable: Vec<UnavailableIndicator>,
    pub guidance: RegimeGuidance,
}

/// Scores indicators and classifies the regime.
#[derive(Debug, Clone, Default)]
pub struct RegimeAnalyzer {
    classifier: RegimeClassifier,
}

impl RegimeAnalyzer {
    pub fn new(config: RegimeConfig) -> Self {
        Self {
            classifier: RegimeClassifier::new(config),
        }
    }

    /// Evaluate every indicator, splitting scored from unavailable.
    pub fn score_indicators(
        &self,
        data: &MarketData,
    ) -> (IndicatorRegistry, Vec<UnavailableIndicator>) {
        let outcomes: Vec<(IndicatorName, ScoreResult)> = IndicatorName::ALL
            .par_iter()
            .map(|&name| (name, indicators::evaluate(name, data)))
            .collect();

        let mut scored = Vec::with_capacity(outcomes.len());
        let mut unavailable = Vec::new();

        for (name, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    debug!("{}: score {:+.2}", name, result.score);
                    scored.push(result);
                }
                Err(reason) => {
                    debug!("{}: unavailable ({})", name, reason);
                    unavailable.push(UnavailableIndicator {
                        name,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        (scored.into_iter().collect(), unavailable)
    }

    /// Analyze a snapshot, stamped with the current local time.
    pub fn analyze(&self, data: &MarketData) -> AnalysisResult {
        self.analyze_at(data, Local::now().naive_local())
    }

    /// Analyze a snapshot with an explicit timestamp.
    pub fn analyze_at(&self, data: &MarketData, timestamp: NaiveDateTime) -> AnalysisResult {
        let (registry, unavailable) = self.score_indicators(data);
        let assessment = self.classifier.assess(&registry);

        info!(
            "Regime {} (composite {:+.3}, confidence {:.1}%, {} of {} indicators scored)",
            assessment.regime,
            assessment.composite,
            assessment.confidence,
            registry.len(),
            IndicatorName::ALL.len()
        );

        AnalysisResult {
            timestamp,
            regime: assessment.regime,
            composite_score: round_to(assessment.composite, 3),
            confidence: round_to(assessment.confidence, 1),
            indicators: registry,
            category_scores: assessment.category_scores,
            unavailable,
            guidance: assessment.regime.guidance(),
        }
    }

    /// Fetch the required series from `source` and analyze them.
    pub fn run<S: SeriesSource + ?Sized>(&self, source: &S) -> Result<AnalysisResult, SourceError> {
        let symbols = indicators::required_symbols();
        let data = source.fetch(&symbols)?;
        info!("Fetched {} of {} series", data.len(), symbols.len());
        Ok(self.analyze(&data))
    }
}
