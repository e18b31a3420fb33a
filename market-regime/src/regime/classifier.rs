//! Market regime classifier.
//!
//! Averages indicator scores per category, weights the categories into a
//! composite score and maps the composite onto a regime.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorRegistry;

use super::config::{Category, RegimeConfig};

/// Market regime classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketRegime {
    /// Composite above the risk-on threshold.
    #[serde(rename = "RISK-ON")]
    RiskOn,
    /// Composite below the risk-off threshold.
    #[serde(rename = "RISK-OFF")]
    RiskOff,
    /// Anything in between.
    #[serde(rename = "MIXED")]
    Mixed,
}

impl MarketRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RiskOn => "RISK-ON",
            Self::RiskOff => "RISK-OFF",
            Self::Mixed => "MIXED",
        }
    }

    /// Description of the regime.
    pub fn description(&self) -> &'static str {
        match self {
            Self::RiskOn => "Broad risk appetite across asset classes",
            Self::RiskOff => "Defensive positioning across asset classes",
            Self::Mixed => "Conflicting signals, no clear direction",
        }
    }

    /// Whether an individual indicator score agrees with this regime.
    pub fn agrees(&self, score: f64, band: f64) -> bool {
        match self {
            Self::RiskOn => score > band,
            Self::RiskOff => score < -band,
            Self::Mixed => (-band..=band).contains(&score),
        }
    }

    /// Position sizing and hedging guidance for the regime.
    pub fn guidance(&self) -> RegimeGuidance {
        match self {
            Self::RiskOn => RegimeGuidance {
                stance: "AGGRESSIVE",
                sizing_pct: (70.0, 100.0),
                hedging_pct: (10.0, 15.0),
                strategies: "Breakout buying, momentum, growth",
            },
            Self::RiskOff => RegimeGuidance {
                stance: "DEFENSIVE",
                sizing_pct: (20.0, 40.0),
                hedging_pct: (40.0, 60.0),
                strategies: "Capital preservation, hedging",
            },
            Self::Mixed => RegimeGuidance {
                stance: "MODERATE",
                sizing_pct: (40.0, 60.0),
                hedging_pct: (25.0, 35.0),
                strategies: "Selective, high-conviction",
            },
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested exposure for a regime. Percentages of normal position size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeGuidance {
    pub stance: &'static str,
    pub sizing_pct: (f64, f64),
    pub hedging_pct: (f64, f64),
    pub strategies: &'static str,
}

impl RegimeGuidance {
    /// Midpoint of the sizing band as a fraction.
    pub fn position_size_multiplier(&self) -> f64 {
        (self.sizing_pct.0 + self.sizing_pct.1) / 200.0
    }
}

/// Mean indicator score per category.
pub type CategoryScores = BTreeMap<Category, f64>;

/// Aggregated view of one registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeAssessment {
    pub category_scores: CategoryScores,
    /// Unrounded composite score.
    pub composite: f64,
    pub regime: MarketRegime,
    /// Unrounded agreement percentage, 0-100.
    pub confidence: f64,
}

/// Composite regime classifier.
#[derive(Debug, Clone, Default)]
pub struct RegimeClassifier {
    config: RegimeConfig,
}

impl RegimeClassifier {
    /// Create a new classifier.
    pub fn new(config: RegimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    /// Mean score of each category's members. Unscored members count as 0.
    pub fn category_scores(&self, registry: &IndicatorRegistry) -> CategoryScores {
        self.config
            .categories
            .iter()
            .map(|entry| {
                let total: f64 = entry
                    .members
                    .iter()
                    .map(|&name| registry.score_or_neutral(name))
                    .sum();
                let mean = if entry.members.is_empty() {
                    0.0
                } else {
                    total / entry.members.len() as f64
                };
                (entry.category, mean)
            })
            .collect()
    }

    /// Weighted sum of category scores.
    pub fn composite(&self, category_scores: &CategoryScores) -> f64 {
        self.config
            .categories
            .iter()
            .map(|entry| category_scores.get(&entry.category).copied().unwrap_or(0.0) * entry.weight)
            .sum()
    }

    /// Map a composite score onto a regime. Both thresholds are exclusive.
    pub fn classify(&self, composite: f64) -> MarketRegime {
        if composite > self.config.risk_on_threshold {
            MarketRegime::RiskOn
        } else if composite < self.config.risk_off_threshold {
            MarketRegime::RiskOff
        } else {
            MarketRegime::Mixed
        }
    }

    /// Percentage of member indicators agreeing with `regime`.
    ///
    /// Unscored indicators count as 0 and stay in the denominator.
    pub fn confidence(&self, regime: MarketRegime, registry: &IndicatorRegistry) -> f64 {
        let scores: Vec<f64> = self
            .config
            .members()
            .map(|name| registry.score_or_neutral(name))
            .collect();
        if scores.is_empty() {
            return 0.0;
        }

        let agreeing = scores
            .iter()
            .filter(|&&score| regime.agrees(score, self.config.agreement_band))
            .count();
        agreeing as f64 / scores.len() as f64 * 100.0
    }

    /// Run the full aggregation over a registry.
    pub fn assess(&self, registry: &IndicatorRegistry) -> RegimeAssessment {
        let category_scores = self.category_scores(registry);
        let composite = self.composite(&category_scores);
        let regime = self.classify(composite);
        let confidence = self.confidence(regime, registry);

        RegimeAssessment {
            category_scores,
            composite,
            regime,
            confidence,
        }
    }
}
