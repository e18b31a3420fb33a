//! Indicator identities, results and the unavailable outcome.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Symbol;

/// The twelve indicators, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorName {
    #[serde(rename = "SPX_Trend")]
    SpxTrend,
    #[serde(rename = "Sector_Rotation")]
    SectorRotation,
    #[serde(rename = "SmallCap_Strength")]
    SmallCapStrength,
    #[serde(rename = "VIX")]
    Vix,
    #[serde(rename = "VIX_TermStructure")]
    VixTermStructure,
    #[serde(rename = "Treasury_10Y")]
    Treasury10Y,
    #[serde(rename = "YieldCurve")]
    YieldCurve,
    #[serde(rename = "CreditSpreads")]
    CreditSpreads,
    #[serde(rename = "Dollar_Strength")]
    DollarStrength,
    #[serde(rename = "JPY_Signal")]
    JpySignal,
    #[serde(rename = "Risk_Currencies")]
    RiskCurrencies,
    #[serde(rename = "Gold_Signal")]
    GoldSignal,
}

impl IndicatorName {
    pub const ALL: [IndicatorName; 12] = [
        IndicatorName::SpxTrend,
        IndicatorName::SectorRotation,
        IndicatorName::SmallCapStrength,
        IndicatorName::Vix,
        IndicatorName::VixTermStructure,
        IndicatorName::Treasury10Y,
        IndicatorName::YieldCurve,
        IndicatorName::CreditSpreads,
        IndicatorName::DollarStrength,
        IndicatorName::JpySignal,
        IndicatorName::RiskCurrencies,
        IndicatorName::GoldSignal,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == s.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpxTrend => "SPX_Trend",
            Self::SectorRotation => "Sector_Rotation",
            Self::SmallCapStrength => "SmallCap_Strength",
            Self::Vix => "VIX",
            Self::VixTermStructure => "VIX_TermStructure",
            Self::Treasury10Y => "Treasury_10Y",
            Self::YieldCurve => "YieldCurve",
            Self::CreditSpreads => "CreditSpreads",
            Self::DollarStrength => "Dollar_Strength",
            Self::JpySignal => "JPY_Signal",
            Self::RiskCurrencies => "Risk_Currencies",
            Self::GoldSignal => "Gold_Signal",
        }
    }

    /// Series the indicator needs. Empty for the placeholder indicators.
    pub fn inputs(&self) -> &'static [Symbol] {
        match self {
            Self::SpxTrend => &[Symbol::Spx],
            Self::SectorRotation => &[Symbol::Tech, Symbol::Utilities],
            Self::SmallCapStrength => &[Symbol::Russell, Symbol::Spx],
            Self::Vix | Self::VixTermStructure => &[Symbol::Vix],
            Self::Treasury10Y | Self::YieldCurve => &[],
            Self::CreditSpreads => &[Symbol::HighYield, Symbol::InvGrade],
            Self::DollarStrength => &[Symbol::Dxy],
            Self::JpySignal => &[Symbol::UsdJpy],
            Self::RiskCurrencies => &[Symbol::AudUsd],
            Self::GoldSignal => &[Symbol::Gold, Symbol::Spx],
        }
    }

    /// Short description used in reports.
    pub fn description(&self) -> &'static str {
        match self {
            Self::SpxTrend => "S&P 500 vs 200-day mean",
            Self::SectorRotation => "Tech / utilities ratio",
            Self::SmallCapStrength => "Small-cap relative strength",
            Self::Vix => "VIX level and 5-day change",
            Self::VixTermStructure => "VIX vs 50-day mean",
            Self::Treasury10Y => "10Y treasury yield (estimate)",
            Self::YieldCurve => "10Y-2Y spread (estimate)",
            Self::CreditSpreads => "High-yield / investment-grade ratio",
            Self::DollarStrength => "Dollar index vs 50-day mean",
            Self::JpySignal => "USDJPY vs 20-day mean",
            Self::RiskCurrencies => "AUDUSD vs 50-day mean",
            Self::GoldSignal => "Gold relative to S&P 500",
        }
    }
}

impl fmt::Display for IndicatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic fields recorded alongside a score. Reporting only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorDetails {
    SpxTrend {
        value: f64,
        pct_from_200ma: f64,
    },
    SectorRotation {
        ratio: f64,
    },
    SmallCapStrength {
        rut_return: f64,
        relative_strength: f64,
    },
    Vix {
        level: f64,
        change_5d: f64,
    },
    VixTermStructure {
        vix_vs_ma: f64,
        structure: String,
    },
    Treasury10Y {
        #[serde(rename = "yield")]
        yield_pct: f64,
        change_5d: f64,
    },
    YieldCurve {
        spread: f64,
        shape: String,
    },
    CreditSpreads {
        hyg_lqd_ratio: f64,
        deviation_pct: f64,
    },
    DollarStrength {
        dxy: f64,
        pct_from_ma: f64,
    },
    JpySignal {
        usdjpy: f64,
        trend: String,
    },
    RiskCurrencies {
        audusd: f64,
        strength: String,
    },
    GoldSignal {
        gold_return: f64,
        relative_to_spx: f64,
    },
}

/// A scored indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub name: IndicatorName,
    /// Sentiment score in [-1, 1]. Positive is risk-on.
    pub score: f64,
    pub details: IndicatorDetails,
}

impl IndicatorResult {
    pub fn new(name: IndicatorName, score: f64, details: IndicatorDetails) -> Self {
        Self {
            name,
            score,
            details,
        }
    }
}

/// Why an indicator could not be scored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unavailable {
    #[error("missing series {0}")]
    MissingSeries(Symbol),

    #[error("empty series {0}")]
    EmptySeries(Symbol),

    #[error("non-finite {0}")]
    NonFinite(&'static str),
}

pub type ScoreResult = Result<IndicatorResult, Unavailable>;
