//! Composite aggregation settings.
//!
//! The aggregator is a fixed-weight linear classifier: indicators are grouped
//! into categories, each category is averaged, and the category averages are
//! combined with fixed weights.
//!
//! | Category     | Weight | Members                                      |
//! |--------------|--------|----------------------------------------------|
//! | equity       | 0.30   | SPX_Trend, Sector_Rotation, SmallCap_Strength|
//! | volatility   | 0.25   | VIX, VIX_TermStructure                       |
//! | fixed_income | 0.20   | Treasury_10Y, YieldCurve, CreditSpreads      |
//! | currency     | 0.15   | Dollar_Strength, JPY_Signal, Risk_Currencies |
//! | commodity    | 0.10   | Gold_Signal                                  |

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::IndicatorName;

/// Allowed drift of the weight total from 1.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Indicator category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Equity,
    Volatility,
    FixedIncome,
    Currency,
    Commodity,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Equity,
        Category::Volatility,
        Category::FixedIncome,
        Category::Currency,
        Category::Commodity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Volatility => "volatility",
            Self::FixedIncome => "fixed_income",
            Self::Currency => "currency",
            Self::Commodity => "commodity",
        }
    }

    /// Capitalized label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::Volatility => "Volatility",
            Self::FixedIncome => "Fixed_income",
            Self::Currency => "Currency",
            Self::Commodity => "Commodity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Category weights sum to {0}, expected 1")]
    WeightSum(f64),

    #[error("Negative weight for {0}")]
    NegativeWeight(Category),

    #[error("Category {0} has no indicators")]
    EmptyCategory(Category),

    #[error("Category {0} listed more than once")]
    DuplicateCategory(Category),

    #[error("Indicator {0} assigned more than once")]
    DuplicateIndicator(IndicatorName),

    #[error("Risk-on threshold {risk_on} is below risk-off threshold {risk_off}")]
    InvertedThresholds { risk_on: f64, risk_off: f64 },

    #[error("Agreement band must be non-negative, got {0}")]
    NegativeAgreementBand(f64),
}

/// One weighted category and its member indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: Category,
    pub weight: f64,
    pub members: Vec<IndicatorName>,
}

impl CategoryWeight {
    pub fn new(category: Category, weight: f64, members: &[IndicatorName]) -> Self {
        Self {
            category,
            weight,
            members: members.to_vec(),
        }
    }
}

/// Regime classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Categories in report order.
    pub categories: Vec<CategoryWeight>,
    /// Composite strictly above this is risk-on.
    pub risk_on_threshold: f64,
    /// Composite strictly below this is risk-off.
    pub risk_off_threshold: f64,
    /// Indicator scores beyond +/- this agree with a directional regime;
    /// scores within it agree with a mixed regime.
    pub agreement_band: f64,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        use IndicatorName::*;

        Self {
            categories: vec![
                CategoryWeight::new(
                    Category::Equity,
                    0.30,
                    &[SpxTrend, SectorRotation, SmallCapStrength],
                ),
                CategoryWeight::new(Category::Volatility, 0.25, &[Vix, VixTermStructure]),
                CategoryWeight::new(
                    Category::FixedIncome,
                    0.20,
                    &[Treasury10Y, YieldCurve, CreditSpreads],
                ),
                CategoryWeight::new(
                    Category::Currency,
                    0.15,
                    &[DollarStrength, JpySignal, RiskCurrencies],
                ),
                CategoryWeight::new(Category::Commodity, 0.10, &[GoldSignal]),
            ],
            risk_on_threshold: 0.35,
            risk_off_threshold: -0.35,
            agreement_band: 0.2,
        }
    }
}

impl RegimeConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut categories = HashSet::new();
        let mut indicators = HashSet::new();

        for entry in &self.categories {
            if !categories.insert(entry.category) {
                return Err(ConfigError::DuplicateCategory(entry.category));
            }
            if entry.weight < 0.0 {
                return Err(ConfigError::NegativeWeight(entry.category));
            }
            if entry.members.is_empty() {
                return Err(ConfigError::EmptyCategory(entry.category));
            }
            for &member in &entry.members {
                if !indicators.insert(member) {
                    return Err(ConfigError::DuplicateIndicator(member));
                }
            }
        }

        let total = self.total_weight();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightSum(total));
        }

        if self.risk_on_threshold < self.risk_off_threshold {
            return Err(ConfigError::InvertedThresholds {
                risk_on: self.risk_on_threshold,
                risk_off: self.risk_off_threshold,
            });
        }

        if self.agreement_band < 0.0 {
            return Err(ConfigError::NegativeAgreementBand(self.agreement_band));
        }

        Ok(())
    }

    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|c| c.weight).sum()
    }

    pub fn weight(&self, category: Category) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.weight)
    }

    /// Category an indicator is assigned to, if any.
    pub fn category_of(&self, indicator: IndicatorName) -> Option<Category> {
        self.categories
            .iter()
            .find(|c| c.members.contains(&indicator))
            .map(|c| c.category)
    }

    /// All member indicators across categories, in category order.
    pub fn members(&self) -> impl Iterator<Item = IndicatorName> + '_ {
        self.categories.iter().flat_map(|c| c.members.iter().copied())
    }
}
