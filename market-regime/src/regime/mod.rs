//! Market regime classification module.
//!
//! Combines indicator scores into a composite and a regime:
//! - RISK-ON: composite > 0.35
//! - RISK-OFF: composite < -0.35
//! - MIXED: otherwise
//!
//! Confidence is the share of indicators whose own score agrees with the
//! chosen regime.

pub mod classifier;
pub mod config;

pub use classifier::{CategoryScores, MarketRegime, RegimeAssessment, RegimeClassifier, RegimeGuidance};
pub use config::{Category, CategoryWeight, ConfigError, RegimeConfig};
