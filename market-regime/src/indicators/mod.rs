//! Indicator scorers.
//!
//! Twelve independent scorers turn price series into a sentiment score in
//! [-1, 1]. Each returns its own [`IndicatorResult`] or an [`Unavailable`]
//! reason; none of them share state, so they can run in any order.
//!
//! | Category     | Indicators                                        |
//! |--------------|---------------------------------------------------|
//! | Equity       | SPX_Trend, Sector_Rotation, SmallCap_Strength     |
//! | Volatility   | VIX, VIX_TermStructure                            |
//! | Fixed income | Treasury_10Y, YieldCurve, CreditSpreads           |
//! | Currency     | Dollar_Strength, JPY_Signal, Risk_Currencies      |
//! | Commodity    | Gold_Signal                                       |

pub mod commodity;
pub mod currency;
pub mod equity;
pub mod fixed_income;
pub mod registry;
pub mod series;
pub mod types;
pub mod volatility;

pub use registry::IndicatorRegistry;
pub use types::{IndicatorDetails, IndicatorName, IndicatorResult, ScoreResult, Unavailable};

use crate::data::{MarketData, Symbol};

use series::require;

/// Run one scorer against the market data.
pub fn evaluate(name: IndicatorName, data: &MarketData) -> ScoreResult {
    match name {
        IndicatorName::SpxTrend => equity::spx_trend(&require(data, Symbol::Spx)?),
        IndicatorName::SectorRotation => equity::sector_rotation(
            &require(data, Symbol::Tech)?,
            &require(data, Symbol::Utilities)?,
        ),
        IndicatorName::SmallCapStrength => equity::small_cap_strength(
            &require(data, Symbol::Russell)?,
            &require(data, Symbol::Spx)?,
        ),
        IndicatorName::Vix => volatility::vix_signal(&require(data, Symbol::Vix)?),
        IndicatorName::VixTermStructure => {
            volatility::vix_term_structure(&require(data, Symbol::Vix)?)
        }
        IndicatorName::Treasury10Y => fixed_income::treasury_10y(),
        IndicatorName::YieldCurve => fixed_income::yield_curve(),
        IndicatorName::CreditSpreads => fixed_income::credit_spreads(
            &require(data, Symbol::HighYield)?,
            &require(data, Symbol::InvGrade)?,
        ),
        IndicatorName::DollarStrength => currency::dollar_strength(&require(data, Symbol::Dxy)?),
        IndicatorName::JpySignal => currency::jpy_signal(&require(data, Symbol::UsdJpy)?),
        IndicatorName::RiskCurrencies => {
            currency::risk_currencies(&require(data, Symbol::AudUsd)?)
        }
        IndicatorName::GoldSignal => commodity::gold_signal(
            &require(data, Symbol::Gold)?,
            &require(data, Symbol::Spx)?,
        ),
    }
}

/// Every symbol some indicator reads, deduplicated, in [`Symbol`] order.
pub fn required_symbols() -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = IndicatorName::ALL
        .iter()
        .flat_map(|name| name.inputs().iter().copied())
        .collect();
    symbols.sort();
    symbols.dedup();
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceSeries;
    use chrono::NaiveDate;

    #[test]
    fn test_required_symbols_cover_all_inputs() {
        assert_eq!(required_symbols(), Symbol::ALL.to_vec());
    }

    #[test]
    fn test_evaluate_reports_first_missing_input() {
        let data = MarketData::new();
        assert_eq!(
            evaluate(IndicatorName::SectorRotation, &data),
            Err(Unavailable::MissingSeries(Symbol::Tech))
        );
        assert!(evaluate(IndicatorName::Treasury10Y, &data).is_ok());
    }

    #[test]
    fn test_every_indicator_bounded_on_extreme_inputs() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let crash: Vec<f64> = (0..120).map(|i| 1000.0 * 0.97f64.powi(i)).collect();
        let melt_up: Vec<f64> = (0..120).map(|i| 10.0 * 1.03f64.powi(i)).collect();

        for closes in [&crash, &melt_up] {
            let data: MarketData = Symbol::ALL
                .iter()
                .map(|&s| (s, PriceSeries::from_closes(start, closes)))
                .collect();
            for name in IndicatorName::ALL {
                let result = evaluate(name, &data).unwrap();
                assert_eq!(result.name, name);
                assert!(
                    (-1.0..=1.0).contains(&result.score),
                    "{} out of range: {}",
                    name,
                    result.score
                );
            }
        }
    }
}
