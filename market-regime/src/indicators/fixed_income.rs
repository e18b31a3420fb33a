//! Fixed income indicators.
//!
//! Treasury_10Y and YieldCurve have no price input yet and report fixed
//! estimates. CreditSpreads proxies spread direction with the high-yield /
//! investment-grade ETF price ratio: a rising ratio means spreads tightening.

use super::series::{self, round_to, step_above};
use super::types::{IndicatorDetails, IndicatorName, IndicatorResult, ScoreResult, Unavailable};

const TREASURY_YIELD: f64 = 4.25;
const TREASURY_CHANGE_5D: f64 = 0.08;
const TREASURY_SCORE: f64 = 0.5;

/// 10Y minus 2Y, percentage points.
const CURVE_SPREAD: f64 = 0.10;
const CURVE_SCORE: f64 = -0.2;

const CREDIT_PERIOD: usize = 50;

const CREDIT_STEPS: [(f64, f64); 4] = [(3.0, 1.0), (1.0, 0.5), (-1.0, 0.0), (-3.0, -0.5)];

pub(crate) fn credit_score(deviation_pct: f64) -> f64 {
    step_above(deviation_pct, &CREDIT_STEPS, -1.0)
}

// TODO: score from a 10Y yield series once one is part of the input map.
pub fn treasury_10y() -> ScoreResult {
    Ok(IndicatorResult::new(
        IndicatorName::Treasury10Y,
        TREASURY_SCORE,
        IndicatorDetails::Treasury10Y {
            yield_pct: TREASURY_YIELD,
            change_5d: TREASURY_CHANGE_5D,
        },
    ))
}

pub fn yield_curve() -> ScoreResult {
    Ok(IndicatorResult::new(
        IndicatorName::YieldCurve,
        CURVE_SCORE,
        IndicatorDetails::YieldCurve {
            spread: CURVE_SPREAD,
            shape: "Normal".to_string(),
        },
    ))
}

/// HY/IG ratio for each aligned pair, matched from the most recent
/// observation backwards.
fn ratio_series(high_yield: &[f64], inv_grade: &[f64]) -> Vec<f64> {
    let mut ratios: Vec<f64> = high_yield
        .iter()
        .rev()
        .zip(inv_grade.iter().rev())
        .map(|(hy, ig)| hy / ig)
        .collect();
    ratios.reverse();
    ratios
}

/// Credit risk appetite from the HY/IG ratio against its 50-day mean.
pub fn credit_spreads(high_yield: &[f64], inv_grade: &[f64]) -> ScoreResult {
    let ratios = ratio_series(high_yield, inv_grade);
    let ratio = series::current(&ratios).ok_or(Unavailable::NonFinite("credit ratio"))?;
    let ratio = series::finite(ratio, "credit ratio")?;
    let ratio_ma = series::trailing_mean(&ratios, CREDIT_PERIOD)
        .ok_or(Unavailable::NonFinite("credit ratio mean"))?;
    let deviation = series::pct_deviation(ratio, ratio_ma)?;

    Ok(IndicatorResult::new(
        IndicatorName::CreditSpreads,
        credit_score(deviation),
        IndicatorDetails::CreditSpreads {
            hyg_lqd_ratio: round_to(ratio, 3),
            deviation_pct: round_to(deviation, 2),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_placeholders() {
        assert_eq!(treasury_10y().unwrap().score, 0.5);
        assert_eq!(yield_curve().unwrap().score, -0.2);
    }

    #[test]
    fn test_credit_score_boundaries() {
        assert_eq!(credit_score(3.5), 1.0);
        assert_eq!(credit_score(3.0), 0.5);
        assert_eq!(credit_score(1.0), 0.0);
        assert_eq!(credit_score(-1.0), -0.5);
        assert_eq!(credit_score(-3.0), -1.0);
    }

    #[test]
    fn test_ratio_series_aligns_from_end() {
        let ratios = ratio_series(&[1.0, 2.0, 3.0, 4.0], &[2.0, 2.0]);
        assert_eq!(ratios, vec![1.5, 2.0]);
    }

    #[test]
    fn test_credit_spreads_tightening() {
        let mut hy = vec![80.0; 59];
        hy.push(88.0);
        let ig = vec![100.0; 60];
        let result = credit_spreads(&hy, &ig).unwrap();
        assert_eq!(result.score, 1.0);

        let IndicatorDetails::CreditSpreads {
            hyg_lqd_ratio,
            deviation_pct,
        } = result.details
        else {
            panic!("wrong details");
        };
        assert_relative_eq!(hyg_lqd_ratio, 0.88);
        assert_relative_eq!(deviation_pct, 9.78);
    }

    #[test]
    fn test_credit_spreads_flat() {
        let result = credit_spreads(&[80.0; 10], &[100.0; 10]).unwrap();
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_credit_spreads_zero_denominator() {
        assert!(credit_spreads(&[80.0, 81.0], &[100.0, 0.0]).is_err());
        // a bad historical pair poisons the mean
        assert!(credit_spreads(&[80.0, 81.0], &[0.0, 100.0]).is_err());
    }
}
