//! Equity indicators.
//!
//! | Indicator         | Metric                                 | Score            |
//! |-------------------|----------------------------------------|------------------|
//! | SPX_Trend         | % from 200-day mean                    | step, see table  |
//! | Sector_Rotation   | tech / utilities price ratio           | step, see table  |
//! | SmallCap_Strength | 21-day Russell return minus SPX return | clip(rs / 5)     |

use super::series::{self, clip, round_to, step_above};
use super::types::{IndicatorDetails, IndicatorName, IndicatorResult, ScoreResult, Unavailable};

/// Trend baseline length (days).
const TREND_PERIOD: usize = 200;

/// Relative strength lookback (days).
const STRENGTH_LOOKBACK: usize = 21;

const TREND_STEPS: [(f64, f64); 5] = [(5.0, 1.0), (2.0, 0.6), (0.0, 0.3), (-2.0, -0.3), (-5.0, -0.6)];

const ROTATION_STEPS: [(f64, f64); 5] = [(2.8, 1.0), (2.5, 0.6), (2.2, 0.3), (2.0, 0.0), (1.8, -0.5)];

pub(crate) fn trend_score(pct_from_ma: f64) -> f64 {
    step_above(pct_from_ma, &TREND_STEPS, -1.0)
}

pub(crate) fn rotation_score(ratio: f64) -> f64 {
    step_above(ratio, &ROTATION_STEPS, -1.0)
}

/// S&P 500 distance from its 200-day mean.
pub fn spx_trend(spx: &[f64]) -> ScoreResult {
    let price = series::current(spx).ok_or(Unavailable::NonFinite("price"))?;
    let ma_200 = series::trailing_mean(spx, TREND_PERIOD).ok_or(Unavailable::NonFinite("mean"))?;
    let pct_from_200ma = series::pct_deviation(price, ma_200)?;

    Ok(IndicatorResult::new(
        IndicatorName::SpxTrend,
        trend_score(pct_from_200ma),
        IndicatorDetails::SpxTrend {
            value: round_to(price, 2),
            pct_from_200ma: round_to(pct_from_200ma, 2),
        },
    ))
}

/// Growth vs defensive sector leadership.
pub fn sector_rotation(tech: &[f64], utilities: &[f64]) -> ScoreResult {
    let tech_price = series::current(tech).ok_or(Unavailable::NonFinite("price"))?;
    let util_price = series::current(utilities).ok_or(Unavailable::NonFinite("price"))?;
    let ratio = series::finite(tech_price / util_price, "sector ratio")?;

    Ok(IndicatorResult::new(
        IndicatorName::SectorRotation,
        rotation_score(ratio),
        IndicatorDetails::SectorRotation {
            ratio: round_to(ratio, 2),
        },
    ))
}

/// Small caps outperforming large caps is risk appetite.
pub fn small_cap_strength(russell: &[f64], spx: &[f64]) -> ScoreResult {
    let rut_return = series::trailing_return(russell, STRENGTH_LOOKBACK)?;
    let spx_return = series::trailing_return(spx, STRENGTH_LOOKBACK)?;
    let relative_strength = rut_return - spx_return;

    Ok(IndicatorResult::new(
        IndicatorName::SmallCapStrength,
        round_to(clip(relative_strength / 5.0), 2),
        IndicatorDetails::SmallCapStrength {
            rut_return: round_to(rut_return, 2),
            relative_strength: round_to(relative_strength, 2),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trend_score_boundaries() {
        assert_eq!(trend_score(5.01), 1.0);
        assert_eq!(trend_score(5.0), 0.6);
        assert_eq!(trend_score(2.0), 0.3);
        assert_eq!(trend_score(0.0), -0.3);
        assert_eq!(trend_score(-2.0), -0.6);
        assert_eq!(trend_score(-5.0), -1.0);
        assert_eq!(trend_score(-40.0), -1.0);
    }

    #[test]
    fn test_rotation_score_boundaries() {
        assert_eq!(rotation_score(3.0), 1.0);
        assert_eq!(rotation_score(2.8), 0.6);
        assert_eq!(rotation_score(2.5), 0.3);
        assert_eq!(rotation_score(2.2), 0.0);
        assert_eq!(rotation_score(2.0), -0.5);
        assert_eq!(rotation_score(1.8), -1.0);
    }

    #[test]
    fn test_spx_trend_uses_full_mean_when_short() {
        // 150 closes: mean 100.067, price ~9.93% above it
        let mut spx = vec![100.0; 149];
        spx.push(110.0);
        let result = spx_trend(&spx).unwrap();
        assert_eq!(result.score, 1.0);

        let IndicatorDetails::SpxTrend { value, pct_from_200ma } = result.details else {
            panic!("wrong details");
        };
        assert_eq!(value, 110.0);
        assert_relative_eq!(pct_from_200ma, 9.93, epsilon = 1e-9);
    }

    #[test]
    fn test_spx_trend_only_uses_last_200() {
        // older history far below must not move the baseline
        let mut spx = vec![10.0; 50];
        spx.extend(vec![100.0; 200]);
        let result = spx_trend(&spx).unwrap();
        assert_eq!(result.score, -0.3);
    }

    #[test]
    fn test_spx_trend_single_point_is_flat() {
        let result = spx_trend(&[4500.0]).unwrap();
        assert_eq!(result.score, -0.3);
    }

    #[test]
    fn test_sector_rotation() {
        let result = sector_rotation(&[250.0, 260.0], &[95.0, 100.0]).unwrap();
        assert_eq!(result.score, 0.6);
        assert_eq!(result.details, IndicatorDetails::SectorRotation { ratio: 2.6 });

        assert!(sector_rotation(&[240.0], &[0.0]).is_err());
    }

    #[test]
    fn test_small_cap_strength_clips() {
        let mut russell = vec![100.0; 21];
        russell.push(130.0);
        let spx = vec![100.0; 22];
        let result = small_cap_strength(&russell, &spx).unwrap();
        assert_eq!(result.score, 1.0);

        let result = small_cap_strength(&spx, &russell).unwrap();
        assert_eq!(result.score, -1.0);
    }

    #[test]
    fn test_small_cap_strength_linear() {
        // Russell +4%, SPX +2% over 21 observations: rs = 2, score 0.4
        let mut russell = vec![100.0; 21];
        russell.push(104.0);
        let mut spx = vec![100.0; 21];
        spx.push(102.0);
        let result = small_cap_strength(&russell, &spx).unwrap();
        assert_relative_eq!(result.score, 0.4);
    }
}
