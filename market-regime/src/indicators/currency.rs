//! Currency indicators.
//!
//! A strong dollar and a strong yen are risk-off; a strong Australian dollar
//! is risk-on. All three are linear in the percent distance from a trailing
//! mean, clipped to [-1, 1].

use super::series::{self, clip, round_to};
use super::types::{IndicatorDetails, IndicatorName, IndicatorResult, ScoreResult, Unavailable};

const DOLLAR_PERIOD: usize = 50;
const DOLLAR_SCALE: f64 = 3.0;

const JPY_PERIOD: usize = 20;
const JPY_SCALE: f64 = 2.0;

const AUD_PERIOD: usize = 50;
const AUD_SCALE: f64 = 3.0;
const AUD_STRONG_SCORE: f64 = 0.3;

/// Current close and its percent distance from the trailing mean.
fn distance_from_mean(values: &[f64], period: usize) -> Result<(f64, f64), Unavailable> {
    let current = series::current(values).ok_or(Unavailable::NonFinite("price"))?;
    let mean = series::trailing_mean(values, period).ok_or(Unavailable::NonFinite("mean"))?;
    Ok((current, series::pct_deviation(current, mean)?))
}

/// Dollar index, inverted.
pub fn dollar_strength(dxy: &[f64]) -> ScoreResult {
    let (level, pct_from_ma) = distance_from_mean(dxy, DOLLAR_PERIOD)?;
    let score = -clip(pct_from_ma / DOLLAR_SCALE);

    Ok(IndicatorResult::new(
        IndicatorName::DollarStrength,
        round_to(score, 2),
        IndicatorDetails::DollarStrength {
            dxy: round_to(level, 2),
            pct_from_ma: round_to(pct_from_ma, 2),
        },
    ))
}

/// USDJPY rising means the yen is weakening, which is risk-on.
pub fn jpy_signal(usdjpy: &[f64]) -> ScoreResult {
    let (level, pct_from_ma) = distance_from_mean(usdjpy, JPY_PERIOD)?;
    let score = clip(pct_from_ma / JPY_SCALE);
    let trend = if score > 0.0 { "Risk-On" } else { "Risk-Off" };

    Ok(IndicatorResult::new(
        IndicatorName::JpySignal,
        round_to(score, 2),
        IndicatorDetails::JpySignal {
            usdjpy: round_to(level, 2),
            trend: trend.to_string(),
        },
    ))
}

/// AUDUSD as the commodity/growth currency proxy.
pub fn risk_currencies(audusd: &[f64]) -> ScoreResult {
    let (level, pct_from_ma) = distance_from_mean(audusd, AUD_PERIOD)?;
    let score = clip(pct_from_ma / AUD_SCALE);
    let strength = if score > AUD_STRONG_SCORE { "Strong" } else { "Weak" };

    Ok(IndicatorResult::new(
        IndicatorName::RiskCurrencies,
        round_to(score, 2),
        IndicatorDetails::RiskCurrencies {
            audusd: round_to(level, 4),
            strength: strength.to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dollar_strength_inverted() {
        // mean 100.06, current 2.94% above it: -(2.94 / 3) = -0.98
        let mut dxy = vec![100.0; 49];
        dxy.push(103.0);
        let result = dollar_strength(&dxy).unwrap();
        assert_relative_eq!(result.score, -0.98);
        assert_eq!(
            result.details,
            IndicatorDetails::DollarStrength {
                dxy: 103.0,
                pct_from_ma: 2.94
            }
        );
    }

    #[test]
    fn test_dollar_weakness_clipped() {
        let mut dxy = vec![100.0; 59];
        dxy.push(90.0);
        let result = dollar_strength(&dxy).unwrap();
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_jpy_signal() {
        let mut usdjpy = vec![150.0; 29];
        usdjpy.push(156.0);
        let result = jpy_signal(&usdjpy).unwrap();
        assert_eq!(result.score, 1.0);
        assert_eq!(
            result.details,
            IndicatorDetails::JpySignal {
                usdjpy: 156.0,
                trend: "Risk-On".to_string()
            }
        );

        let flat = jpy_signal(&[150.0; 20]).unwrap();
        assert_eq!(flat.score, 0.0);
        assert!(matches!(
            flat.details,
            IndicatorDetails::JpySignal { ref trend, .. } if trend == "Risk-Off"
        ));
    }

    #[test]
    fn test_risk_currencies_linear() {
        // short series: mean of [0.64, 0.66] is 0.65, current 0.66 is +1.54%
        let result = risk_currencies(&[0.64, 0.66]).unwrap();
        assert_relative_eq!(result.score, 0.51);
        assert_eq!(
            result.details,
            IndicatorDetails::RiskCurrencies {
                audusd: 0.66,
                strength: "Strong".to_string()
            }
        );
    }

    #[test]
    fn test_risk_currencies_weak() {
        let result = risk_currencies(&[0.66, 0.65]).unwrap();
        assert!(result.score < 0.0);
        assert!(matches!(
            result.details,
            IndicatorDetails::RiskCurrencies { ref strength, .. } if strength == "Weak"
        ));
    }

    #[test]
    fn test_labels_use_unrounded_score() {
        // ~0.004 rounds to 0.0 but is still a rising USDJPY
        let mut usdjpy = vec![150.0; 19];
        usdjpy.push(150.012);
        let result = jpy_signal(&usdjpy).unwrap();
        assert_eq!(result.score, 0.0);
        let IndicatorDetails::JpySignal { trend, .. } = result.details else {
            panic!("wrong details");
        };
        assert_eq!(trend, "Risk-On");

        // ~0.302 rounds to 0.30 but clears the strong threshold
        let mut audusd = vec![1.0; 49];
        audusd.push(1.00925);
        let result = risk_currencies(&audusd).unwrap();
        assert_eq!(result.score, 0.3);
        let IndicatorDetails::RiskCurrencies { strength, .. } = result.details else {
            panic!("wrong details");
        };
        assert_eq!(strength, "Strong");
    }
}
