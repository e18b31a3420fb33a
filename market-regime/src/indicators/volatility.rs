//! Volatility indicators.
//!
//! Both read the VIX series:
//! - VIX: absolute level, nudged by the 5-day change (a spike is worse than
//!   the level alone, a collapse is better)
//! - VIX_TermStructure: proxy using the level against its 50-day mean, since
//!   futures curves are not part of the input

use super::series::{self, clip, round_to, step_below};
use super::types::{IndicatorDetails, IndicatorName, IndicatorResult, ScoreResult, Unavailable};

/// Offset of the close five sessions before the current one.
const CHANGE_OFFSET: usize = 6;

const TERM_STRUCTURE_PERIOD: usize = 50;

const LEVEL_STEPS: [(f64, f64); 5] = [(15.0, 0.9), (18.0, 0.5), (20.0, 0.2), (25.0, -0.2), (30.0, -0.6)];

/// 5-day change above this (%) is a spike.
const SPIKE_PCT: f64 = 15.0;
const SPIKE_PENALTY: f64 = 0.3;

/// 5-day change below this (%) is a collapse.
const COLLAPSE_PCT: f64 = -10.0;
const COLLAPSE_BONUS: f64 = 0.2;

const STRUCTURE_STEPS: [(f64, f64); 3] = [(-10.0, 1.0), (-5.0, 0.5), (5.0, 0.0)];

pub(crate) fn level_score(level: f64) -> f64 {
    step_below(level, &LEVEL_STEPS, -1.0)
}

pub(crate) fn adjust_for_change(score: f64, change_5d: f64) -> f64 {
    let adjusted = if change_5d > SPIKE_PCT {
        score - SPIKE_PENALTY
    } else if change_5d < COLLAPSE_PCT {
        score + COLLAPSE_BONUS
    } else {
        score
    };
    clip(adjusted)
}

pub(crate) fn structure_score(vix_vs_ma: f64) -> f64 {
    step_below(vix_vs_ma, &STRUCTURE_STEPS, -0.8)
}

/// VIX level and short-term direction.
pub fn vix_signal(vix: &[f64]) -> ScoreResult {
    let level = series::current(vix).ok_or(Unavailable::NonFinite("level"))?;

    // no change without five sessions of history or with a zero baseline
    let baseline = series::from_end(vix, CHANGE_OFFSET).unwrap_or(0.0);
    let change_5d = if vix.len() >= CHANGE_OFFSET && baseline != 0.0 {
        series::pct_return(level, baseline)?
    } else {
        0.0
    };

    let score = adjust_for_change(level_score(level), change_5d);

    Ok(IndicatorResult::new(
        IndicatorName::Vix,
        round_to(score, 2),
        IndicatorDetails::Vix {
            level: round_to(level, 2),
            change_5d: round_to(change_5d, 2),
        },
    ))
}

/// VIX relative to its own 50-day mean.
pub fn vix_term_structure(vix: &[f64]) -> ScoreResult {
    let level = series::current(vix).ok_or(Unavailable::NonFinite("level"))?;
    let ma_50 = series::trailing_mean(vix, TERM_STRUCTURE_PERIOD)
        .ok_or(Unavailable::NonFinite("mean"))?;
    let deviation = series::pct_deviation(level, ma_50)?;

    let structure = if deviation < 0.0 { "Normal" } else { "Elevated" };

    Ok(IndicatorResult::new(
        IndicatorName::VixTermStructure,
        structure_score(deviation),
        IndicatorDetails::VixTermStructure {
            vix_vs_ma: round_to(deviation, 2),
            structure: structure.to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_score_boundaries() {
        assert_eq!(level_score(12.0), 0.9);
        assert_eq!(level_score(15.0), 0.5);
        assert_eq!(level_score(18.0), 0.2);
        assert_eq!(level_score(20.0), -0.2);
        assert_eq!(level_score(25.0), -0.6);
        assert_eq!(level_score(30.0), -1.0);
        assert_eq!(level_score(80.0), -1.0);
    }

    #[test]
    fn test_change_adjustment_is_strict_and_clipped() {
        assert_eq!(adjust_for_change(0.5, 15.0), 0.5);
        assert_eq!(adjust_for_change(0.5, -10.0), 0.5);
        assert_eq!(adjust_for_change(0.9, -25.0), 1.0);
        assert_eq!(adjust_for_change(-1.0, 40.0), -1.0);
        assert!((adjust_for_change(0.5, 20.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_structure_score_boundaries() {
        assert_eq!(structure_score(-10.5), 1.0);
        assert_eq!(structure_score(-10.0), 0.5);
        assert_eq!(structure_score(-5.0), 0.0);
        assert_eq!(structure_score(4.99), 0.0);
        assert_eq!(structure_score(5.0), -0.8);
    }

    #[test]
    fn test_vix_spike_penalized() {
        // 16 -> 22: level 22 scores -0.2, +37.5% in five sessions
        let vix = [16.0, 16.0, 16.0, 16.0, 18.0, 20.0, 22.0];
        let result = vix_signal(&vix).unwrap();
        assert_eq!(result.score, -0.5);
        assert_eq!(
            result.details,
            IndicatorDetails::Vix {
                level: 22.0,
                change_5d: 37.5
            }
        );
    }

    #[test]
    fn test_vix_short_series_has_no_change() {
        let result = vix_signal(&[30.0, 14.0]).unwrap();
        assert_eq!(result.score, 0.9);
        assert_eq!(
            result.details,
            IndicatorDetails::Vix {
                level: 14.0,
                change_5d: 0.0
            }
        );
    }

    #[test]
    fn test_vix_term_structure() {
        let mut vix = vec![20.0; 49];
        vix.push(12.0);
        let result = vix_term_structure(&vix).unwrap();
        assert_eq!(result.score, 1.0);
        assert!(matches!(
            result.details,
            IndicatorDetails::VixTermStructure { ref structure, .. } if structure == "Normal"
        ));

        let mut vix = vec![15.0; 10];
        vix.push(30.0);
        let result = vix_term_structure(&vix).unwrap();
        assert_eq!(result.score, -0.8);
    }

    #[test]
    fn test_vix_zero_baseline_scores_level_only() {
        let result = vix_signal(&[0.0, 14.0, 14.0, 14.0, 14.0, 14.0]).unwrap();
        assert_eq!(result.score, 0.9);
        assert_eq!(
            result.details,
            IndicatorDetails::Vix {
                level: 14.0,
                change_5d: 0.0
            }
        );

        let result = vix_signal(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 20.0]).unwrap();
        assert_eq!(result.score, -0.2);
    }
}
