//! Commodity indicators.

use super::series::{self, clip, round_to};
use super::types::{IndicatorDetails, IndicatorName, IndicatorResult, ScoreResult};

const RELATIVE_LOOKBACK: usize = 21;
const RELATIVE_SCALE: f64 = 10.0;

/// Gold outperforming equities is a flight to safety, so the score is the
/// inverted 21-day relative return.
pub fn gold_signal(gold: &[f64], spx: &[f64]) -> ScoreResult {
    let gold_return = series::trailing_return(gold, RELATIVE_LOOKBACK)?;
    let spx_return = series::trailing_return(spx, RELATIVE_LOOKBACK)?;
    let relative = gold_return - spx_return;

    Ok(IndicatorResult::new(
        IndicatorName::GoldSignal,
        round_to(-clip(relative / RELATIVE_SCALE), 2),
        IndicatorDetails::GoldSignal {
            gold_return: round_to(gold_return, 2),
            relative_to_spx: round_to(relative, 2),
        },
    ))
}
