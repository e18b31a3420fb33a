//! Value extraction and transforms shared by the scorers.
//!
//! Scorers work on plain close slices. "Current" is the last close; a lookback
//! offset counts back from the end (offset 1 is the current close) and falls
//! back to the first close when the series is too short.

use statrs::statistics::Statistics;

use crate::data::{MarketData, PriceSeries, Symbol};

use super::types::Unavailable;

/// Look up a series and return its closes.
pub fn require(data: &MarketData, symbol: Symbol) -> Result<Vec<f64>, Unavailable> {
    let series = data.get(symbol).ok_or(Unavailable::MissingSeries(symbol))?;
    closes(series, symbol)
}

/// Closes of a series, rejecting empty ones.
pub fn closes(series: &PriceSeries, symbol: Symbol) -> Result<Vec<f64>, Unavailable> {
    if series.is_empty() {
        return Err(Unavailable::EmptySeries(symbol));
    }
    Ok(series.closes())
}

/// Most recent close.
pub fn current(values: &[f64]) -> Option<f64> {
    values.last().copied()
}

/// Close `offset` observations back from the end, or the first close when
/// the series is shorter than `offset`.
pub fn from_end(values: &[f64], offset: usize) -> Option<f64> {
    let offset = offset.max(1);
    if values.len() >= offset {
        values.get(values.len() - offset).copied()
    } else {
        values.first().copied()
    }
}

/// Mean of the last `period` closes, or of all closes when fewer exist.
pub fn trailing_mean(values: &[f64], period: usize) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let window = if values.len() >= period {
        &values[values.len() - period..]
    } else {
        values
    };
    Some(window.iter().mean())
}

/// `((current - baseline) / baseline) * 100`.
pub fn pct_deviation(current: f64, baseline: f64) -> Result<f64, Unavailable> {
    finite(((current - baseline) / baseline) * 100.0, "percent deviation")
}

/// `((later / earlier) - 1) * 100`.
pub fn pct_return(later: f64, earlier: f64) -> Result<f64, Unavailable> {
    finite(((later / earlier) - 1.0) * 100.0, "return")
}

/// Return over `lookback` observations, from [`from_end`] to the current close.
pub fn trailing_return(values: &[f64], lookback: usize) -> Result<f64, Unavailable> {
    let later = current(values).ok_or(Unavailable::NonFinite("return"))?;
    let earlier = from_end(values, lookback).ok_or(Unavailable::NonFinite("return"))?;
    pct_return(later, earlier)
}

pub fn finite(value: f64, metric: &'static str) -> Result<f64, Unavailable> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Unavailable::NonFinite(metric))
    }
}

/// Clamp to [-1, 1].
pub fn clip(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// First score whose threshold `value` strictly exceeds, else `floor`.
pub fn step_above(value: f64, steps: &[(f64, f64)], floor: f64) -> f64 {
    steps
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, score)| *score)
        .unwrap_or(floor)
}

/// First score whose threshold `value` is strictly below, else `ceiling`.
pub fn step_below(value: f64, steps: &[(f64, f64)], ceiling: f64) -> f64 {
    steps
        .iter()
        .find(|(threshold, _)| value < *threshold)
        .map(|(_, score)| *score)
        .unwrap_or(ceiling)
}
