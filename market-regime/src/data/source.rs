//! Price series acquisition.
//!
//! The analyzer never fetches data itself. A [`SeriesSource`] hands it a
//! fully materialized [`MarketData`] map; symbols the source cannot supply are
//! simply absent and the dependent indicators report themselves unavailable.
//!
//! [`JsonFileSource`] reads a snapshot file of the form
//!
//! ```json
//! {
//!   "SPX": [{"date": "2024-01-02", "close": 4742.83}, ...],
//!   "^VIX": [{"date": "2024-01-02", "close": 13.20}, ...]
//! }
//! ```
//!
//! Keys may be logical names or vendor tickers. Unknown keys are skipped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{MarketData, PricePoint, PriceSeries, Symbol};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supplies price series for a set of symbols.
pub trait SeriesSource {
    /// Fetch whatever subset of `symbols` is available.
    ///
    /// Missing symbols are not an error; only a failure to read the source at
    /// all is.
    fn fetch(&self, symbols: &[Symbol]) -> Result<MarketData, SourceError>;
}

/// Acquisition rules applied to raw series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Calendar days kept before each series' last date.
    pub lookback_days: i64,
    /// Series with fewer points than this are dropped as insufficient.
    pub min_observations: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            lookback_days: 180,
            min_observations: 21,
        }
    }
}

impl SourceConfig {
    /// Apply the acquisition rules to a raw series.
    ///
    /// Drops non-finite and non-positive closes, trims to the lookback window
    /// and returns `None` when too few points remain.
    pub fn clean(&self, symbol: Symbol, points: Vec<PricePoint>) -> Option<PriceSeries> {
        let raw_len = points.len();
        let valid: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| p.close.is_finite() && p.close > 0.0)
            .collect();
        if valid.len() < raw_len {
            debug!("{}: dropped {} invalid closes", symbol, raw_len - valid.len());
        }

        let series = PriceSeries::new(valid);
        // a window reaching past the calendar keeps everything
        let start = series.last_date().and_then(|last| {
            TimeDelta::try_days(self.lookback_days)
                .and_then(|window| last.checked_sub_signed(window))
        });
        let series = match start {
            Some(start) => series.since(start),
            None => series,
        };

        if series.len() < self.min_observations {
            warn!(
                "{}: insufficient data ({} points, need {})",
                symbol,
                series.len(),
                self.min_observations
            );
            return None;
        }

        Some(series)
    }
}

/// Source backed by series already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    data: MarketData,
}

impl InMemorySource {
    pub fn new(data: MarketData) -> Self {
        Self { data }
    }
}

impl SeriesSource for InMemorySource {
    fn fetch(&self, symbols: &[Symbol]) -> Result<MarketData, SourceError> {
        Ok(symbols
            .iter()
            .filter_map(|&symbol| self.data.get(symbol).map(|s| (symbol, s.clone())))
            .collect())
    }
}

/// Source reading a JSON snapshot file.
pub struct JsonFileSource {
    path: PathBuf,
    config: SourceConfig,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config: SourceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SourceConfig) -> Self {
        self.config = config;
        self
    }

    fn read_raw(&self) -> Result<BTreeMap<String, Vec<PricePoint>>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::FileNotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SeriesSource for JsonFileSource {
    fn fetch(&self, symbols: &[Symbol]) -> Result<MarketData, SourceError> {
        let raw = self.read_raw()?;
        let mut data = MarketData::new();

        for (key, points) in raw {
            let Some(symbol) = Symbol::from_str(&key) else {
                warn!("Skipping unknown series '{}'", key);
                continue;
            };
            if !symbols.contains(&symbol) {
                continue;
            }
            if data.contains(symbol) {
                warn!("Duplicate series for {} under '{}', keeping the first", symbol, key);
                continue;
            }
            if let Some(series) = self.config.clean(symbol, points) {
                debug!("{}: {} points", symbol, series.len());
                data.insert(symbol, series);
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn points(n: usize, close: f64) -> Vec<PricePoint> {
        PriceSeries::from_closes(start(), &vec![close; n])
            .points()
            .to_vec()
    }

    #[test]
    fn test_clean_drops_short_series() {
        let config = SourceConfig::default();
        assert!(config.clean(Symbol::Spx, points(20, 100.0)).is_none());
        assert_eq!(config.clean(Symbol::Spx, points(21, 100.0)).unwrap().len(), 21);
    }

    #[test]
    fn test_clean_drops_invalid_closes() {
        let config = SourceConfig {
            lookback_days: 180,
            min_observations: 1,
        };
        let mut raw = points(3, 100.0);
        raw[0].close = f64::NAN;
        raw[1].close = 0.0;
        let series = config.clean(Symbol::Spx, raw).unwrap();
        assert_eq!(series.closes(), vec![100.0]);
    }

    #[test]
    fn test_clean_trims_to_lookback() {
        let config = SourceConfig {
            lookback_days: 10,
            min_observations: 1,
        };
        let series = config.clean(Symbol::Vix, points(30, 15.0)).unwrap();
        // last date minus 10 days, inclusive
        assert_eq!(series.len(), 11);
    }

    #[test]
    fn test_clean_oversized_lookback_keeps_everything() {
        for lookback_days in [1_000_000_000, i64::MAX] {
            let config = SourceConfig {
                lookback_days,
                min_observations: 1,
            };
            let series = config.clean(Symbol::Spx, points(30, 100.0)).unwrap();
            assert_eq!(series.len(), 30);
        }
    }

    #[test]
    fn test_in_memory_source_filters_symbols() {
        let data = MarketData::new()
            .with(Symbol::Spx, PriceSeries::from_closes(start(), &[1.0]))
            .with(Symbol::Gold, PriceSeries::from_closes(start(), &[2.0]));
        let source = InMemorySource::new(data);

        let fetched = source.fetch(&[Symbol::Gold, Symbol::Vix]).unwrap();
        assert_eq!(fetched.symbols().collect::<Vec<_>>(), vec![Symbol::Gold]);
    }

    #[test]
    fn test_json_source_missing_file() {
        let source = JsonFileSource::new("does/not/exist.json");
        let err = source.fetch(&Symbol::ALL).unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound(_)));
    }
}
