//! Core data types for regime analysis.
//!
//! Every indicator works on daily closes. A [`PriceSeries`] holds the closes
//! for one [`Symbol`], ascending by date, and [`MarketData`] maps symbols to
//! their series for a single analysis run.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Logical market series consumed by the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// S&P 500 index.
    #[serde(rename = "SPX")]
    Spx,
    /// Russell 2000 small-cap index.
    #[serde(rename = "Russell")]
    Russell,
    /// Technology sector ETF.
    #[serde(rename = "Tech")]
    Tech,
    /// Utilities sector ETF.
    #[serde(rename = "Utilities")]
    Utilities,
    /// CBOE volatility index.
    #[serde(rename = "VIX")]
    Vix,
    /// High-yield corporate bond ETF.
    #[serde(rename = "HighYield")]
    HighYield,
    /// Investment-grade corporate bond ETF.
    #[serde(rename = "InvGrade")]
    InvGrade,
    /// US dollar index.
    #[serde(rename = "DXY")]
    Dxy,
    /// US dollar / Japanese yen.
    #[serde(rename = "USDJPY")]
    UsdJpy,
    /// Australian dollar / US dollar.
    #[serde(rename = "AUDUSD")]
    AudUsd,
    /// Gold front-month future.
    #[serde(rename = "Gold")]
    Gold,
}

impl Symbol {
    pub const ALL: [Symbol; 11] = [
        Symbol::Spx,
        Symbol::Russell,
        Symbol::Tech,
        Symbol::Utilities,
        Symbol::Vix,
        Symbol::HighYield,
        Symbol::InvGrade,
        Symbol::Dxy,
        Symbol::UsdJpy,
        Symbol::AudUsd,
        Symbol::Gold,
    ];

    /// Parse a symbol from its logical name or its vendor ticker.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|symbol| symbol.as_str() == s || symbol.ticker() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spx => "SPX",
            Self::Russell => "Russell",
            Self::Tech => "Tech",
            Self::Utilities => "Utilities",
            Self::Vix => "VIX",
            Self::HighYield => "HighYield",
            Self::InvGrade => "InvGrade",
            Self::Dxy => "DXY",
            Self::UsdJpy => "USDJPY",
            Self::AudUsd => "AUDUSD",
            Self::Gold => "Gold",
        }
    }

    /// Vendor ticker the series is usually downloaded under.
    pub fn ticker(&self) -> &'static str {
        match self {
            Self::Spx => "^GSPC",
            Self::Russell => "^RUT",
            Self::Tech => "XLK",
            Self::Utilities => "XLU",
            Self::Vix => "^VIX",
            Self::HighYield => "HYG",
            Self::InvGrade => "LQD",
            Self::Dxy => "DX-Y.NYB",
            Self::UsdJpy => "USDJPY=X",
            Self::AudUsd => "AUDUSD=X",
            Self::Gold => "GC=F",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closes for one symbol, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting the points by date.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// Build a series of consecutive calendar days starting at `start`.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + Duration::days(i as i64), close))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Close prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Points dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start)
                .copied()
                .collect(),
        }
    }
}

/// All series available to one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketData {
    series: BTreeMap<Symbol, PriceSeries>,
}

impl MarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the series for a symbol.
    pub fn insert(&mut self, symbol: Symbol, series: PriceSeries) -> Option<PriceSeries> {
        self.series.insert(symbol, series)
    }

    pub fn with(mut self, symbol: Symbol, series: PriceSeries) -> Self {
        self.insert(symbol, series);
        self
    }

    pub fn remove(&mut self, symbol: Symbol) -> Option<PriceSeries> {
        self.series.remove(&symbol)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&PriceSeries> {
        self.series.get(&symbol)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.series.contains_key(&symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.series.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<(Symbol, PriceSeries)> for MarketData {
    fn from_iter<I: IntoIterator<Item = (Symbol, PriceSeries)>>(iter: I) -> Self {
        Self {
            series: iter.into_iter().collect(),
        }
    }
}
