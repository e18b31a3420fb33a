pub mod analysis;
pub mod data;
pub mod indicators;
pub mod regime;

// Re-export commonly used types
pub use analysis::{AnalysisResult, RegimeAnalyzer, UnavailableIndicator};
pub use data::{
    InMemorySource, JsonFileSource, MarketData, PricePoint, PriceSeries, SeriesSource,
    SourceConfig, SourceError, Symbol,
};
pub use indicators::{
    IndicatorDetails, IndicatorName, IndicatorRegistry, IndicatorResult, Unavailable,
};
pub use regime::{
    Category, ConfigError, MarketRegime, RegimeClassifier, RegimeConfig, RegimeGuidance,
};
