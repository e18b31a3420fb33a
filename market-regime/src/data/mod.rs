pub mod source;
pub mod types;

pub use source::{InMemorySource, JsonFileSource, SeriesSource, SourceConfig, SourceError};
pub use types::{MarketData, PricePoint, PriceSeries, Symbol};
