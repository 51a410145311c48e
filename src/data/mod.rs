pub mod market;
pub mod types;

pub use market::{ChartError, ChartSeries, QuoteBoard};
