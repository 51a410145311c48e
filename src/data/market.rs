use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;
use crate::config::ChartConfig;
use crate::data::types::{ChartPoint, Quote, Scenario};

/// Static watchlist quotes.
#[derive(Debug, Clone)]
pub struct QuoteBoard {
    quotes: Vec<Quote>,
}

impl QuoteBoard {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// The S&P 500 watchlist shown on the trader page.
    pub fn watchlist() -> Self {
        let quotes = [
            ("SPX", "S&P 500", 4500.50, 1.2),
            ("AAPL", "Apple Inc.", 178.32, -0.5),
            ("TSLA", "Tesla Inc.", 242.84, 2.8),
            ("GOOGL", "Alphabet", 138.21, 0.9),
            ("MSFT", "Microsoft", 378.91, 1.5),
        ]
        .into_iter()
        .map(|(symbol, name, price, change_pct)| Quote {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change_pct,
        })
        .collect();

        Self::new(quotes)
    }

    pub fn lookup(&self, symbol: &str) -> Option<&Quote> {
        self.quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }
}

pub fn scenarios() -> Vec<Scenario> {
    [
        (
            1,
            "2008 Financial Crisis",
            "📉",
            "Navigate through the housing market collapse and global financial meltdown.",
            "Hard",
            "Simulate 2008 financial crisis market conditions",
        ),
        (
            2,
            "Tech Boom 2020",
            "🚀",
            "Ride the wave of pandemic-era tech stock surge.",
            "Medium",
            "Simulate 2020 tech stock boom conditions",
        ),
        (
            3,
            "Alien Invasion",
            "👽",
            "Unprecedented event: How would markets react to first contact?",
            "Extreme",
            "Simulate alien invasion market scenario with extreme volatility",
        ),
    ]
    .into_iter()
    .map(|(id, name, icon, description, difficulty, ai_prompt)| Scenario {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        difficulty: difficulty.to_string(),
        ai_prompt: ai_prompt.to_string(),
    })
    .collect()
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("Chart needs at least one point")]
    NoPoints,

    #[error("Invalid base price: {0}")]
    InvalidBasePrice(f64),

    #[error("Invalid step: {0}")]
    InvalidStep(f64),
}

/// Synthetic daily price series for display only.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn generate(config: &ChartConfig) -> Result<Self, ChartError> {
        let mut rng = rand::thread_rng();
        Self::generate_with(config, Utc::now(), &mut rng)
    }

    /// Random walk of `config.points` daily samples ending the day before `now`.
    /// Each sample moves the previous value by `(u - 0.5) * step`, `u ~ U[0, 1)`.
    pub fn generate_with<R: Rng>(
        config: &ChartConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, ChartError> {
        if config.points == 0 {
            return Err(ChartError::NoPoints);
        }
        if !(config.base_price.is_finite() && config.base_price > 0.0) {
            return Err(ChartError::InvalidBasePrice(config.base_price));
        }
        if !(config.step.is_finite() && config.step >= 0.0) {
            return Err(ChartError::InvalidStep(config.step));
        }

        let mut value = config.base_price;
        let points = (0..config.points)
            .map(|i| {
                let days_back = (config.points - i) as i64;
                value += (rng.gen::<f64>() - 0.5) * config.step;
                ChartPoint {
                    time: now - Duration::days(days_back),
                    value,
                }
            })
            .collect();

        Ok(Self { points })
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&ChartPoint> {
        self.points.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let board = QuoteBoard::watchlist();
        assert_eq!(board.lookup("aapl").unwrap().price, 178.32);
        assert!(board.lookup("NVDA").is_none());
        assert_eq!(board.quotes().len(), 5);
    }

    #[test]
    fn test_scenarios_seeded() {
        let all = scenarios();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "2008 Financial Crisis");
        assert_eq!(all[2].difficulty, "Extreme");
    }

    #[test]
    fn test_random_walk_shape() {
        let config = ChartConfig::default();
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(7);
        let series = ChartSeries::generate_with(&config, now, &mut rng).unwrap();

        assert_eq!(series.points().len(), 100);
        assert_eq!(series.points()[0].time, now - Duration::days(100));
        assert_eq!(series.last().unwrap().time, now - Duration::days(1));

        let mut prev = config.base_price;
        for p in series.points() {
            assert!((p.value - prev).abs() <= config.step / 2.0);
            prev = p.value;
        }
    }

    #[test]
    fn test_invalid_chart_config() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();

        let config = ChartConfig { points: 0, ..ChartConfig::default() };
        assert_eq!(
            ChartSeries::generate_with(&config, now, &mut rng).unwrap_err(),
            ChartError::NoPoints
        );

        let config = ChartConfig { base_price: -1.0, ..ChartConfig::default() };
        assert!(ChartSeries::generate_with(&config, now, &mut rng).is_err());
    }
}
