use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub junior: JuniorConfig,
    #[serde(default)]
    pub teen: TeenConfig,
    #[serde(default)]
    pub trader: TraderConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JuniorConfig {
    #[serde(default = "default_junior_points")]
    pub seed_points: u64,
    #[serde(default = "default_advisory_secs")]
    pub advisory_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeenConfig {
    #[serde(default = "default_teen_points")]
    pub seed_points: u64,
    #[serde(default = "default_result_secs")]
    pub result_display_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraderConfig {
    #[serde(default = "default_balance")]
    pub initial_balance_usd: f64,
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    #[serde(default = "default_order_amount")]
    pub default_order_amount: f64,
    #[serde(default = "default_advisory_secs")]
    pub advisory_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default = "default_chart_points")]
    pub points: usize,
    #[serde(default = "default_step")]
    pub step: f64,
}

/// Mock latency override. When unset each AI operation uses its own delay.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AiConfig {
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_junior_points() -> u64 { 150 }
fn default_teen_points() -> u64 { 250 }
fn default_result_secs() -> u64 { 3 }
fn default_balance() -> f64 { 10_000.0 }
fn default_symbol() -> String { "SPX".to_string() }
fn default_order_amount() -> f64 { 100.0 }
fn default_advisory_secs() -> u64 { 5 }
fn default_base_price() -> f64 { 4500.0 }
fn default_chart_points() -> usize { 100 }
fn default_step() -> f64 { 50.0 }
fn default_event_buffer() -> usize { 100 }

impl Default for JuniorConfig {
    fn default() -> Self {
        Self {
            seed_points: default_junior_points(),
            advisory_secs: default_advisory_secs(),
        }
    }
}

impl JuniorConfig {
    pub fn advisory_duration(&self) -> Duration {
        Duration::from_secs(self.advisory_secs)
    }
}

impl Default for TeenConfig {
    fn default() -> Self {
        Self {
            seed_points: default_teen_points(),
            result_display_secs: default_result_secs(),
        }
    }
}

impl TeenConfig {
    pub fn result_display(&self) -> Duration {
        Duration::from_secs(self.result_display_secs)
    }
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self {
            initial_balance_usd: default_balance(),
            default_symbol: default_symbol(),
            default_order_amount: default_order_amount(),
            advisory_secs: default_advisory_secs(),
        }
    }
}

impl TraderConfig {
    pub fn advisory_duration(&self) -> Duration {
        Duration::from_secs(self.advisory_secs)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
            points: default_chart_points(),
            step: default_step(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { event_buffer: default_event_buffer() }
    }
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub config_path: String,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::warn!("Config file {} not found, using defaults", path);
            Ok(Self::default())
        }
    }
}

impl EnvConfig {
    pub fn load() -> Self {
        dotenv::dotenv().ok();

        Self {
            config_path: std::env::var("ALPHIN_CONFIG")
                .unwrap_or_else(|_| "config.toml".to_string()),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_seeded_pages() {
        let config = Config::default();
        assert_eq!(config.junior.seed_points, 150);
        assert_eq!(config.teen.seed_points, 250);
        assert_eq!(config.teen.result_display(), Duration::from_secs(3));
        assert_eq!(config.trader.initial_balance_usd, 10_000.0);
        assert_eq!(config.trader.default_symbol, "SPX");
        assert_eq!(config.trader.advisory_duration(), Duration::from_secs(5));
        assert_eq!(config.chart.points, 100);
        assert!(config.ai.latency_ms.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            [trader]
            initial_balance_usd = 2500.0

            [ai]
            latency_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.trader.initial_balance_usd, 2500.0);
        assert_eq!(config.trader.default_order_amount, 100.0);
        assert_eq!(config.junior.seed_points, 150);
        assert_eq!(config.ai.latency_ms, Some(10));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(Config::parse("[trader\ninitial_balance_usd = ").is_err());
    }
}
