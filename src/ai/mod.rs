//! AI capability boundary.
//!
//! Every operation takes a plain payload and returns a plain payload after
//! some latency. The only backend today is [`MockAiService`]; an HTTP backend
//! would implement [`AiService`] with the same request/response types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod mock;

pub use mock::MockAiService;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cohort {
    Junior,
    Teen,
    Trader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Map a display label ("Medium", "Extreme", ...) onto the three levels.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => Difficulty::Easy,
            "hard" | "extreme" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

// -- Trading assistant --------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantContext {
    pub symbol: Option<String>,
    pub balance: Option<f64>,
    pub open_positions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub message: String,
    pub suggestions: Vec<String>,
}

// -- Trade analysis -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAnalysis {
    pub analysis: String,
    pub rating: String,
    pub suggestions: Vec<String>,
    pub learning_points: Vec<String>,
}

// -- Learning path ------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub completed_lessons: Vec<u32>,
    pub current_level: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSuggestion {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    pub estimated_time: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub next_topics: Vec<TopicSuggestion>,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
}

// -- Market scenario ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub volatility: String,
    pub trend: String,
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub time: String,
    pub headline: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingConditions {
    pub cash: f64,
    pub positions: Vec<String>,
    pub market_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketScenario {
    pub scenario_name: String,
    pub difficulty: Difficulty,
    pub market_conditions: MarketConditions,
    pub news_events: Vec<NewsEvent>,
    pub challenges: Vec<String>,
    pub starting_conditions: StartingConditions,
}

// -- Portfolio analysis -------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub balance: f64,
    pub positions: Vec<TradeSummary>,
    pub risk_tolerance: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Positive,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_return: String,
    pub sharpe_ratio: f64,
    pub max_drawdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub overall_rating: String,
    pub diversification_score: u32,
    pub risk_level: String,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    pub performance_metrics: PerformanceMetrics,
}

// -- Swipe challenge ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedChallenge {
    pub category: String,
    pub question: String,
    pub correct_answer: bool,
    pub explanation: String,
    pub reward: u64,
    pub difficulty: Difficulty,
}

// -- Concept explanation ------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptExplanation {
    pub explanation: String,
    pub key_points: Vec<String>,
    pub quiz: Quiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiStatus {
    pub has_openai_key: bool,
    pub has_anthropic_key: bool,
    pub configured: bool,
}

/// Backend-agnostic interface for the AI features.
#[async_trait]
pub trait AiService: Send + Sync {
    async fn trading_assistant(
        &self,
        message: &str,
        context: &AssistantContext,
    ) -> AiResult<AssistantReply>;

    async fn analyze_trade(&self, trade: &TradeSummary) -> AiResult<TradeAnalysis>;

    async fn learning_path(&self, progress: &UserProgress) -> AiResult<LearningPath>;

    async fn market_scenario(
        &self,
        scenario_kind: &str,
        difficulty: Difficulty,
    ) -> AiResult<MarketScenario>;

    async fn analyze_portfolio(&self, portfolio: &PortfolioSnapshot) -> AiResult<PortfolioAnalysis>;

    async fn swipe_challenge(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> AiResult<GeneratedChallenge>;

    async fn explain_concept(&self, concept: &str, cohort: Cohort) -> AiResult<ConceptExplanation>;

    fn status(&self) -> AiStatus;

    fn backend_name(&self) -> &'static str;
}
