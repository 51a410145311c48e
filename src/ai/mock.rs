use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::{
    AiError, AiResult, AiService, AiStatus, AssistantContext, AssistantReply, Cohort,
    ConceptExplanation, Difficulty, GeneratedChallenge, Insight, InsightKind, LearningPath,
    MarketConditions, MarketScenario, NewsEvent, PerformanceMetrics, PortfolioAnalysis,
    PortfolioSnapshot, Quiz, StartingConditions, TopicSuggestion, TradeAnalysis, TradeSummary,
    UserProgress,
};
use crate::config::{AiConfig, EnvConfig};

const ASSISTANT_MS: u64 = 1000;
const TRADE_ANALYSIS_MS: u64 = 1500;
const LEARNING_PATH_MS: u64 = 1200;
const SCENARIO_MS: u64 = 2000;
const PORTFOLIO_MS: u64 = 1800;
const SWIPE_MS: u64 = 1000;
const EXPLAIN_MS: u64 = 1000;

/// Canned responses after an artificial delay. No network access.
#[derive(Debug, Clone, Default)]
pub struct MockAiService {
    latency_override: Option<Duration>,
    has_openai_key: bool,
    has_anthropic_key: bool,
}

impl MockAiService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(env: &EnvConfig, ai: &AiConfig) -> Self {
        Self {
            latency_override: ai.latency_ms.map(Duration::from_millis),
            has_openai_key: env.openai_api_key.is_some(),
            has_anthropic_key: env.anthropic_api_key.is_some(),
        }
    }

    /// Use the same delay for every operation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency_override = Some(latency);
        self
    }

    async fn simulate<P: Serialize + ?Sized>(
        &self,
        operation: &str,
        default_ms: u64,
        payload: &P,
    ) -> AiResult<()> {
        let body = serde_json::to_string(payload)?;
        let delay = self
            .latency_override
            .unwrap_or_else(|| Duration::from_millis(default_ms));

        debug!("mock {} request={} delay={:?}", operation, body, delay);
        tokio::time::sleep(delay).await;
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> AiResult<()> {
    if value.trim().is_empty() {
        return Err(AiError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl AiService for MockAiService {
    async fn trading_assistant(
        &self,
        message: &str,
        context: &AssistantContext,
    ) -> AiResult<AssistantReply> {
        require_text("message", message)?;
        self.simulate("trading_assistant", ASSISTANT_MS, context).await?;

        Ok(AssistantReply {
            message: format!(
                "I understand you're asking about: \"{}\". In the full version, I would provide personalized guidance based on your trading history and current market conditions.",
                message
            ),
            suggestions: strings(&[
                "Learn about risk management",
                "Review market trends",
                "Practice with paper trading",
            ]),
        })
    }

    async fn analyze_trade(&self, trade: &TradeSummary) -> AiResult<TradeAnalysis> {
        require_text("symbol", &trade.symbol)?;
        self.simulate("analyze_trade", TRADE_ANALYSIS_MS, trade).await?;

        Ok(TradeAnalysis {
            analysis: format!(
                "Your {} order for {} shares of {} at ${} shows good timing. Consider setting a stop-loss at 5% below entry.",
                trade.side, trade.quantity, trade.symbol, trade.price
            ),
            rating: "Good".to_string(),
            suggestions: strings(&[
                "Set a stop-loss to manage risk",
                "Monitor market volatility",
                "Consider position sizing relative to portfolio",
            ]),
            learning_points: strings(&[
                "Always use risk management tools",
                "Never risk more than 2% of your portfolio on a single trade",
            ]),
        })
    }

    async fn learning_path(&self, progress: &UserProgress) -> AiResult<LearningPath> {
        self.simulate("learning_path", LEARNING_PATH_MS, progress).await?;

        Ok(LearningPath {
            next_topics: vec![
                TopicSuggestion {
                    id: "risk-management".to_string(),
                    title: "Risk Management Basics".to_string(),
                    difficulty: "Intermediate".to_string(),
                    estimated_time: "15 minutes".to_string(),
                    reason: "Based on your recent trades, understanding risk management will help protect your capital.".to_string(),
                },
                TopicSuggestion {
                    id: "technical-analysis".to_string(),
                    title: "Introduction to Technical Analysis".to_string(),
                    difficulty: "Beginner".to_string(),
                    estimated_time: "20 minutes".to_string(),
                    reason: "This will help you understand chart patterns and make better entry/exit decisions.".to_string(),
                },
            ],
            strengths: strings(&["Quick learner", "Good at pattern recognition"]),
            areas_to_improve: strings(&["Risk management", "Position sizing"]),
        })
    }

    async fn market_scenario(
        &self,
        scenario_kind: &str,
        difficulty: Difficulty,
    ) -> AiResult<MarketScenario> {
        require_text("scenario", scenario_kind)?;
        self.simulate("market_scenario", SCENARIO_MS, &(scenario_kind, difficulty))
            .await?;

        Ok(MarketScenario {
            scenario_name: scenario_kind.to_string(),
            difficulty,
            market_conditions: MarketConditions {
                volatility: "High".to_string(),
                trend: "Bearish".to_string(),
                volume: "Above Average".to_string(),
            },
            news_events: vec![
                NewsEvent {
                    time: "09:30".to_string(),
                    headline: "Federal Reserve announces interest rate decision".to_string(),
                    impact: "High".to_string(),
                },
                NewsEvent {
                    time: "14:00".to_string(),
                    headline: "Major tech company reports earnings beat".to_string(),
                    impact: "Medium".to_string(),
                },
            ],
            challenges: strings(&[
                "Navigate through high volatility period",
                "Make trading decisions with conflicting signals",
                "Manage emotions during rapid price movements",
            ]),
            starting_conditions: StartingConditions {
                cash: 10_000.0,
                positions: Vec::new(),
                market_open: true,
            },
        })
    }

    async fn analyze_portfolio(&self, portfolio: &PortfolioSnapshot) -> AiResult<PortfolioAnalysis> {
        self.simulate("analyze_portfolio", PORTFOLIO_MS, portfolio).await?;

        Ok(PortfolioAnalysis {
            overall_rating: "Moderate".to_string(),
            diversification_score: 65,
            risk_level: "Medium-High".to_string(),
            insights: vec![
                Insight {
                    kind: InsightKind::Warning,
                    message: "Your portfolio is heavily concentrated in tech stocks (60%). Consider diversifying.".to_string(),
                },
                Insight {
                    kind: InsightKind::Positive,
                    message: "Good job maintaining a cash buffer (20%) for opportunities.".to_string(),
                },
                Insight {
                    kind: InsightKind::Suggestion,
                    message: "Consider adding some defensive stocks or bonds to reduce overall risk.".to_string(),
                },
            ],
            recommendations: strings(&[
                "Reduce tech exposure from 60% to 40%",
                "Add 15-20% allocation to consumer staples or utilities",
                "Consider 10% allocation to bonds or fixed income",
            ]),
            performance_metrics: PerformanceMetrics {
                total_return: "+12.5%".to_string(),
                sharpe_ratio: 1.2,
                max_drawdown: "-8.3%".to_string(),
            },
        })
    }

    async fn swipe_challenge(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> AiResult<GeneratedChallenge> {
        require_text("topic", topic)?;
        self.simulate("swipe_challenge", SWIPE_MS, &(topic, difficulty)).await?;

        Ok(GeneratedChallenge {
            category: topic.to_string(),
            question: "Is diversification important in investing?".to_string(),
            correct_answer: true,
            explanation: "Yes! Diversification helps reduce risk by spreading investments across different assets.".to_string(),
            reward: 50,
            difficulty,
        })
    }

    async fn explain_concept(&self, concept: &str, cohort: Cohort) -> AiResult<ConceptExplanation> {
        require_text("concept", concept)?;
        self.simulate("explain_concept", EXPLAIN_MS, &(concept, cohort)).await?;

        let explanation = match cohort {
            Cohort::Junior => format!(
                "Imagine {} is like your piggy bank! The more you learn about it, the smarter you become with your money! 🐷💰",
                concept
            ),
            Cohort::Teen => format!(
                "{} is an important financial concept that helps you make smart money decisions. It's used in real life for managing your finances effectively.",
                concept
            ),
            Cohort::Trader => format!(
                "{} is a key financial principle. Understanding this will help you make informed trading and investment decisions in real markets.",
                concept
            ),
        };

        Ok(ConceptExplanation {
            explanation,
            key_points: strings(&[
                "First important point about the concept",
                "Second practical application",
                "Third real-world example",
            ]),
            quiz: Quiz {
                question: format!("What is the main benefit of understanding {}?", concept),
                options: strings(&["Option A", "Option B", "Option C", "Option D"]),
                correct_answer: 0,
            },
        })
    }

    fn status(&self) -> AiStatus {
        AiStatus {
            has_openai_key: self.has_openai_key,
            has_anthropic_key: self.has_anthropic_key,
            configured: false,
        }
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_assistant_waits_default_latency() {
        let ai = MockAiService::new();
        let started = Instant::now();

        let reply = ai
            .trading_assistant("What is a stop loss?", &AssistantContext::default())
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(ASSISTANT_MS));
        assert!(reply.message.contains("\"What is a stop loss?\""));
        assert_eq!(reply.suggestions.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_override() {
        let ai = MockAiService::new().with_latency(Duration::from_millis(10));
        let started = Instant::now();

        ai.market_scenario("crisis", Difficulty::Hard).await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(10));
        assert!(elapsed < Duration::from_millis(SCENARIO_MS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_rejected() {
        let ai = MockAiService::new();
        let err = ai
            .trading_assistant("   ", &AssistantContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::InvalidRequest(_)));

        assert!(ai.explain_concept("", Cohort::Teen).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trade_analysis_mentions_trade() {
        let ai = MockAiService::new();
        let trade = TradeSummary {
            symbol: "TSLA".to_string(),
            side: "buy".to_string(),
            quantity: 3.0,
            price: 242.84,
        };

        let analysis = ai.analyze_trade(&trade).await.unwrap();
        assert!(analysis.analysis.starts_with("Your buy order for 3 shares of TSLA at $242.84"));
        assert_eq!(analysis.rating, "Good");
        assert_eq!(analysis.learning_points.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explanation_depends_on_cohort() {
        let ai = MockAiService::new();

        let junior = ai.explain_concept("saving", Cohort::Junior).await.unwrap();
        assert!(junior.explanation.contains("piggy bank"));

        let trader = ai.explain_concept("leverage", Cohort::Trader).await.unwrap();
        assert!(trader.explanation.starts_with("leverage is a key financial principle"));
        assert_eq!(trader.quiz.options.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_payloads_serialize_like_the_frontend() {
        let ai = MockAiService::new();
        let path = ai.learning_path(&UserProgress::default()).await.unwrap();
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["nextTopics"][0]["id"], "risk-management");

        let portfolio = ai
            .analyze_portfolio(&PortfolioSnapshot::default())
            .await
            .unwrap();
        let json = serde_json::to_value(&portfolio).unwrap();
        assert_eq!(json["insights"][0]["type"], "warning");
        assert_eq!(json["diversificationScore"], 65);

        let challenge = ai.swipe_challenge("Budgeting", Difficulty::Easy).await.unwrap();
        assert_eq!(challenge.category, "Budgeting");
        assert!(challenge.correct_answer);
    }

    #[test]
    fn test_status_reflects_keys() {
        let env = EnvConfig {
            config_path: "config.toml".to_string(),
            openai_api_key: None,
            anthropic_api_key: Some("key".to_string()),
        };
        let ai = MockAiService::from_config(&env, &AiConfig::default());
        let status = ai.status();

        assert!(!status.has_openai_key);
        assert!(status.has_anthropic_key);
        assert!(!status.configured);
        assert_eq!(ai.backend_name(), "mock");
    }
}
