use std::sync::Arc;
use tracing::{info, warn};

use crate::advisory::AdvisoryNotifier;
use crate::ai::{
    AiResult, AiService, AssistantContext, AssistantReply, Cohort, ConceptExplanation, Difficulty,
    MarketScenario, PortfolioAnalysis, PortfolioSnapshot, TradeAnalysis, TradeSummary,
};
use crate::config::{ChartConfig, Config, TraderConfig};
use crate::data::market::{scenarios, ChartSeries, QuoteBoard};
use crate::data::types::{Quote, Scenario};
use crate::error::{AlphinError, AlphinResult};
use crate::events::{EventSink, UiEvent, ViewMode};
use crate::execution::trade_book::{PRICE_NOT_POSITIVE, QUANTITY_NOT_POSITIVE};
use crate::execution::types::{AccountSummary, Order, OrderSide, Position, TradeConfirmation};
use crate::execution::TradeBook;
use crate::pages::scenario::ScenarioSession;

/// Advisory text for a rejected order.
pub fn rejection_message(err: &AlphinError) -> String {
    match err {
        AlphinError::InvalidOrder(reason) if reason == QUANTITY_NOT_POSITIVE => {
            "Order amount must be greater than zero!".to_string()
        }
        AlphinError::InvalidOrder(reason) if reason == PRICE_NOT_POSITIVE => {
            "This market has no valid price to trade at right now.".to_string()
        }
        AlphinError::InvalidOrder(reason) => format!("Order rejected: {}.", reason),
        AlphinError::InsufficientFunds { needed, available } => format!(
            "Insufficient funds! You need ${:.2} but only have ${:.2}.",
            needed, available
        ),
        other => other.to_string(),
    }
}

/// Advisory text for a filled order.
pub fn fill_message(fill: &TradeConfirmation) -> String {
    match fill.side {
        OrderSide::Buy => format!(
            "Great! You bought {} shares of {} at ${}. Remember to set a stop loss!",
            fill.quantity, fill.symbol, fill.price
        ),
        OrderSide::Sell => format!(
            "Position closed! You sold {} shares of {} at ${}.",
            fill.quantity, fill.symbol, fill.price
        ),
    }
}

fn summarize(fill: &TradeConfirmation) -> TradeSummary {
    TradeSummary {
        symbol: fill.symbol.clone(),
        side: match fill.side {
            OrderSide::Buy => "buy".to_string(),
            OrderSide::Sell => "sell".to_string(),
        },
        quantity: fill.quantity,
        price: fill.price,
    }
}

/// Trading simulator page: order entry, watchlist, mocked chart and the
/// scenario simulator.
pub struct TraderSession {
    book: TradeBook,
    quotes: QuoteBoard,
    scenarios: Vec<Scenario>,
    selected_symbol: String,
    current_price: f64,
    order_amount: f64,
    view: ViewMode,
    chart_config: ChartConfig,
    chart: Option<ChartSeries>,
    scenario: ScenarioSession,
    last_fill: Option<TradeConfirmation>,
    advisory: AdvisoryNotifier,
    events: EventSink,
    ai: Arc<dyn AiService>,
}

impl TraderSession {
    pub fn new(config: &Config, ai: Arc<dyn AiService>, events: EventSink) -> Self {
        let trader: &TraderConfig = &config.trader;
        let quotes = QuoteBoard::watchlist();

        let (selected_symbol, current_price) = match quotes.lookup(&trader.default_symbol) {
            Some(quote) => (quote.symbol.clone(), quote.price),
            None => {
                warn!("Default symbol {} not on watchlist", trader.default_symbol);
                let first = &quotes.quotes()[0];
                (first.symbol.clone(), first.price)
            }
        };

        let mut session = Self {
            book: TradeBook::new(trader.initial_balance_usd),
            quotes,
            scenarios: scenarios(),
            selected_symbol,
            current_price,
            order_amount: trader.default_order_amount,
            view: ViewMode::Trading,
            chart_config: config.chart.clone(),
            chart: None,
            scenario: ScenarioSession::new(),
            last_fill: None,
            advisory: AdvisoryNotifier::new(trader.advisory_duration(), events.clone()),
            events,
            ai,
        };
        session.load_chart();
        session
    }

    // Chart failures only cost the chart.
    fn load_chart(&mut self) {
        self.chart = match ChartSeries::generate(&self.chart_config) {
            Ok(series) => Some(series),
            Err(e) => {
                warn!("Chart error: {}", e);
                None
            }
        };
    }

    pub fn select_symbol(&mut self, symbol: &str) -> AlphinResult<Quote> {
        let quote = self
            .quotes
            .lookup(symbol)
            .cloned()
            .ok_or_else(|| AlphinError::UnknownSymbol(symbol.to_string()))?;

        self.selected_symbol = quote.symbol.clone();
        self.current_price = quote.price;
        Ok(quote)
    }

    pub fn set_order_amount(&mut self, amount: f64) {
        self.order_amount = amount;
    }

    pub fn buy(&mut self) -> AlphinResult<TradeConfirmation> {
        self.place(OrderSide::Buy)
    }

    pub fn sell(&mut self) -> AlphinResult<TradeConfirmation> {
        self.place(OrderSide::Sell)
    }

    fn place(&mut self, side: OrderSide) -> AlphinResult<TradeConfirmation> {
        let order = Order {
            symbol: self.selected_symbol.clone(),
            side,
            quantity: self.order_amount,
            price: self.current_price,
        };

        match self.book.execute(&order) {
            Ok(fill) => {
                if let (OrderSide::Buy, Some(position)) = (side, self.book.positions().last()) {
                    self.events.emit(UiEvent::PositionOpened(position.clone()));
                }
                self.events.emit(UiEvent::TradeFilled(fill.clone()));
                self.events.emit(UiEvent::BalanceChanged(self.book.balance()));
                self.advisory.show(fill_message(&fill));
                self.last_fill = Some(fill.clone());
                Ok(fill)
            }
            Err(err) => {
                info!("Order rejected: {}", err);
                self.advisory.show(rejection_message(&err));
                Err(err)
            }
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        if self.view == view {
            return;
        }
        self.view = view;
        if view == ViewMode::Trading {
            self.load_chart();
        }
        self.events.emit(UiEvent::ViewChanged(view));
    }

    pub fn start_scenario(&mut self, id: u32) -> AlphinResult<()> {
        let scenario = self
            .scenarios
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(AlphinError::UnknownScenario(id))?;

        let name = scenario.name.clone();
        let message = self.scenario.start(scenario);
        self.events.emit(UiEvent::ScenarioStarted(name));
        self.advisory.show(message);
        Ok(())
    }

    /// Leave the scenario and force the trading view.
    pub fn exit_scenario(&mut self) {
        if self.scenario.exit().is_some() {
            self.events.emit(UiEvent::ScenarioExited);
        }
        self.set_view(ViewMode::Trading);
    }

    /// Ask the AI backend to flesh out the active scenario.
    pub async fn scenario_conditions(&self) -> AiResult<Option<MarketScenario>> {
        let Some(active) = self.scenario.active() else {
            return Ok(None);
        };
        let difficulty = Difficulty::from_label(&active.difficulty);
        self.ai.market_scenario(&active.name, difficulty).await.map(Some)
    }

    pub async fn ask_alphin(&mut self, question: &str) -> AiResult<AssistantReply> {
        let context = AssistantContext {
            symbol: Some(self.selected_symbol.clone()),
            balance: Some(self.book.balance()),
            open_positions: self.book.positions().len(),
        };

        let reply = self.ai.trading_assistant(question, &context).await?;
        self.advisory.show(reply.message.clone());
        Ok(reply)
    }

    pub async fn review_last_trade(&self) -> AiResult<Option<TradeAnalysis>> {
        match &self.last_fill {
            Some(fill) => self.ai.analyze_trade(&summarize(fill)).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn review_portfolio(&self) -> AiResult<PortfolioAnalysis> {
        let snapshot = PortfolioSnapshot {
            balance: self.book.balance(),
            positions: self
                .book
                .positions()
                .iter()
                .map(|p| TradeSummary {
                    symbol: p.symbol.clone(),
                    side: "long".to_string(),
                    quantity: p.quantity,
                    price: p.entry_price,
                })
                .collect(),
            risk_tolerance: None,
        };
        self.ai.analyze_portfolio(&snapshot).await
    }

    pub async fn explain(&self, concept: &str) -> AiResult<ConceptExplanation> {
        self.ai.explain_concept(concept, Cohort::Trader).await
    }

    pub fn summary(&self) -> AccountSummary {
        self.book.summary()
    }

    pub fn positions(&self) -> &[Position] {
        self.book.positions()
    }

    pub fn selected_symbol(&self) -> &str {
        &self.selected_symbol
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn order_amount(&self) -> f64 {
        self.order_amount
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn chart(&self) -> Option<&ChartSeries> {
        self.chart.as_ref()
    }

    pub fn quotes(&self) -> &[Quote] {
        self.quotes.quotes()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn active_scenario(&self) -> Option<&Scenario> {
        self.scenario.active()
    }

    pub fn advisory(&self) -> &AdvisoryNotifier {
        &self.advisory
    }
}
