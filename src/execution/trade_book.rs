use chrono::Utc;

use crate::error::{AlphinError, AlphinResult};
use crate::execution::types::{
    AccountSummary, Order, OrderSide, Position, PositionSide, TradeConfirmation,
};
use tracing::{info, warn};

pub const QUANTITY_NOT_POSITIVE: &str = "quantity must be a finite number greater than zero";
pub const PRICE_NOT_POSITIVE: &str = "price must be greater than zero";
pub const VALUE_OUT_OF_RANGE: &str = "order value is out of range";

/// Cash balance plus an append-only list of long positions.
pub struct TradeBook {
    balance: f64,
    positions: Vec<Position>,
}

impl TradeBook {
    pub fn new(initial_balance: f64) -> Self {
        info!("Trade book initialized with ${:.2}", initial_balance);

        Self {
            balance: initial_balance,
            positions: Vec::new(),
        }
    }

    pub fn execute(&mut self, order: &Order) -> AlphinResult<TradeConfirmation> {
        match order.side {
            OrderSide::Buy => self.buy(&order.symbol, order.quantity, order.price),
            OrderSide::Sell => self.sell(&order.symbol, order.quantity, order.price),
        }
    }

    /// Debit `quantity * price` and open a long position.
    pub fn buy(
        &mut self,
        symbol: &str,
        quantity: f64,
        price: f64,
    ) -> AlphinResult<TradeConfirmation> {
        validate_quantity(quantity)?;
        if !(price.is_finite() && price > 0.0) {
            return Err(AlphinError::InvalidOrder(PRICE_NOT_POSITIVE.to_string()));
        }

        let cost = checked_value(quantity, price)?;

        if cost > self.balance {
            warn!(
                "Buy rejected: {} x {} @ ${:.2} needs ${:.2}, balance ${:.2}",
                quantity, symbol, price, cost, self.balance
            );
            return Err(AlphinError::InsufficientFunds {
                needed: cost,
                available: self.balance,
            });
        }

        self.balance -= cost;

        let now = Utc::now();
        self.positions.push(Position {
            symbol: symbol.to_string(),
            quantity,
            entry_price: price,
            side: PositionSide::Long,
            opened_at: now,
        });

        info!(
            "Bought {} {} @ ${:.2} (cost ${:.2}, balance ${:.2})",
            quantity, symbol, price, cost, self.balance
        );

        Ok(TradeConfirmation {
            side: OrderSide::Buy,
            symbol: symbol.to_string(),
            quantity,
            price,
            cost,
            balance_after: self.balance,
            timestamp: now,
        })
    }

    /// Credit `quantity * price`.
    ///
    /// No open position is matched or removed, and none needs to exist. Whether
    /// a sell should close a specific position or open a short is undecided, so
    /// the ledger only moves cash.
    pub fn sell(
        &mut self,
        symbol: &str,
        quantity: f64,
        price: f64,
    ) -> AlphinResult<TradeConfirmation> {
        validate_quantity(quantity)?;

        let proceeds = checked_value(quantity, price)?;
        let balance = self.balance + proceeds;
        if !balance.is_finite() {
            return Err(AlphinError::InvalidOrder(VALUE_OUT_OF_RANGE.to_string()));
        }
        self.balance = balance;

        info!(
            "Sold {} {} @ ${:.2} (proceeds ${:.2}, balance ${:.2})",
            quantity, symbol, price, proceeds, self.balance
        );

        Ok(TradeConfirmation {
            side: OrderSide::Sell,
            symbol: symbol.to_string(),
            quantity,
            price,
            cost: proceeds,
            balance_after: self.balance,
            timestamp: Utc::now(),
        })
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            balance: self.balance,
            equity: self.balance,
            pnl: 0.0,
        }
    }
}

fn validate_quantity(quantity: f64) -> AlphinResult<()> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(AlphinError::InvalidOrder(QUANTITY_NOT_POSITIVE.to_string()))
    }
}

/// `quantity * price`, rejected when it does not fit in a finite f64.
fn checked_value(quantity: f64, price: f64) -> AlphinResult<f64> {
    let value = quantity * price;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AlphinError::InvalidOrder(VALUE_OUT_OF_RANGE.to_string()))
    }
}
