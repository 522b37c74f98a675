use super::order::OrderRow;
use crate::error::EngineError;
use crate::precision::precision;
use serde::{Deserialize, Serialize};

/// Cost-weighted aggregate of a prefix of filled orders.
///
/// Derived on demand from an order prefix and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Cost-weighted average entry price.
    pub price: f64,
    /// Signed cumulative size.
    pub amount: f64,
}

impl PositionSnapshot {
    pub fn new(price: f64, amount: f64) -> Self {
        Self { price, amount }
    }

    /// Empty starting point of the averaging fold.
    pub fn flat() -> Self {
        Self::default()
    }

    /// Fold one more order into the position.
    ///
    /// Both cost terms are rounded before they are summed and the quotient is
    /// rounded again. A sum that rounds to zero counts as flat. `rows` is the
    /// prefix length after this fill and is only used to report where the
    /// position went flat.
    pub fn fill(&self, order: &OrderRow, rows: usize) -> Result<Self, EngineError> {
        let amount = self.amount + order.amount;
        let rounded = precision(amount, None);
        if amount == 0.0 || rounded == 0.0 {
            return Err(EngineError::ZeroPositionSize { rows });
        }
        let cost = precision(self.price * self.amount, None) + precision(order.cost(), None);
        Ok(Self { price: precision(cost / amount, None), amount: rounded })
    }

    pub fn is_long(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.amount < 0.0
    }

    /// Notional value at full precision.
    pub fn cost(&self) -> f64 {
        self.price * self.amount
    }
}
