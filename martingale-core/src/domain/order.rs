//! Ladder rungs.

use super::ids::RowId;
use crate::precision::sign;
use serde::{Deserialize, Serialize};

/// One limit order of the ladder.
///
/// Serialized as `{id, op, oa}` (order price, order amount) so the row's own
/// values stay distinct from derived position price and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    pub id: RowId,
    #[serde(rename = "op")]
    pub price: f64,
    /// Signed size: positive buys, negative sells.
    #[serde(rename = "oa")]
    pub amount: f64,
}

impl OrderRow {
    pub fn new(id: impl Into<RowId>, price: f64, amount: f64) -> Self {
        Self { id: id.into(), price, amount }
    }

    /// Notional value at full precision.
    pub fn cost(&self) -> f64 {
        self.price * self.amount
    }

    pub fn is_buy(&self) -> bool {
        self.amount > 0.0
    }

    pub fn side_sign(&self) -> f64 {
        sign(self.amount)
    }
}
