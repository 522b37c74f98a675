//! Filter an exchange state snapshot into ladder rows.
//!
//! The snapshot is the web client's own state dump: open positions and
//! working orders across every pair. Only the parts relevant to the
//! configured symbol and ladder direction are kept.

use crate::domain::{OrderRow, PlRow, PositionSnapshot, RowId, Settings};
use crate::error::ConfigError;
use crate::precision::sign;
use serde::Deserialize;

const ACTIVE: &str = "ACTIVE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveSnapshot {
    #[serde(default)]
    pub positions: Vec<LivePosition>,
    #[serde(default)]
    pub orders: LiveOrders,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LiveOrders {
    #[serde(default)]
    pub all: Vec<LiveOrder>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivePosition {
    pub id: RowId,
    pub pair: String,
    pub status: String,
    pub base_price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveOrder {
    pub id: RowId,
    pub symbol: String,
    pub status: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub price: f64,
    pub amount: f64,
}

impl LiveSnapshot {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Rows recovered from a snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedRows {
    /// Open positions on the configured pair, then working limit orders on
    /// the same side as the ladder.
    pub order_rows: Vec<OrderRow>,
    /// One exit row per open position on any pair, exiting at its base price.
    pub pl_rows: Vec<PlRow>,
}

pub fn import_snapshot(snapshot: &LiveSnapshot, settings: &Settings) -> ImportedRows {
    let active_positions = snapshot.positions.iter().filter(|p| p.status == ACTIVE);

    let pl_rows = active_positions
        .clone()
        .map(|p| PlRow::new(p.id.clone(), PositionSnapshot::new(p.base_price, p.amount), p.base_price))
        .collect();

    let position_rows = active_positions
        .filter(|p| p.pair == settings.symbol)
        .map(|p| OrderRow::new(p.id.clone(), p.base_price, p.amount));

    // Order symbols drop the pair's leading type marker ("tBTCUSD" -> "BTCUSD").
    let order_symbol = settings.symbol.get(1..).unwrap_or_default();
    let ladder_side = sign(settings.entry_amount);
    let order_rows = snapshot
        .orders
        .all
        .iter()
        .filter(|o| {
            o.symbol == order_symbol
                && o.status == ACTIVE
                && o.order_type == "LIMIT"
                && sign(o.amount) == ladder_side
        })
        .map(|o| OrderRow::new(o.id.clone(), o.price, o.amount));

    ImportedRows { order_rows: position_rows.chain(order_rows).collect(), pl_rows }
}
