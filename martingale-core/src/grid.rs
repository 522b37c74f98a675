//! Derived per-row columns for the order grid.
//!
//! Every column is a projection of the current rows: position price, amount
//! and cost through each row, diffs against the previous row, liquidation
//! prices and P/L at the row's own price. All of them are served from one
//! [`position_scan`], and the grid borrows the rows it was built from, so it
//! can never observe a stale row set.

use crate::averaging::position_scan;
use crate::domain::{OrderRow, PositionSnapshot, RowId, Settings};
use crate::error::EngineError;
use crate::liquidation::liquidation_price;
use crate::precision::precision;
use crate::profit::{position_pl, position_pl_percent};
use serde::Serialize;

/// Account parameters the derived columns depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub leverage: f64,
    pub min_margin: f64,
    /// Fee per side. P/L columns with fees charge twice this.
    pub fee: f64,
}

impl From<&Settings> for GridParams {
    fn from(settings: &Settings) -> Self {
        Self { leverage: settings.leverage, min_margin: settings.min_margin, fee: settings.fee }
    }
}

/// One fully derived grid row. All values are rounded for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub id: RowId,
    pub order_price: f64,
    pub order_amount: f64,
    pub order_cost: f64,
    /// Previous order price minus this one; 0 on the first row.
    pub order_price_diff: f64,
    pub order_price_diff_percent: f64,
    /// Liquidation price of this order alone.
    pub order_liquidation_price: f64,
    pub position_price: f64,
    pub position_amount: f64,
    pub position_cost: f64,
    /// Previous position price minus this one; 0 on the first row.
    pub position_price_diff: f64,
    pub position_price_diff_percent: f64,
    pub position_liquidation_price: f64,
    /// Distance from the position's liquidation price to the next order
    /// price (this row's own price on the last row). Positive while the next
    /// order fills before liquidation.
    pub liquidation_buffer: f64,
    /// P/L of the position closed at this row's price, without fees, at 3
    /// decimals.
    pub pl: f64,
    /// At 2 decimals.
    pub pl_percent: f64,
    /// P/L with the round-trip fee, at 3 decimals.
    pub fee_pl: f64,
    /// Same as `pl_percent`; fees only move the absolute P/L.
    pub fee_pl_percent: f64,
}

/// Order rows plus their cumulative position snapshots.
#[derive(Debug, Clone)]
pub struct DerivedGrid<'a> {
    rows: &'a [OrderRow],
    snapshots: Vec<PositionSnapshot>,
    params: GridParams,
}

impl<'a> DerivedGrid<'a> {
    pub fn build(rows: &'a [OrderRow], params: GridParams) -> Result<Self, EngineError> {
        let snapshots = position_scan(rows)?;
        Ok(Self { rows, snapshots, params })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position through row `index`, inclusive.
    pub fn position(&self, index: usize) -> Option<PositionSnapshot> {
        self.snapshots.get(index).copied()
    }

    /// Position through the row before `index`; `None` for the first row.
    pub fn previous_position(&self, index: usize) -> Option<PositionSnapshot> {
        index.checked_sub(1).and_then(|i| self.position(i))
    }

    pub fn row(&self, index: usize) -> Option<GridRow> {
        let order = self.rows.get(index)?;
        let position = self.snapshots[index];
        let GridParams { leverage, min_margin, fee } = self.params;

        let previous_order = index.checked_sub(1).map(|i| self.rows[i].price);
        let (order_price_diff, order_price_diff_percent) = diff(previous_order, order.price);
        let (position_price_diff, position_price_diff_percent) =
            diff(self.previous_position(index).map(|p| p.price), position.price);

        let position_liq = liquidation_price(position.price, position.amount, leverage, min_margin);
        let next_price = self.rows.get(index + 1).unwrap_or(order).price;
        let buffer = if position.is_long() { next_price - position_liq } else { position_liq - next_price };

        let exit = order.price;
        let round_trip = fee * 2.0;
        let pl_percent =
            precision(position_pl_percent(position.price, exit, position.amount), Some(2));

        Some(GridRow {
            id: order.id.clone(),
            order_price: order.price,
            order_amount: order.amount,
            order_cost: precision(order.cost(), None),
            order_price_diff,
            order_price_diff_percent,
            order_liquidation_price: precision(
                liquidation_price(order.price, order.amount, leverage, min_margin),
                None,
            ),
            position_price: position.price,
            position_amount: position.amount,
            position_cost: precision(position.cost(), None),
            position_price_diff,
            position_price_diff_percent,
            position_liquidation_price: precision(position_liq, None),
            liquidation_buffer: precision(buffer, None),
            pl: precision(position_pl(position.price, exit, position.amount, 0.0), Some(3)),
            pl_percent,
            fee_pl: precision(
                position_pl(position.price, exit, position.amount, round_trip),
                Some(3),
            ),
            // P/L% is fee-less in both column pairs
            fee_pl_percent: pl_percent,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = GridRow> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}

/// `previous - current` and its percentage of `previous`, both 0 when there
/// is no previous value or the percentage is undefined.
fn diff(previous: Option<f64>, current: f64) -> (f64, f64) {
    let Some(previous) = previous else {
        return (0.0, 0.0);
    };
    let diff = previous - current;
    let percent = diff / previous * 100.0;
    (
        precision(zero_if_nan(diff), None),
        precision(if percent.is_finite() { percent } else { 0.0 }, Some(2)),
    )
}

fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
