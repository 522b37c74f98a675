//! Hypothetical exits of the full ladder position.

use crate::averaging::average_position;
use crate::domain::{OrderRow, PlRow, RowId};
use crate::error::EngineError;
use crate::profit::percent_price;

/// Exit offsets, in percent of the average price, used when none are given.
pub const DEFAULT_EXIT_PERCENTS: [f64; 3] = [1.0, 2.0, 3.0];

/// One P/L row per exit percent for the position built by all `orders`.
///
/// Rows are named `exit1`, `exit2`, ... in the order of `exit_percents`.
pub fn pl_rows(orders: &[OrderRow], exit_percents: &[f64]) -> Result<Vec<PlRow>, EngineError> {
    let position = average_position(orders, None)?;
    Ok(exit_percents
        .iter()
        .enumerate()
        .map(|(i, &percent)| {
            PlRow::new(
                RowId::new(format!("exit{}", i + 1)),
                position,
                percent_price(position.price, percent),
            )
        })
        .collect())
}
