//! Ladder generation: limit orders from the entry price toward the target
//! adverse price, with optional size scaling.

use crate::domain::{IdSequence, OrderRow, PositionSnapshot, PriceScale, Settings};
use crate::error::EngineError;
use crate::precision::{precision, sign};
use crate::profit::percent_price;
use tracing::{debug, warn};

/// Upper bound on emitted rows before generation is declared divergent.
pub const MAX_LADDER_ROWS: usize = 10_000;

/// Generate the ladder for `settings`, drawing row ids from `ids`.
///
/// Rows are emitted while the running price has not yet reached the target
/// `entry_price * (1 + price_percent / 100)` in the direction of travel. A
/// zero `price_percent` therefore yields an empty ladder. Settings whose
/// price never advances (e.g. a zero `x_price`) fail with
/// [`EngineError::LadderDivergence`] after [`MAX_LADDER_ROWS`] rows.
pub fn generate_ladder(
    settings: &Settings,
    ids: &mut IdSequence,
) -> Result<Vec<OrderRow>, EngineError> {
    settings.validate()?;

    let direction = sign(settings.price_percent);
    let end_price = percent_price(settings.entry_price, settings.price_percent);

    let mut rows: Vec<OrderRow> = Vec::new();
    let mut position = PositionSnapshot::flat();
    let mut price = settings.entry_price;
    let mut amount = settings.entry_amount;

    while price * direction < direction * end_price {
        if rows.len() >= MAX_LADDER_ROWS {
            warn!(
                iterations = MAX_LADDER_ROWS,
                last_price = price,
                end_price,
                "ladder generation diverged"
            );
            return Err(EngineError::LadderDivergence { iterations: MAX_LADDER_ROWS });
        }

        let row = OrderRow::new(ids.next_id(), price, amount);
        if settings.x_position_amount {
            position = position.fill(&row, rows.len() + 1)?;
        }
        rows.push(row);

        let index = rows.len() - 1;
        price = next_price(price, settings.x_price, direction, index, settings.price_scale);
        if index + 1 >= settings.x_amount_after {
            let base = if settings.x_position_amount { position.amount } else { amount };
            amount = precision(base * settings.x_amount, None);
        }
    }

    debug!(rows = rows.len(), end_price, "ladder generated");
    Ok(rows)
}

fn next_price(price: f64, x_price: f64, direction: f64, index: usize, scale: PriceScale) -> f64 {
    let step = direction * price * x_price;
    match scale {
        PriceScale::Linear => precision(price + step, None),
        PriceScale::Log10 => precision(price + step * ((index as f64 + 2.0) * 1.3).log10(), None),
    }
}
