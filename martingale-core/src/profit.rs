//! Profit/loss projections for a position closed at a hypothetical exit price.

use crate::precision::precision;

/// P/L of closing `amount` bought at `entry_price` at `exit_price`, net of an
/// exit fee charged on the exit notional.
pub fn position_pl(entry_price: f64, exit_price: f64, amount: f64, fee: f64) -> f64 {
    let pl = (exit_price - entry_price) * amount;
    let exit_fee = exit_price * amount.abs() * fee;
    precision(pl - exit_fee, None)
}

/// Capital at risk used as the P/L% denominator.
///
/// Shorts use the worst of entry and exit notional, so a short moving
/// against the trader is measured against the larger margin.
pub fn position_cost(entry_price: f64, exit_price: f64, amount: f64) -> f64 {
    let size = amount.abs();
    if amount < 0.0 {
        (size * entry_price).max(size * exit_price).max(0.0)
    } else {
        (size * entry_price).max(0.0)
    }
}

/// Fee-less P/L as a percentage of the position cost. Zero when either the
/// P/L or the cost is zero, so an exit at the entry price is always 0%.
pub fn position_pl_percent(entry_price: f64, exit_price: f64, amount: f64) -> f64 {
    let pl = position_pl(entry_price, exit_price, amount, 0.0);
    let cost = position_cost(entry_price, exit_price, amount);
    if pl == 0.0 || cost == 0.0 {
        return 0.0;
    }
    precision(pl / cost * 100.0, None)
}

/// Price `percent` percent away from `price`.
pub fn percent_price(price: f64, percent: f64) -> f64 {
    precision(price + price * (percent / 100.0), None)
}

/// Signed percentage distance of `price` from `entry_price`.
pub fn price_percent(price: f64, entry_price: f64) -> f64 {
    precision((price - entry_price) * 100.0 / entry_price, None)
}
