//! Liquidation price estimate for a leveraged position.

use crate::precision::sign;

/// Price at which margin is exhausted.
///
/// Longs liquidate below `price`, shorts above, offset by the initial margin
/// fraction `1 / leverage` less the maintenance margin `min_margin`. A flat
/// position has no offset.
pub fn liquidation_price(price: f64, amount: f64, leverage: f64, min_margin: f64) -> f64 {
    price * (1.0 + (1.0 / leverage - min_margin) * sign(amount) * -1.0)
}
