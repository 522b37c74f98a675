//! Cost-weighted position averaging over order prefixes.
//!
//! [`average_position`] answers a single "position after the first n orders"
//! query. [`position_scan`] materializes every cumulative snapshot in one
//! pass; grid rendering uses the scan so a full grid costs O(n) folds rather
//! than O(n²).

use crate::domain::{OrderRow, PositionSnapshot};
use crate::error::EngineError;
use tracing::debug;

/// Position after filling `orders[..prefix_len]` in order.
///
/// `None` folds every order; a length past the end is clamped. An empty
/// prefix has no average price and fails with
/// [`EngineError::ZeroPositionSize`], as does any prefix whose cumulative
/// amount reaches exactly zero.
pub fn average_position(
    orders: &[OrderRow],
    prefix_len: Option<usize>,
) -> Result<PositionSnapshot, EngineError> {
    let len = prefix_len.unwrap_or(orders.len()).min(orders.len());
    if len == 0 {
        return Err(EngineError::ZeroPositionSize { rows: 0 });
    }
    orders[..len]
        .iter()
        .enumerate()
        .try_fold(PositionSnapshot::flat(), |pos, (i, order)| pos.fill(order, i + 1))
}

/// Cumulative snapshot after each order: `scan[i]` is the position after
/// filling `orders[..=i]`. Empty input gives an empty scan.
pub fn position_scan(orders: &[OrderRow]) -> Result<Vec<PositionSnapshot>, EngineError> {
    let mut snapshots = Vec::with_capacity(orders.len());
    let mut pos = PositionSnapshot::flat();
    for (i, order) in orders.iter().enumerate() {
        pos = pos.fill(order, i + 1)?;
        snapshots.push(pos);
    }
    debug!(rows = orders.len(), "position scan complete");
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RowId;

    fn rows(values: &[(f64, f64)]) -> Vec<OrderRow> {
        values
            .iter()
            .enumerate()
            .map(|(i, &(p, a))| OrderRow::new(RowId::from(i as u64 + 1), p, a))
            .collect()
    }

    #[test]
    fn single_order_is_its_own_average() {
        let pos = average_position(&rows(&[(100.0, 1.0)]), None).unwrap();
        assert_eq!(pos, PositionSnapshot::new(100.0, 1.0));
    }

    #[test]
    fn prefix_limits_the_fold() {
        let orders = rows(&[(100.0, 1.0), (95.0, 1.0), (90.25, 2.0)]);
        let first_two = average_position(&orders, Some(2)).unwrap();
        assert_eq!(first_two, PositionSnapshot::new(97.5, 2.0));

        let all = average_position(&orders, None).unwrap();
        // (195 + 180.5) / 4 = 93.875, floored to 93.87
        assert!((all.price - 93.87).abs() < 1e-9);
        assert_eq!(all.amount, 4.0);
    }

    #[test]
    fn prefix_past_the_end_is_clamped() {
        let orders = rows(&[(100.0, 1.0), (95.0, 1.0)]);
        assert_eq!(
            average_position(&orders, Some(10)).unwrap(),
            average_position(&orders, None).unwrap()
        );
    }

    #[test]
    fn empty_orders_fail() {
        assert_eq!(average_position(&[], None), Err(EngineError::ZeroPositionSize { rows: 0 }));
        let orders = rows(&[(100.0, 1.0)]);
        assert_eq!(average_position(&orders, Some(0)), Err(EngineError::ZeroPositionSize { rows: 0 }));
    }

    #[test]
    fn flat_position_fails_instead_of_nan() {
        let orders = rows(&[(100.0, 1.0), (105.0, -1.0), (110.0, 1.0)]);
        assert_eq!(average_position(&orders, None), Err(EngineError::ZeroPositionSize { rows: 2 }));
        assert!(average_position(&orders, Some(1)).is_ok());
    }

    #[test]
    fn near_zero_remainder_fails_instead_of_exploding() {
        let orders = rows(&[(100.0, 1.0), (99.0, -0.9999999)]);
        assert_eq!(average_position(&orders, None), Err(EngineError::ZeroPositionSize { rows: 2 }));
        assert_eq!(position_scan(&orders), Err(EngineError::ZeroPositionSize { rows: 2 }));
    }

    #[test]
    fn short_positions_average_the_same_way() {
        let orders = rows(&[(100.0, -1.0), (110.0, -1.0)]);
        let pos = average_position(&orders, None).unwrap();
        assert_eq!(pos, PositionSnapshot::new(105.0, -2.0));
        assert!(pos.is_short());
    }

    #[test]
    fn scan_matches_point_queries() {
        let orders = rows(&[(100.0, 1.0), (95.0, 1.0), (90.25, 2.0), (85.73, 4.0)]);
        let scan = position_scan(&orders).unwrap();
        assert_eq!(scan.len(), orders.len());
        for (i, snapshot) in scan.iter().enumerate() {
            assert_eq!(*snapshot, average_position(&orders, Some(i + 1)).unwrap());
        }
    }

    #[test]
    fn scan_of_nothing_is_empty() {
        assert!(position_scan(&[]).unwrap().is_empty());
    }

    #[test]
    fn scan_propagates_zero_size() {
        let orders = rows(&[(100.0, 2.0), (100.0, -2.0)]);
        assert_eq!(position_scan(&orders), Err(EngineError::ZeroPositionSize { rows: 2 }));
    }
}
