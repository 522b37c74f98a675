//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Precision floors: never above the input, never more than one unit below
//! 2. Prefix scan equals per-row point queries
//! 3. Cumulative amount is the rounded running sum of order amounts
//! 4. Generated ladders move strictly toward the target and stop before it

use martingale_core::{
    average_position, decimals_for, generate_ladder, percent_price, position_scan, precision,
    IdSequence, OrderRow, PriceScale, RowId, Settings,
};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..50_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_amount() -> impl Strategy<Value = f64> {
    (0.001..10.0_f64).prop_map(|a| (a * 1000.0).round() / 1000.0)
}

fn arb_rows() -> impl Strategy<Value = Vec<OrderRow>> {
    prop::collection::vec((arb_price(), arb_amount()), 1..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (p, a))| OrderRow::new(RowId::from(i as u64 + 1), p, a))
            .collect()
    })
}

fn arb_settings() -> impl Strategy<Value = Settings> {
    (
        arb_price(),
        arb_amount(),
        -40.0..-1.0_f64,
        0.005..0.1_f64,
        1.0..1.5_f64,
        0usize..5,
        prop::bool::ANY,
        prop::bool::ANY,
    )
        .prop_map(
            |(entry_price, entry_amount, price_percent, x_price, x_amount, after, log, by_pos)| {
                Settings {
                    entry_price,
                    entry_amount,
                    price_percent,
                    x_price,
                    x_amount,
                    x_amount_after: after,
                    x_position_amount: by_pos,
                    price_scale: if log { PriceScale::Log10 } else { PriceScale::Linear },
                    ..Settings::default()
                }
            },
        )
}

// ── 1. Precision ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn precision_floors_within_one_unit(value in -1_000_000.0..1_000_000.0_f64) {
        let rounded = precision(value, None);
        let unit = 10_f64.powi(-(decimals_for(value) as i32));
        prop_assert!(rounded <= value + 1e-9);
        prop_assert!(value - rounded < unit + 1e-9);
    }
}

// ── 2. Scan equals point queries ─────────────────────────────────────

proptest! {
    #[test]
    fn scan_matches_point_queries(rows in arb_rows()) {
        let scan = position_scan(&rows).unwrap();
        prop_assert_eq!(scan.len(), rows.len());
        for (i, snapshot) in scan.iter().enumerate() {
            prop_assert_eq!(*snapshot, average_position(&rows, Some(i + 1)).unwrap());
        }
    }
}

// ── 3. Running sum ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn cumulative_amount_is_rounded_running_sum(settings in arb_settings()) {
        let rows = generate_ladder(&settings, &mut IdSequence::new()).unwrap();
        let scan = position_scan(&rows).unwrap();
        let mut running = 0.0;
        let mut previous = 0.0;
        for (row, snapshot) in rows.iter().zip(&scan) {
            running = precision(running + row.amount, None);
            prop_assert_eq!(snapshot.amount, running);
            // Long ladders only ever add size
            prop_assert!(snapshot.amount >= previous);
            previous = snapshot.amount;
        }
    }
}

// ── 4. Ladder direction ──────────────────────────────────────────────

proptest! {
    #[test]
    fn ladder_moves_toward_target(settings in arb_settings()) {
        let rows = generate_ladder(&settings, &mut IdSequence::new()).unwrap();
        let end_price = percent_price(settings.entry_price, settings.price_percent);

        prop_assert!(!rows.is_empty());
        prop_assert_eq!(rows[0].price, settings.entry_price);
        for pair in rows.windows(2) {
            prop_assert!(pair[1].price < pair[0].price);
        }
        for row in &rows {
            prop_assert!(row.price > end_price);
        }
    }
}
