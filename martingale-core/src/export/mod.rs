//! Venue export — render ladder rows as exchange-specific order commands.
//!
//! Each venue implements [`VenueFormatter`]; the caller picks one and passes
//! it to [`render_orders`], which emits one command per row, newline-joined.
//! The commands embed JSON whose field order and casing the receiving
//! page depends on, so payloads are plain `Serialize` structs (declaration
//! order is serialization order).

pub mod binance_futures;
pub mod bitfinex;

pub use binance_futures::BinanceFuturesFormatter;
pub use bitfinex::BitfinexFormatter;

use crate::domain::{OrderRow, Settings};
use serde::{Serialize, Serializer};

/// Renders a single order row as a venue command.
pub trait VenueFormatter: Send + Sync {
    /// Human-readable venue name (e.g., "bitfinex").
    fn name(&self) -> &str;

    fn render_order(&self, settings: &Settings, row: &OrderRow) -> Result<String, serde_json::Error>;
}

/// Render every row with `formatter`, one command per line.
pub fn render_orders(
    formatter: &dyn VenueFormatter,
    settings: &Settings,
    rows: &[OrderRow],
) -> Result<String, serde_json::Error> {
    let lines = rows
        .iter()
        .map(|row| formatter.render_order(settings, row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// A number serialized the way a browser's `JSON.stringify` prints it:
/// integral values without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct JsNumber(pub f64);

impl Serialize for JsNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match as_integer(self.0) {
            Some(i) => serializer.serialize_i64(i),
            None => serializer.serialize_f64(self.0),
        }
    }
}

/// `String(value)` as a browser would produce it.
pub(crate) fn js_string(value: f64) -> String {
    if let Some(i) = as_integer(value) {
        return i.to_string();
    }
    serde_json::Number::from_f64(value)
        .map(|n| n.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn as_integer(value: f64) -> Option<i64> {
    // 2^53: beyond this f64 no longer represents every integer
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE).then_some(value as i64)
}
