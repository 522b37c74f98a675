//! Binance USDⓈ-M futures web client: a `placeOrder` action dispatched to
//! the page's Redux store.

use super::{js_string, JsNumber, VenueFormatter};
use crate::domain::{OrderRow, Settings};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct BinanceFuturesFormatter;

#[derive(Serialize)]
struct Action<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    payload: PlaceOrder<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrder<'a> {
    symbol: &'a str,
    quantity: JsNumber,
    #[serde(rename = "type")]
    kind: &'static str,
    time_in_force: &'static str,
    leverage: JsNumber,
    side: &'static str,
    stop_price: (),
    working_type: (),
    position_side: &'static str,
    price: String,
}

impl VenueFormatter for BinanceFuturesFormatter {
    fn name(&self) -> &str {
        "binance-futures"
    }

    fn render_order(&self, settings: &Settings, row: &OrderRow) -> Result<String, serde_json::Error> {
        let buy = row.is_buy();
        let action = Action {
            kind: "futuresOrderForm/placeOrder",
            payload: PlaceOrder {
                symbol: &settings.symbol,
                quantity: JsNumber(row.amount.abs()),
                kind: "LIMIT",
                time_in_force: "GTC",
                leverage: JsNumber(settings.leverage),
                side: if buy { "BUY" } else { "SELL" },
                stop_price: (),
                working_type: (),
                position_side: if buy { "LONG" } else { "SHORT" },
                price: js_string(row.price),
            },
        };
        Ok(format!("__NEXT_REDUX_STORE__.dispatch({})", serde_json::to_string(&action)?))
    }
}
