//! Bitfinex web client: a `WS_REQUEST_SEND` action dispatched to the page
//! store, carrying a new-order websocket frame.

use super::{js_string, JsNumber, VenueFormatter};
use crate::domain::{OrderRow, Settings};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct BitfinexFormatter;

#[derive(Serialize)]
struct Action {
    #[serde(rename = "type")]
    kind: &'static str,
    meta: ActionMeta,
    /// The websocket frame, itself JSON-encoded.
    payload: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionMeta {
    is_public: bool,
    throttle: bool,
}

#[derive(Serialize)]
struct LimitOrder<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    symbol: &'a str,
    flags: u32,
    price: String,
    amount: String,
    meta: OrderMeta<'a>,
}

#[derive(Serialize)]
struct OrderMeta<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    lev: Option<JsNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aff_code: Option<&'a str>,
}

impl VenueFormatter for BitfinexFormatter {
    fn name(&self) -> &str {
        "bitfinex"
    }

    fn render_order(&self, settings: &Settings, row: &OrderRow) -> Result<String, serde_json::Error> {
        let order = LimitOrder {
            kind: "LIMIT",
            symbol: &settings.symbol,
            flags: 0,
            price: js_string(row.price),
            amount: js_string(row.amount),
            meta: OrderMeta {
                lev: (settings.leverage != 0.0).then_some(JsNumber(settings.leverage)),
                aff_code: settings.aff_code.as_deref(),
            },
        };
        // [0, "on", null, order] is the new-order frame
        let frame = serde_json::to_string(&(0, "on", (), &order))?;
        let action = Action {
            kind: "WS_REQUEST_SEND",
            meta: ActionMeta { is_public: false, throttle: true },
            payload: frame,
        };
        Ok(format!("__dispatch({})", serde_json::to_string(&action)?))
    }
}
