//! Ladder settings and their validation.

use crate::error::{ConfigError, EngineError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the price step grows from one rung to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceScale {
    /// Constant relative step: `price * x_price`.
    Linear,
    /// Step widened by `log10((index + 2) * 1.3)`.
    #[default]
    Log10,
}

/// Inputs to a ladder computation.
///
/// Keys are snake_case; camelCase spellings are accepted as aliases. The
/// price scale is only read from `price_scale`, and `fee` is a fraction
/// (0.00075), not a percent (0.075).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Opaque instrument id, only used by venue exports and snapshot import.
    pub symbol: String,
    #[serde(alias = "entryPrice")]
    pub entry_price: f64,
    /// Positive for long ladders, negative for short.
    #[serde(alias = "entryAmount")]
    pub entry_amount: f64,
    /// Target move in percent. The sign sets the ladder direction.
    #[serde(alias = "pricePercent")]
    pub price_percent: f64,
    #[serde(alias = "xPrice")]
    pub x_price: f64,
    #[serde(alias = "xAmount")]
    pub x_amount: f64,
    /// Scale amounts off the cumulative position instead of the last order.
    #[serde(alias = "xPositionAmount")]
    pub x_position_amount: bool,
    /// Step index from which amount scaling applies.
    #[serde(alias = "xAmountAfter")]
    pub x_amount_after: usize,
    pub price_scale: PriceScale,
    pub leverage: f64,
    #[serde(alias = "minMargin")]
    pub min_margin: f64,
    /// Taker fee per side, as a fraction (0.00075 = 0.075%).
    pub fee: f64,
    #[serde(alias = "affCode", skip_serializing_if = "Option::is_none")]
    pub aff_code: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbol: "tBTCF0:USTF0".into(),
            entry_price: 9000.0,
            entry_amount: 0.005,
            price_percent: -10.0,
            x_price: 0.011,
            x_amount: 2.0,
            x_position_amount: false,
            x_amount_after: 2,
            price_scale: PriceScale::Log10,
            leverage: 25.0,
            min_margin: 0.0,
            fee: 0.00075,
            aff_code: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file and validate them.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string and validate them.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the generator cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        positive("entry_price", self.entry_price)?;
        positive("leverage", self.leverage)?;
        finite("entry_amount", self.entry_amount)?;
        finite("price_percent", self.price_percent)?;
        finite("x_amount", self.x_amount)?;
        finite("fee", self.fee)?;
        non_negative("x_price", self.x_price)?;
        non_negative("min_margin", self.min_margin)?;
        Ok(())
    }

    /// Fee applied to P/L projections that include both entry and exit.
    pub fn round_trip_fee(&self) -> f64 {
        self.fee * 2.0
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidSettings { field, reason: format!("{value} is not a number") })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), EngineError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidSettings {
            field,
            reason: format!("must be greater than zero, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), EngineError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidSettings { field, reason: format!("must not be negative, got {value}") })
    }
}
