//! Martingale Core — ladder generation, position averaging, P/L and liquidation projections.
//!
//! This crate contains the calculation engine:
//! - Magnitude-aware rounding applied once at presentation
//! - Ladder generation with linear or log10 price steps and size scaling
//! - Cost-weighted position averaging (point query and prefix scan)
//! - P/L, P/L% and liquidation price formulas
//! - Derived per-row grid columns served from a single prefix scan
//! - Venue export formatters and exchange snapshot import
//!
//! Every operation is a pure function of its inputs; nothing is retained
//! between calls.

pub mod averaging;
pub mod domain;
pub mod error;
pub mod export;
pub mod grid;
pub mod import;
pub mod ladder;
pub mod liquidation;
pub mod pl_table;
pub mod precision;
pub mod profit;

pub use averaging::{average_position, position_scan};
pub use domain::{IdSequence, OrderRow, PlRow, PositionSnapshot, PriceScale, RowId, Settings};
pub use error::{ConfigError, EngineError};
pub use export::{render_orders, BinanceFuturesFormatter, BitfinexFormatter, VenueFormatter};
pub use grid::{DerivedGrid, GridParams, GridRow};
pub use import::{import_snapshot, ImportedRows, LiveSnapshot};
pub use ladder::{generate_ladder, MAX_LADDER_ROWS};
pub use liquidation::liquidation_price;
pub use pl_table::{pl_rows, DEFAULT_EXIT_PERCENTS};
pub use precision::{decimals_for, precision, round_to};
pub use profit::{percent_price, position_pl, position_pl_percent, price_percent};
