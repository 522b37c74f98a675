//! Domain types for the ladder engine

pub mod ids;
pub mod order;
pub mod pl_row;
pub mod position;
pub mod settings;

pub use ids::{IdSequence, RowId};
pub use order::OrderRow;
pub use pl_row::PlRow;
pub use position::PositionSnapshot;
pub use settings::{PriceScale, Settings};
