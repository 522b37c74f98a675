use super::ids::RowId;
use super::position::PositionSnapshot;
use crate::profit::{position_pl, position_pl_percent};
use serde::{Deserialize, Serialize};

/// A hypothetical exit of a position.
///
/// Copies price and amount out of a [`PositionSnapshot`]; the exit price is
/// free to edit. P/L is derived on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlRow {
    pub id: RowId,
    pub price: f64,
    pub amount: f64,
    pub exit_price: f64,
}

impl PlRow {
    pub fn new(id: impl Into<RowId>, position: PositionSnapshot, exit_price: f64) -> Self {
        Self { id: id.into(), price: position.price, amount: position.amount, exit_price }
    }

    pub fn pl(&self, fee: f64) -> f64 {
        position_pl(self.price, self.exit_price, self.amount, fee)
    }

    pub fn pl_percent(&self) -> f64 {
        position_pl_percent(self.price, self.exit_price, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_pl_from_exit_price() {
        let row = PlRow::new(RowId::new("exit1"), PositionSnapshot::new(100.0, 2.0), 110.0);
        assert_eq!(row.pl(0.0), 20.0);
        assert_eq!(row.pl_percent(), 10.0);
    }

    #[test]
    fn reads_camel_case_exit_price() {
        let row: PlRow =
            serde_json::from_str(r#"{"id":"a","price":1.5,"amount":3,"exitPrice":1.6}"#).unwrap();
        assert_eq!(row.exit_price, 1.6);
    }
}
