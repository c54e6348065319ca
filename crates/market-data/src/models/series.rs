//! Canonical macroeconomic series observation.

use chrono::NaiveDate;
use serde::Serialize;

use super::table::Table;

/// One observation of a macroeconomic time series.
#[derive(Clone, Debug, Serialize)]
pub struct MacroObservation {
    /// Observation date
    pub date: NaiveDate,
    /// Observed value; the vendor reports missing observations as `"."`,
    /// which normalizes to `None`
    pub value: Option<f64>,
}

impl MacroObservation {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 2] = ["date", "value"];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![r.date.into(), r.value.into()]);
        }
        table
    }
}
