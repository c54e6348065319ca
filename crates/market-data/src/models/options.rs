//! Canonical options records: contract listings and daily aggregate bars.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::table::Table;

/// A normalized options contract listing row.
///
/// Administrative vendor fields (additional underlyings, CFI code,
/// correction counter, primary exchange, shares per contract, exercise
/// style, underlying ticker) are dropped during normalization and never
/// reach this type.
#[derive(Clone, Debug, Serialize)]
pub struct OptionsContract {
    /// "call" or "put"
    #[serde(rename = "type")]
    pub contract_type: String,
    /// Contract expiration day
    pub expiration_date: NaiveDate,
    /// Strike price
    pub strike_price: Decimal,
    /// Vendor contract identifier (e.g. `O:AAPL250620C00150000`)
    pub contract_ticker: String,
    /// Upper-cased underlying symbol the listing was requested for
    pub ticker: String,
}

impl OptionsContract {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 5] = [
        "type",
        "expiration_date",
        "strike_price",
        "contract_ticker",
        "ticker",
    ];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.contract_type.clone().into(),
                r.expiration_date.into(),
                r.strike_price.into(),
                r.contract_ticker.clone().into(),
                r.ticker.clone().into(),
            ]);
        }
        table
    }
}

/// A normalized daily aggregate bar for one options contract.
///
/// The vendor millisecond timestamp is truncated to its UTC calendar day at
/// normalization time; transaction counts and the OTC flag are dropped.
#[derive(Clone, Debug, Serialize)]
pub struct OptionsAggregate {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    /// Volume-weighted average price; absent on some thin sessions
    pub vwap: Option<Decimal>,
    /// Calendar day of the bar
    pub date: NaiveDate,
    /// Contract the bar belongs to
    pub contract_ticker: String,
}

impl OptionsAggregate {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 8] = [
        "open",
        "high",
        "low",
        "close",
        "volume",
        "vwap",
        "date",
        "contract_ticker",
    ];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.open.into(),
                r.high.into(),
                r.low.into(),
                r.close.into(),
                r.volume.into(),
                r.vwap.into(),
                r.date.into(),
                r.contract_ticker.clone().into(),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contract_table_shape() {
        let records = vec![OptionsContract {
            contract_type: "call".to_string(),
            expiration_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            strike_price: dec!(150),
            contract_ticker: "O:AAPL250620C00150000".to_string(),
            ticker: "AAPL".to_string(),
        }];

        let table = OptionsContract::to_table(&records);
        assert_eq!(table.columns(), &OptionsContract::COLUMNS);
        assert_eq!(table.row_count(), 1);
        let date_idx = table.column_index("expiration_date").unwrap();
        assert!(table.rows()[0][date_idx].as_date().is_some());
    }

    #[test]
    fn test_aggregate_table_null_vwap() {
        let records = vec![OptionsAggregate {
            open: dec!(1.2),
            high: dec!(1.5),
            low: dec!(1.1),
            close: dec!(1.4),
            volume: dec!(320),
            vwap: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            contract_ticker: "O:SPY240315P00500000".to_string(),
        }];

        let table = OptionsAggregate::to_table(&records);
        let vwap_idx = table.column_index("vwap").unwrap();
        assert_eq!(table.rows()[0][vwap_idx], Value::Null);
    }
}
