//! Canonical price records: daily bars, short quotes, market capitalization.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::table::Table;

/// What kind of instrument a price-history request is for.
///
/// Forex pairs and indices have no meaningful volume in the vendor's
/// response, so their canonical tables carry no volume column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggKind {
    Equity,
    Forex,
    Index,
}

/// A normalized daily price bar.
#[derive(Clone, Debug, Serialize)]
pub struct PriceBar {
    /// Calendar day of the bar
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Absent for forex and index instruments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    /// Day-over-day change, rounded to 4 decimals
    pub change: Decimal,
    /// Day-over-day change in percent, rounded to 4 decimals
    pub percent_change: Decimal,
    /// Volume-weighted average price, rounded to 4 decimals
    pub vwap: Decimal,
    /// Upper-cased instrument symbol
    pub ticker: String,
}

impl PriceBar {
    /// Convert a record set into its stored tabular shape.
    ///
    /// The volume column is emitted only when the records carry volume, so
    /// forex and index tables have no all-null volume column.
    pub fn to_table(records: &[Self]) -> Table {
        let with_volume = records.iter().any(|r| r.volume.is_some());
        let mut columns = vec!["date", "open", "high", "low", "close"];
        if with_volume {
            columns.push("volume");
        }
        columns.extend(["change", "percent_change", "vwap", "ticker"]);

        let mut table = Table::new(columns);
        for r in records {
            let mut row = vec![
                r.date.into(),
                r.open.into(),
                r.high.into(),
                r.low.into(),
                r.close.into(),
            ];
            if with_volume {
                row.push(r.volume.into());
            }
            row.extend([
                r.change.into(),
                r.percent_change.into(),
                r.vwap.into(),
                r.ticker.clone().into(),
            ]);
            table.push_row(row);
        }
        table
    }
}

/// A passthrough of the vendor's short-quote endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct RealtimeQuote {
    pub symbol: String,
    pub price: Decimal,
    pub volume: Option<Decimal>,
}

impl RealtimeQuote {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 3] = ["symbol", "price", "volume"];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.symbol.clone().into(),
                r.price.into(),
                r.volume.into(),
            ]);
        }
        table
    }
}

/// Current market capitalization of one company.
///
/// The vendor's `date` field is dropped for the current snapshot; only the
/// historical variant ([`MarketCapPoint`]) is dated.
#[derive(Clone, Debug, Serialize)]
pub struct MarketCapSnapshot {
    pub symbol: String,
    pub market_cap: f64,
}

impl MarketCapSnapshot {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 2] = ["symbol", "market_cap"];

    /// Market cap scaled into a `K/M/B/T`-suffixed display string.
    ///
    /// Display-only; stored tables always carry the raw number.
    pub fn market_cap_human(&self) -> String {
        human_readable_number(self.market_cap)
    }

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![r.symbol.clone().into(), r.market_cap.into()]);
        }
        table
    }
}

/// Market capitalization of one company on one day.
#[derive(Clone, Debug, Serialize)]
pub struct MarketCapPoint {
    pub symbol: String,
    pub date: NaiveDate,
    pub market_cap: f64,
}

impl MarketCapPoint {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 3] = ["symbol", "date", "market_cap"];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.symbol.clone().into(),
                r.date.into(),
                r.market_cap.into(),
            ]);
        }
        table
    }
}

/// Scale a magnitude into a `K/M/B/T`-suffixed string with 3 significant
/// digits, dividing by 1000 while the magnitude allows.
pub fn human_readable_number(value: f64) -> String {
    const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

    let mut num = value;
    let mut magnitude = 0;
    while num.abs() >= 1000.0 && magnitude < SUFFIXES.len() - 1 {
        magnitude += 1;
        num /= 1000.0;
    }

    let digits = if num.abs() >= 100.0 {
        0
    } else if num.abs() >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}{}", digits, num, SUFFIXES[magnitude])
}
