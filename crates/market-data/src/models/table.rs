//! Generic tabular representation handed to the storage layer.
//!
//! Canonical record types are strongly typed; the store adapter is not. A
//! [`Table`] is the meeting point: ordered column names plus rows of loosely
//! typed [`Value`]s, the shape an `INSERT` or an arbitrary `SELECT` works in.

use chrono::NaiveDate;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single cell of a [`Table`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    /// Missing value
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Calendar date (no time-of-day component)
    Date(NaiveDate),
}

impl Value {
    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the date if this cell holds one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        v.to_f64().map(Value::Float).unwrap_or(Value::Null)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// An ordered sequence of rows with named columns.
///
/// Tables are append-only: rows are pushed during construction and never
/// mutated afterwards.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The row length must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row length must match column count"
        );
        self.rows.push(row);
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, in insertion order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_push_and_read_back() {
        let mut table = Table::new(["ticker", "close"]);
        table.push_row(vec!["AAPL".into(), Value::Float(150.25)]);
        table.push_row(vec!["MSFT".into(), Value::Float(310.0)]);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns(), &["ticker", "close"]);
        assert_eq!(table.rows()[0][0], Value::Text("AAPL".to_string()));
    }

    #[test]
    fn test_column_index() {
        let table = Table::new(["date", "value"]);
        assert_eq!(table.column_index("value"), Some(1));
        assert_eq!(table.column_index("missing"), None);
    }

    #[test]
    #[should_panic(expected = "row length must match column count")]
    fn test_row_length_mismatch_panics() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec![Value::Int(1)]);
    }

    #[test]
    fn test_value_from_decimal() {
        assert_eq!(Value::from(dec!(101.2346)), Value::Float(101.2346));
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert!(Value::from(None::<f64>).is_null());
    }

    #[test]
    fn test_value_as_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(Value::Date(d).as_date(), Some(d));
        assert_eq!(Value::Text("2024-01-15".to_string()).as_date(), None);
    }
}
