//! The schema-agnostic store adapter.
//!
//! [`DataStore`] holds one long-lived connection to a file-backed SQLite
//! database and moves [`Table`]s in and out of it. It knows nothing about
//! the canonical schemas: tables are created from whatever columns a write
//! brings, and queries are caller-supplied SQL. The one shape rule it
//! enforces on the way out is date coercion: result columns literally named
//! `date` or `expiration_date` come back as [`Value::Date`].
//!
//! The connection is not synchronized; callers serialize their own access.

use std::path::Path;

use chrono::NaiveDate;
use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use findata_market_data::{Table, Value};

use crate::errors::{StoreError, StoreResult};

/// Format dates are stored in, and parsed back out of, TEXT columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result columns with these exact names are coerced to dates on query.
const DATE_COLUMNS: [&str; 2] = ["date", "expiration_date"];

/// A single-connection SQLite store for canonical tables.
pub struct DataStore {
    conn: Connection,
}

impl DataStore {
    /// Open (creating if needed) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database. Useful for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Append a table's rows to `table_name`, creating the table on first
    /// write with column types inferred from the data.
    pub fn data_add(&self, table: &Table, table_name: &str) -> StoreResult<()> {
        validate_identifier(table_name)?;
        for column in table.columns() {
            validate_identifier(column)?;
        }
        if table.columns().is_empty() {
            return Err(StoreError::EmptyTable);
        }

        let column_defs: Vec<String> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, name)| format!("\"{}\" {}", name, column_affinity(table, i)))
            .collect();
        let create = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
            table_name,
            column_defs.join(", ")
        );
        self.conn.execute(&create, [])?;

        let quoted: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect();
        let placeholders = vec!["?"; table.columns().len()].join(", ");
        let insert = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            table_name,
            quoted.join(", "),
            placeholders
        );

        let mut statement = self.conn.prepare(&insert)?;
        for row in table.rows() {
            statement.execute(rusqlite::params_from_iter(row.iter().map(to_sql_value)))?;
        }

        debug!("stored {} rows into {}", table.row_count(), table_name);
        Ok(())
    }

    /// Run caller-supplied SQL and materialize the result as a [`Table`].
    ///
    /// TEXT values in columns named `date` or `expiration_date` are parsed
    /// back into dates; values that don't parse are left as text.
    pub fn data_query(&self, sql: &str) -> StoreResult<Table> {
        let mut statement = self.conn.prepare(sql)?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let date_indices: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, name)| DATE_COLUMNS.contains(&name.as_str()))
            .map(|(i, _)| i)
            .collect();

        let column_count = columns.len();
        let mut table = Table::new(columns);

        let mut rows = statement.query([])?;
        while let Some(row) = rows.next()? {
            let mut out = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let mut value = read_value(row.get_ref(i)?);
                if date_indices.contains(&i) {
                    value = coerce_date(value);
                }
                out.push(value);
            }
            table.push_row(out);
        }

        Ok(table)
    }

    /// Names of all tables in the database.
    pub fn get_table_names(&self) -> StoreResult<Vec<String>> {
        let mut statement = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")?;
        let names = statement
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Drop a table. Errors if the table does not exist.
    pub fn delete_table(&self, table_name: &str) -> StoreResult<()> {
        validate_identifier(table_name)?;
        self.conn
            .execute(&format!("DROP TABLE \"{}\"", table_name), [])?;
        Ok(())
    }

    /// Close the store, flushing the underlying connection.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }
}

fn validate_identifier(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

/// SQLite type affinity for a column, inferred from its first non-null
/// value. Columns that are entirely null default to TEXT.
fn column_affinity(table: &Table, index: usize) -> &'static str {
    for row in table.rows() {
        match &row[index] {
            Value::Null => continue,
            Value::Int(_) => return "INTEGER",
            Value::Float(_) => return "REAL",
            Value::Text(_) | Value::Date(_) => return "TEXT",
        }
    }
    "TEXT"
}

fn to_sql_value(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Int(i) => rusqlite::types::Value::Integer(*i),
        Value::Float(f) => rusqlite::types::Value::Real(*f),
        Value::Text(s) => rusqlite::types::Value::Text(s.clone()),
        Value::Date(d) => rusqlite::types::Value::Text(d.format(DATE_FORMAT).to_string()),
    }
}

fn read_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        // this pipeline never writes blobs
        ValueRef::Blob(_) => Value::Null,
    }
}

fn coerce_date(value: Value) -> Value {
    match value {
        Value::Text(s) => match NaiveDate::parse_from_str(&s, DATE_FORMAT) {
            Ok(d) => Value::Date(d),
            Err(_) => Value::Text(s),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_table() -> Table {
        let mut table = Table::new(["ticker", "date", "close"]);
        table.push_row(vec![
            "AAPL".into(),
            date("2024-01-02").into(),
            Value::Float(185.64),
        ]);
        table.push_row(vec![
            "AAPL".into(),
            date("2024-01-03").into(),
            Value::Float(184.25),
        ]);
        table
    }

    #[test]
    fn test_round_trip_preserves_rows_and_date_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path().join("findata.db")).unwrap();

        store.data_add(&sample_table(), "prices").unwrap();
        let result = store.data_query("SELECT * FROM prices").unwrap();

        assert_eq!(result.row_count(), 2);
        let date_idx = result.column_index("date").unwrap();
        assert_eq!(result.rows()[0][date_idx], Value::Date(date("2024-01-02")));

        store.close().unwrap();
    }

    #[test]
    fn test_data_add_appends_on_second_write() {
        let store = DataStore::open_in_memory().unwrap();
        store.data_add(&sample_table(), "prices").unwrap();
        store.data_add(&sample_table(), "prices").unwrap();

        let result = store.data_query("SELECT * FROM prices").unwrap();
        assert_eq!(result.row_count(), 4);
    }

    #[test]
    fn test_expiration_date_is_coerced_too() {
        let store = DataStore::open_in_memory().unwrap();
        let mut table = Table::new(["contract_ticker", "expiration_date"]);
        table.push_row(vec!["O:AAPL250620C00150000".into(), date("2025-06-20").into()]);
        store.data_add(&table, "contracts").unwrap();

        let result = store.data_query("SELECT * FROM contracts").unwrap();
        let idx = result.column_index("expiration_date").unwrap();
        assert_eq!(result.rows()[0][idx].as_date(), Some(date("2025-06-20")));
    }

    #[test]
    fn test_non_date_columns_stay_text() {
        let store = DataStore::open_in_memory().unwrap();
        let mut table = Table::new(["symbol", "date_added"]);
        table.push_row(vec!["MMM".into(), "1976-08-09".into()]);
        store.data_add(&table, "constituents").unwrap();

        let result = store.data_query("SELECT * FROM constituents").unwrap();
        let idx = result.column_index("date_added").unwrap();
        assert_eq!(
            result.rows()[0][idx],
            Value::Text("1976-08-09".to_string())
        );
    }

    #[test]
    fn test_null_round_trip() {
        let store = DataStore::open_in_memory().unwrap();
        let mut table = Table::new(["date", "value"]);
        table.push_row(vec![date("2020-04-01").into(), Value::Null]);
        store.data_add(&table, "series").unwrap();

        let result = store.data_query("SELECT * FROM series").unwrap();
        assert!(result.rows()[0][1].is_null());
    }

    #[test]
    fn test_canonical_records_round_trip() {
        use findata_market_data::MacroObservation;

        let observations = vec![
            MacroObservation {
                date: date("2020-04-01"),
                value: Some(2.3),
            },
            MacroObservation {
                date: date("2020-07-01"),
                value: None,
            },
        ];

        let store = DataStore::open_in_memory().unwrap();
        store
            .data_add(&MacroObservation::to_table(&observations), "cpi")
            .unwrap();

        let result = store.data_query("SELECT * FROM cpi").unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows()[0][0], Value::Date(date("2020-04-01")));
        assert_eq!(result.rows()[1][1], Value::Null);
    }

    #[test]
    fn test_get_table_names_and_delete() {
        let store = DataStore::open_in_memory().unwrap();
        store.data_add(&sample_table(), "prices").unwrap();
        store.data_add(&sample_table(), "more_prices").unwrap();

        let mut names = store.get_table_names().unwrap();
        names.sort();
        assert_eq!(names, ["more_prices", "prices"]);

        store.delete_table("prices").unwrap();
        assert_eq!(store.get_table_names().unwrap(), ["more_prices"]);
    }

    #[test]
    fn test_delete_missing_table_errors() {
        let store = DataStore::open_in_memory().unwrap();
        assert!(matches!(
            store.delete_table("nothing_here"),
            Err(StoreError::Sqlite(_))
        ));
    }

    #[test]
    fn test_malicious_table_name_is_rejected() {
        let store = DataStore::open_in_memory().unwrap();
        let result = store.data_add(&sample_table(), "prices\"; DROP TABLE x;--");
        assert!(matches!(result, Err(StoreError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_empty_columns_rejected() {
        let store = DataStore::open_in_memory().unwrap();
        let table = Table::new(Vec::<String>::new());
        assert!(matches!(
            store.data_add(&table, "empty"),
            Err(StoreError::EmptyTable)
        ));
    }

    #[test]
    fn test_arbitrary_query_projection() {
        let store = DataStore::open_in_memory().unwrap();
        store.data_add(&sample_table(), "prices").unwrap();

        let result = store
            .data_query("SELECT ticker, close FROM prices WHERE close > 185")
            .unwrap();
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.columns(), &["ticker", "close"]);
    }
}
