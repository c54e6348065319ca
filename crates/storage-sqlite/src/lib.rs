//! SQLite storage implementation for findata.
//!
//! This crate is the only place where SQLite dependencies exist. It accepts
//! any [`findata_market_data::Table`] shape (canonical tables are created
//! implicitly on first write and appended to afterwards) and hands query
//! results back in the same shape, with `date`/`expiration_date` columns
//! coerced back to real dates.
//!
//! ```text
//! market-data (canonical records, Table)
//!          │
//!          ▼
//! storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod errors;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use store::DataStore;
