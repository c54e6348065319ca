//! findata market data crate
//!
//! Fetches financial market data from three vendors, normalizes the
//! heterogeneous payloads into canonical typed records, and exposes a
//! generic [`Table`] shape for relational storage.
//!
//! # Overview
//!
//! - **Polygon** ([`PolygonClient`]): options contract listings and daily
//!   aggregate bars per contract
//! - **FRED** ([`FredClient`]): macroeconomic time series observations
//! - **FMP** ([`FmpClient`]): daily price history, short quotes, market
//!   capitalization, index constituents, financial statements, dividends
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   Fetch Adapter  |  (PolygonClient, FredClient, FmpClient)
//! +------------------+
//!          |  raw vendor payload
//!          v
//! +------------------+
//! | Transformation   |  (pure normalize_* rules: rename, coerce,
//! |      Rule        |   filter, derive)
//! +------------------+
//!          |  canonical records
//!          v
//! +------------------+
//! |  Canonical model |  (OptionsContract, PriceBar, IncomeStatement, ...)
//! +------------------+
//!          |  to_table()
//!          v
//! +------------------+
//! |      Table       |  (handed to the storage crate, or kept in memory)
//! +------------------+
//! ```
//!
//! Every fetch operation is a blocking call returning [`FetchResult`]. An
//! empty vendor response is [`FetchError::EmptyResult`] and a vendor
//! rejection carries the raw error body; a payload that doesn't match the
//! expected schema fails hard as [`FetchError::Decode`]. There are no
//! retries and no shared state between calls.

pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{
    human_readable_number, AggKind, BalanceSheet, CashFlow, Dividend, IncomeStatement,
    IndexConstituent, MacroObservation, MarketCapPoint, MarketCapSnapshot, OptionsAggregate,
    OptionsContract, PriceBar, RealtimeQuote, Table, Value,
};

// Re-export errors
pub use errors::{FetchError, FetchResult};

// Re-export vendor clients
pub use provider::fmp::FmpClient;
pub use provider::fred::FredClient;
pub use provider::polygon::PolygonClient;
pub use provider::{DEFAULT_RANGE_END, DEFAULT_RANGE_START};
