//! Raw Polygon response shapes and the transformation rules that turn them
//! into canonical records.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::PROVIDER_ID;
use crate::errors::{FetchError, FetchResult};
use crate::models::{OptionsAggregate, OptionsContract};

/// One page of the contract listing endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ContractsResponse {
    #[serde(default)]
    pub(super) results: Vec<RawContract>,
    /// Cursor URL for the next page, absent on the last one
    #[serde(default)]
    pub(super) next_url: Option<String>,
}

/// A contract listing record as the vendor returns it.
///
/// Only the fields that survive normalization are captured; the
/// administrative fields (`additional_underlyings`, `cfi`, `correction`,
/// `primary_exchange`, `shares_per_contract`, `exercise_style`,
/// `underlying_ticker`) are dropped here.
#[derive(Debug, Deserialize)]
pub struct RawContract {
    pub contract_type: String,
    pub expiration_date: String,
    pub strike_price: Decimal,
    /// Vendor contract identifier; becomes `contract_ticker`
    pub ticker: String,
}

/// The aggregates endpoint envelope.
#[derive(Debug, Deserialize)]
pub(super) struct AggsResponse {
    #[serde(default)]
    pub(super) results: Vec<RawAgg>,
}

/// A daily aggregate bar as the vendor returns it, with its single-letter
/// wire keys mapped to field names.
#[derive(Debug, Deserialize)]
pub struct RawAgg {
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "vw", default)]
    pub vwap: Option<Decimal>,
    /// Millisecond epoch of the bar start
    #[serde(rename = "t")]
    pub timestamp: i64,
    // Note: n (transaction count) and otc are dropped during normalization
}

fn parse_expiration(s: &str) -> FetchResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| FetchError::Decode {
        provider: PROVIDER_ID,
        message: format!("invalid expiration date {s:?}: {e}"),
    })
}

/// Normalize raw contract listing records.
///
/// Renames `contract_type` to `type` and the vendor `ticker` to
/// `contract_ticker` (both at the column level), parses the expiration date,
/// and attaches the upper-cased underlying symbol to every record.
pub fn normalize_contracts(
    raw: Vec<RawContract>,
    ticker: &str,
) -> FetchResult<Vec<OptionsContract>> {
    let symbol = ticker.to_uppercase();
    raw.into_iter()
        .map(|r| {
            Ok(OptionsContract {
                contract_type: r.contract_type,
                expiration_date: parse_expiration(&r.expiration_date)?,
                strike_price: r.strike_price,
                contract_ticker: r.ticker,
                ticker: symbol.clone(),
            })
        })
        .collect()
}

/// Normalize raw aggregate bars for one contract.
///
/// The millisecond timestamp becomes the bar's UTC calendar day; the
/// time-of-day, transaction count, and otc flag are discarded.
pub fn normalize_aggs(
    raw: Vec<RawAgg>,
    contract_ticker: &str,
) -> FetchResult<Vec<OptionsAggregate>> {
    raw.into_iter()
        .map(|r| {
            let date = DateTime::from_timestamp_millis(r.timestamp)
                .ok_or_else(|| FetchError::Decode {
                    provider: PROVIDER_ID,
                    message: format!("timestamp {} out of range", r.timestamp),
                })?
                .date_naive();
            Ok(OptionsAggregate {
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume: r.volume,
                vwap: r.vwap,
                date,
                contract_ticker: contract_ticker.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contract_parsing_ignores_administrative_fields() {
        let json = r#"{
            "additional_underlyings": [],
            "cfi": "OCASPS",
            "contract_type": "call",
            "correction": 0,
            "exercise_style": "american",
            "expiration_date": "2025-06-20",
            "primary_exchange": "BATO",
            "shares_per_contract": 100,
            "strike_price": 150,
            "ticker": "O:AAPL250620C00150000",
            "underlying_ticker": "AAPL"
        }"#;

        let raw: RawContract = serde_json::from_str(json).unwrap();
        assert_eq!(raw.contract_type, "call");
        assert_eq!(raw.strike_price, dec!(150));
    }

    #[test]
    fn test_normalize_contracts_attaches_uppercased_ticker() {
        let raw = vec![RawContract {
            contract_type: "put".to_string(),
            expiration_date: "2024-12-20".to_string(),
            strike_price: dec!(95),
            ticker: "O:AAPL241220P00095000".to_string(),
        }];

        let contracts = normalize_contracts(raw, "aapl").unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].ticker, "AAPL");
        assert_eq!(contracts[0].contract_ticker, "O:AAPL241220P00095000");
        assert_eq!(
            contracts[0].expiration_date,
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()
        );
    }

    #[test]
    fn test_normalize_contracts_rejects_bad_expiration() {
        let raw = vec![RawContract {
            contract_type: "call".to_string(),
            expiration_date: "20-06-2025".to_string(),
            strike_price: dec!(10),
            ticker: "O:X".to_string(),
        }];

        assert!(matches!(
            normalize_contracts(raw, "X"),
            Err(FetchError::Decode { .. })
        ));
    }

    #[test]
    fn test_normalize_aggs_truncates_timestamp_to_day() {
        // 2023-01-09T22:00:00Z
        let raw = vec![RawAgg {
            open: dec!(1.05),
            high: dec!(1.30),
            low: dec!(1.00),
            close: dec!(1.25),
            volume: dec!(870),
            vwap: Some(dec!(1.18)),
            timestamp: 1_673_301_600_000,
        }];

        let aggs = normalize_aggs(raw, "O:SPY230113C00400000").unwrap();
        assert_eq!(aggs[0].date, NaiveDate::from_ymd_opt(2023, 1, 9).unwrap());
        assert_eq!(aggs[0].contract_ticker, "O:SPY230113C00400000");
    }

    #[test]
    fn test_aggs_wire_keys() {
        let json = r#"{"v": 4, "vw": 2.0105, "o": 1.99, "c": 2.03, "h": 2.03, "l": 1.99, "t": 1706590800000, "n": 4}"#;
        let raw: RawAgg = serde_json::from_str(json).unwrap();
        assert_eq!(raw.volume, dec!(4));
        assert_eq!(raw.vwap, Some(dec!(2.0105)));
        assert_eq!(raw.timestamp, 1_706_590_800_000);
    }
}
