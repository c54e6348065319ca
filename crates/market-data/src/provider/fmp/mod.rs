//! Financial Modeling Prep provider.
//!
//! This module covers the fundamentals vendor's REST surface:
//! - Daily price history (equity, forex, index) via `historical-price-full`
//! - Real-time short quotes via `quote-short`
//! - Market capitalization, current and historical
//! - Index constituent lists (S&P 500, Dow Jones, Nasdaq)
//! - Financial statements (income, balance sheet, cash flow; annual and
//!   quarterly)
//! - Dividend history
//!
//! The API key travels as the `apikey` query parameter. The vendor signals
//! "nothing found" with an empty JSON array or object on a 200 response,
//! which the shared request helper turns into [`FetchError::EmptyResult`]
//! before any payload is decoded.

use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::errors::{FetchError, FetchResult};
use crate::models::{
    AggKind, BalanceSheet, CashFlow, Dividend, IncomeStatement, IndexConstituent, MarketCapPoint,
    MarketCapSnapshot, PriceBar, RealtimeQuote,
};
use crate::provider::{DEFAULT_RANGE_END, DEFAULT_RANGE_START};

mod models;

pub use models::{
    normalize_balance_sheets, normalize_cash_flows, normalize_constituents, normalize_dividends,
    normalize_income_statements, normalize_market_cap_points, normalize_market_cap_snapshots,
    normalize_price_bars, normalize_quotes, RawBalanceSheet, RawCashFlow, RawConstituent,
    RawDividend, RawIncomeStatement, RawMarketCap, RawPriceBar, RawQuoteShort,
};

use models::{DividendHistoryResponse, HistoricalPriceResponse};

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3";
const PROVIDER_ID: &str = "FMP";

/// The historical market-capitalization endpoint silently truncates long
/// ranges, so full histories are assembled from these fixed 5-year windows.
const MARKET_CAP_WINDOWS: [(&str, &str); 5] = [
    ("2000-01-01", "2005-01-01"),
    ("2005-01-01", "2010-01-01"),
    ("2010-01-01", "2015-01-01"),
    ("2015-01-01", "2020-01-01"),
    ("2020-01-01", "2025-01-01"),
];

/// Financial Modeling Prep client.
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request for `path` (endpoint plus query, without the API
    /// key) and decode the payload.
    ///
    /// Failure modes, in order of detection: transport errors, non-success
    /// status (raw body carried through), empty payload, schema mismatch.
    fn fetch<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let sep = if path.contains('?') { '&' } else { '?' };
        let url = format!("{BASE_URL}/{path}{sep}apikey={}", self.api_key);

        debug!("FMP request: {}", url.replace(&self.api_key, "***"));

        let response = self.client.get(&url).send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
            return Err(FetchError::RequestFailed {
                provider: PROVIDER_ID,
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode {
                provider: PROVIDER_ID,
                message: e.to_string(),
            })?;

        let empty = match &value {
            serde_json::Value::Array(items) => items.is_empty(),
            serde_json::Value::Object(fields) => fields.is_empty(),
            _ => false,
        };
        if empty {
            return Err(FetchError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }

        serde_json::from_value(value).map_err(|e| FetchError::Decode {
            provider: PROVIDER_ID,
            message: e.to_string(),
        })
    }

    fn price_history(&self, symbol: &str, kind: AggKind) -> FetchResult<Vec<PriceBar>> {
        let symbol = symbol.to_uppercase();
        let response: HistoricalPriceResponse = self.fetch(&format!(
            "historical-price-full/{symbol}?from={DEFAULT_RANGE_START}&to={DEFAULT_RANGE_END}"
        ))?;

        if response.historical.is_empty() {
            return Err(FetchError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }
        normalize_price_bars(response.historical, &symbol, kind)
    }

    /// Daily price history for an equity over the default range.
    pub fn get_aggs(&self, ticker: &str) -> FetchResult<Vec<PriceBar>> {
        self.price_history(ticker, AggKind::Equity)
    }

    /// Daily price history for a forex pair (e.g. `EURUSD`). No volume.
    pub fn get_aggs_forex(&self, pair: &str) -> FetchResult<Vec<PriceBar>> {
        self.price_history(pair, AggKind::Forex)
    }

    /// Daily price history for an index (e.g. `^GSPC`). No volume.
    pub fn get_aggs_index(&self, symbol: &str) -> FetchResult<Vec<PriceBar>> {
        self.price_history(symbol, AggKind::Index)
    }

    /// Current short quote for a ticker.
    pub fn get_price_rt(&self, ticker: &str) -> FetchResult<Vec<RealtimeQuote>> {
        let raw = self.fetch(&format!("quote-short/{}", ticker.to_uppercase()))?;
        Ok(normalize_quotes(raw))
    }

    /// Current market capitalization for a ticker.
    ///
    /// For display, [`MarketCapSnapshot::market_cap_human`] scales the raw
    /// number into a `K/M/B/T` string; stored values stay numeric.
    pub fn get_market_cap_rt(&self, ticker: &str) -> FetchResult<Vec<MarketCapSnapshot>> {
        let raw = self.fetch(&format!(
            "market-capitalization/{}",
            ticker.to_uppercase()
        ))?;
        Ok(normalize_market_cap_snapshots(raw))
    }

    /// Historical market capitalization between two `%Y-%m-%d` bounds.
    pub fn get_market_cap_range(
        &self,
        ticker: &str,
        start: &str,
        finish: &str,
    ) -> FetchResult<Vec<MarketCapPoint>> {
        let raw = self.fetch(&format!(
            "historical-market-capitalization/{}?from={start}&to={finish}",
            ticker.to_uppercase()
        ))?;
        normalize_market_cap_points(raw)
    }

    /// Full market capitalization history 2000–2025.
    ///
    /// Issues one request per fixed 5-year window, skips windows the vendor
    /// had nothing for, and returns the union sorted by date. Empty only if
    /// every window was empty.
    pub fn get_market_cap_history(&self, ticker: &str) -> FetchResult<Vec<MarketCapPoint>> {
        let mut windows = Vec::with_capacity(MARKET_CAP_WINDOWS.len());
        for (start, finish) in MARKET_CAP_WINDOWS {
            windows.push(self.get_market_cap_range(ticker, start, finish));
        }
        merge_market_cap_windows(windows)
    }

    /// S&P 500 constituent list.
    pub fn get_snp_companies(&self) -> FetchResult<Vec<IndexConstituent>> {
        self.constituents("sp500_constituent")
    }

    /// Dow Jones constituent list.
    pub fn get_dow_companies(&self) -> FetchResult<Vec<IndexConstituent>> {
        self.constituents("dowjones_constituent")
    }

    /// Nasdaq constituent list.
    pub fn get_nasdaq_companies(&self) -> FetchResult<Vec<IndexConstituent>> {
        self.constituents("nasdaq_constituent")
    }

    fn constituents(&self, endpoint: &str) -> FetchResult<Vec<IndexConstituent>> {
        let raw = self.fetch(endpoint)?;
        Ok(normalize_constituents(raw))
    }

    /// Annual income statements.
    pub fn get_income_statement_a(&self, ticker: &str) -> FetchResult<Vec<IncomeStatement>> {
        self.income_statement(ticker, "annual")
    }

    /// Quarterly income statements.
    pub fn get_income_statement_q(&self, ticker: &str) -> FetchResult<Vec<IncomeStatement>> {
        self.income_statement(ticker, "quarter")
    }

    fn income_statement(&self, ticker: &str, period: &str) -> FetchResult<Vec<IncomeStatement>> {
        let raw = self.fetch(&format!(
            "income-statement/{}?period={period}",
            ticker.to_uppercase()
        ))?;
        normalize_income_statements(raw)
    }

    /// Annual balance sheets.
    pub fn get_balance_sheet_a(&self, ticker: &str) -> FetchResult<Vec<BalanceSheet>> {
        self.balance_sheet(ticker, "annual")
    }

    /// Quarterly balance sheets.
    pub fn get_balance_sheet_q(&self, ticker: &str) -> FetchResult<Vec<BalanceSheet>> {
        self.balance_sheet(ticker, "quarter")
    }

    fn balance_sheet(&self, ticker: &str, period: &str) -> FetchResult<Vec<BalanceSheet>> {
        let raw = self.fetch(&format!(
            "balance-sheet-statement/{}?period={period}",
            ticker.to_uppercase()
        ))?;
        normalize_balance_sheets(raw)
    }

    /// Annual cash flow statements.
    pub fn get_cash_flow_a(&self, ticker: &str) -> FetchResult<Vec<CashFlow>> {
        self.cash_flow(ticker, "annual")
    }

    /// Quarterly cash flow statements.
    pub fn get_cash_flow_q(&self, ticker: &str) -> FetchResult<Vec<CashFlow>> {
        self.cash_flow(ticker, "quarter")
    }

    fn cash_flow(&self, ticker: &str, period: &str) -> FetchResult<Vec<CashFlow>> {
        let raw = self.fetch(&format!(
            "cash-flow-statement/{}?period={period}",
            ticker.to_uppercase()
        ))?;
        normalize_cash_flows(raw)
    }

    /// Dividend history, keyed by declaration date.
    ///
    /// A ticker with no dividend history at all is an empty result, not an
    /// empty table.
    pub fn get_dividend(&self, ticker: &str) -> FetchResult<Vec<Dividend>> {
        let symbol = ticker.to_uppercase();
        let response: DividendHistoryResponse =
            self.fetch(&format!("historical-price-full/stock_dividend/{symbol}"))?;

        if response.historical.is_empty() {
            return Err(FetchError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }
        normalize_dividends(response.historical, &symbol)
    }
}

/// Merge per-window market-cap results into one date-sorted history.
///
/// Windows that came back empty are skipped; any other failure propagates.
/// If every window was empty the whole history is an empty result.
pub fn merge_market_cap_windows(
    windows: Vec<FetchResult<Vec<MarketCapPoint>>>,
) -> FetchResult<Vec<MarketCapPoint>> {
    let mut merged = Vec::new();
    for window in windows {
        match window {
            Ok(points) => merged.extend(points),
            Err(FetchError::EmptyResult { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    if merged.is_empty() {
        return Err(FetchError::EmptyResult {
            provider: PROVIDER_ID,
        });
    }
    merged.sort_by_key(|p| p.date);
    Ok(merged)
}
