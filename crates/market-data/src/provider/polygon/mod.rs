//! Polygon.io options data provider.
//!
//! This module fetches options reference and pricing data:
//! - Contract listings via `/v3/reference/options/contracts` (paginated)
//! - Daily aggregate bars via `/v2/aggs/ticker/{contract}/range/1/day/...`
//!
//! The API key travels as the `apiKey` query parameter. Contract listings
//! page through `next_url` until the vendor stops returning one.

use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

use crate::errors::{FetchError, FetchResult};
use crate::models::{OptionsAggregate, OptionsContract};
use crate::provider::{DEFAULT_RANGE_END, DEFAULT_RANGE_START};

mod models;

pub use models::{normalize_aggs, normalize_contracts, RawAgg, RawContract};

use models::{AggsResponse, ContractsResponse};

const BASE_URL: &str = "https://api.polygon.io";
const PROVIDER_ID: &str = "POLYGON";

/// Contracts returned per listing page.
const CONTRACTS_PAGE_LIMIT: u32 = 1000;

/// Maximum aggregate bars returned per request.
const AGGS_LIMIT: u32 = 5000;

/// Polygon.io options data client.
pub struct PolygonClient {
    client: Client,
    api_key: String,
}

impl PolygonClient {
    /// Create a new Polygon client with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request, returning the body text of a successful response.
    ///
    /// A non-success status comes back as [`FetchError::RequestFailed`]
    /// carrying the vendor's raw JSON body.
    fn fetch(&self, url: &str) -> FetchResult<String> {
        // the API key is appended as a query param below, never logged
        debug!("Polygon request: {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()?;

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

        Ok(text)
    }

    fn parse<T: serde::de::DeserializeOwned>(text: &str) -> FetchResult<T> {
        serde_json::from_str(text).map_err(|e| FetchError::Decode {
            provider: PROVIDER_ID,
            message: e.to_string(),
        })
    }

    /// List every active options contract on an underlying ticker.
    ///
    /// Pages through the full listing before normalizing. An empty listing
    /// is reported as [`FetchError::EmptyResult`]; the emptiness check runs
    /// on the raw records, before any cleaning touches them.
    pub fn get_contracts_from_ticker(&self, ticker: &str) -> FetchResult<Vec<OptionsContract>> {
        let symbol = ticker.to_uppercase();
        let mut url = format!(
            "{BASE_URL}/v3/reference/options/contracts?underlying_ticker={symbol}&limit={CONTRACTS_PAGE_LIMIT}"
        );

        let mut contracts: Vec<RawContract> = Vec::new();
        loop {
            let text = self.fetch(&url)?;
            let page: ContractsResponse = Self::parse(&text)?;
            contracts.extend(page.results);
            match page.next_url {
                Some(next) => url = next,
                None => break,
            }
        }

        debug!("Polygon: listed {} contracts for {}", contracts.len(), symbol);

        if contracts.is_empty() {
            return Err(FetchError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }
        normalize_contracts(contracts, &symbol)
    }

    /// Fetch daily aggregate bars for one option contract over the default
    /// historical range.
    pub fn get_aggs_options(&self, contract_ticker: &str) -> FetchResult<Vec<OptionsAggregate>> {
        let url = format!(
            "{BASE_URL}/v2/aggs/ticker/{contract_ticker}/range/1/day/{DEFAULT_RANGE_START}/{DEFAULT_RANGE_END}?limit={AGGS_LIMIT}"
        );

        let text = self.fetch(&url)?;
        let response: AggsResponse = Self::parse(&text)?;

        if response.results.is_empty() {
            return Err(FetchError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }

        debug!(
            "Polygon: fetched {} bars for {}",
            response.results.len(),
            contract_ticker
        );

        normalize_aggs(response.results, contract_ticker)
    }
}
