//! Error types for vendor fetch operations.
//!
//! Every fetch adapter returns [`FetchResult`], so "the vendor had nothing
//! for this request" and "the vendor rejected the request" are distinct
//! variants a caller has to match on, not sentinel values to compare against.

use thiserror::Error;

/// Errors that can occur while fetching and normalizing vendor data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The vendor answered successfully but with zero records.
    ///
    /// Typically the symbol, series, or contract has no data for the
    /// requested parameters.
    #[error("{provider}: empty result; check request parameters")]
    EmptyResult {
        /// The vendor that returned no records
        provider: &'static str,
    },

    /// The vendor answered with a non-success HTTP status.
    ///
    /// The raw JSON body is carried through unmodified so callers can
    /// inspect the vendor's own error shape.
    #[error("{provider}: request failed with HTTP {status}")]
    RequestFailed {
        /// The vendor that rejected the request
        provider: &'static str,
        /// HTTP status code of the response
        status: u16,
        /// Raw error body exactly as the vendor returned it
        body: serde_json::Value,
    },

    /// The response payload did not match the expected schema.
    #[error("{provider}: unexpected payload: {message}")]
    Decode {
        /// The vendor whose payload failed to decode
        provider: &'static str,
        /// Description of the mismatch
        message: String,
    },

    /// A transport-level failure while talking to the vendor.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FetchError {
    /// True if this error means "zero records", as opposed to a real failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

/// Result alias used by all fetch adapters and transformation rules.
pub type FetchResult<T> = Result<T, FetchError>;
