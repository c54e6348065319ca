//! Vendor fetch adapters.
//!
//! One blocking client per vendor. Each adapter issues a single HTTP call
//! per operation (the contract listing follows vendor pagination), classifies
//! empty and error responses, and hands successful payloads to the matching
//! transformation rule. There are no retries and no shared state beyond the
//! API key and base URL held by each client.

pub mod fmp;
pub mod fred;
pub mod polygon;

/// Default start of historical ranges when an operation takes none.
pub const DEFAULT_RANGE_START: &str = "2000-01-01";

/// Default end of historical ranges when an operation takes none.
pub const DEFAULT_RANGE_END: &str = "2025-01-01";
