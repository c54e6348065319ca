//! FRED (St. Louis Fed) macroeconomic series provider.
//!
//! One endpoint: `/fred/series/observations`. Observations arrive as
//! `{date, value}` string pairs; missing observations are the literal `"."`.

use chrono::{Datelike, NaiveDate};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::{FetchError, FetchResult};
use crate::models::MacroObservation;

const BASE_URL: &str = "https://api.stlouisfed.org/fred";
const PROVIDER_ID: &str = "FRED";

/// Earliest observation year kept after normalization.
const MIN_YEAR: i32 = 2000;

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

/// An observation as the vendor returns it.
#[derive(Debug, Deserialize)]
pub struct RawObservation {
    pub date: String,
    /// Decimal string, or `"."` for a missing observation
    pub value: String,
    // Note: realtime_start and realtime_end are dropped
}

/// FRED series client.
pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Create a new FRED client with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Fetch all observations of one series, normalized and filtered to
    /// observations from 2000 onwards.
    pub fn get_series(&self, series_id: &str) -> FetchResult<Vec<MacroObservation>> {
        let url = format!(
            "{BASE_URL}/series/observations?series_id={series_id}&api_key={}&file_type=json",
            self.api_key
        );

        debug!("FRED request: {}", url.replace(&self.api_key, "***"));

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

        let parsed: ObservationsResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode {
                provider: PROVIDER_ID,
                message: e.to_string(),
            })?;

        if parsed.observations.is_empty() {
            return Err(FetchError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }

        debug!(
            "FRED: fetched {} observations for {}",
            parsed.observations.len(),
            series_id
        );

        normalize_observations(parsed.observations)
    }
}

/// Normalize raw observations: parse dates and values, map `"."` to a
/// missing value, keep observations with `date.year() >= 2000`.
pub fn normalize_observations(raw: Vec<RawObservation>) -> FetchResult<Vec<MacroObservation>> {
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let date = NaiveDate::parse_from_str(&r.date, "%Y-%m-%d").map_err(|e| {
            FetchError::Decode {
                provider: PROVIDER_ID,
                message: format!("invalid observation date {:?}: {e}", r.date),
            }
        })?;
        if date.year() < MIN_YEAR {
            continue;
        }
        let value = match r.value.as_str() {
            "." => None,
            s => Some(s.parse::<f64>().map_err(|e| FetchError::Decode {
                provider: PROVIDER_ID,
                message: format!("invalid observation value {s:?}: {e}"),
            })?),
        };
        out.push(MacroObservation { date, value });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, value: &str) -> RawObservation {
        RawObservation {
            date: date.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_rows_before_2000_are_filtered_out() {
        let raw = vec![
            obs("1999-12-01", "4.5"),
            obs("2000-01-01", "4.7"),
            obs("2024-06-01", "5.3"),
        ];

        let observations = normalize_observations(raw).unwrap();
        assert_eq!(observations.len(), 2);
        assert!(observations.iter().all(|o| o.date.year() >= 2000));
        assert_eq!(observations[0].value, Some(4.7));
    }

    #[test]
    fn test_missing_marker_becomes_none() {
        let raw = vec![obs("2020-04-01", ".")];
        let observations = normalize_observations(raw).unwrap();
        assert_eq!(observations[0].value, None);
    }

    #[test]
    fn test_garbage_value_is_a_decode_error() {
        let raw = vec![obs("2020-04-01", "n/a")];
        assert!(matches!(
            normalize_observations(raw),
            Err(FetchError::Decode { .. })
        ));
    }

    #[test]
    fn test_observation_wire_shape() {
        let json = r#"{"realtime_start": "2024-01-01", "realtime_end": "2024-01-01", "date": "2020-04-01", "value": "2.3"}"#;
        let raw: RawObservation = serde_json::from_str(json).unwrap();
        assert_eq!(raw.date, "2020-04-01");
        assert_eq!(raw.value, "2.3");
    }
}
