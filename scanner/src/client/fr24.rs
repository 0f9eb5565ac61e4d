//! Live client for the Flightradar24 REST API.
//!
//! One reusable `reqwest::Client` serves both the position feed and the
//! aircraft directory endpoints.

use std::time::Duration;

use anyhow::Context;
use log::debug;
use milwatchcore::feed::{AircraftDetails, BoundingBox, FlightRecord, SearchCandidate};
use milwatchcore::{AircraftDirectory, LookupError, LookupResult, PositionSource};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "https://fr24api.flightradar24.com";

const API_VERSION: &str = "v1";
const POSITIONS_PATH: &str = "/api/live/flight-positions/full";
const AIRCRAFT_PATH: &str = "/api/static/aircraft";
const SEARCH_PATH: &str = "/api/static/aircraft/search";

#[derive(Deserialize)]
struct PositionsEnvelope {
    #[serde(default)]
    data: Vec<FlightRecord>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    items: Vec<SearchCandidate>,
}

pub struct Fr24Client {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl Fr24Client {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> LookupResult<T> {
        let url = self.endpoint(path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header("Accept-Version", API_VERSION)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LookupError::Http(e.to_string()))?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LookupError::Http(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| LookupError::Decode(e.to_string()))
    }
}

impl PositionSource for Fr24Client {
    async fn positions(&self, bounds: &BoundingBox) -> LookupResult<Vec<FlightRecord>> {
        let bounds = bounds.to_query();
        let envelope: PositionsEnvelope = self
            .get_json(POSITIONS_PATH, &[("bounds", bounds.as_str())])
            .await?;
        Ok(envelope.data)
    }
}

impl AircraftDirectory for Fr24Client {
    async fn lookup(&self, identity: &str) -> LookupResult<AircraftDetails> {
        let path = format!("{}/{}", AIRCRAFT_PATH, identity);
        self.get_json(&path, &[]).await
    }

    async fn search(&self, query: &str) -> LookupResult<Vec<SearchCandidate>> {
        let envelope: SearchEnvelope = self.get_json(SEARCH_PATH, &[("query", query)]).await?;
        Ok(envelope.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = Fr24Client::new("https://example.test/", "t", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(POSITIONS_PATH),
            "https://example.test/api/live/flight-positions/full"
        );
    }

    #[test]
    fn positions_envelope_deserializes() {
        let json = r#"{
            "data": [
                {"fr24_id": "3a1b2c4d", "hex": "AE01C2", "callsign": "RCH123",
                 "type": "C17", "reg": "07-7170", "painted_as": "RCH",
                 "operating_as": "RCH", "lat": 25.1, "lon": -80.2,
                 "track": 90, "alt": 31000, "gspeed": 450, "squawk": "1234"}
            ]
        }"#;
        let envelope: PositionsEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].key(), Some("AE01C2"));
    }

    #[test]
    fn search_envelope_tolerates_missing_items() {
        let envelope: SearchEnvelope = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(envelope.items.is_empty());

        let json = r#"{"items": [{"registration": "N123AB", "owner": "Acme Leasing"}]}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.items[0].operator_or_owner(), Some("Acme Leasing"));
    }
}
