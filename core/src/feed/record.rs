use serde::{Deserialize, Serialize};

/// One observed aircraft as reported by the live position feed.
///
/// Every field is optional on the wire; checks against a missing field
/// simply find no evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// ICAO24 transponder code.
    #[serde(rename = "hex", default)]
    pub identity: Option<String>,
    /// Feed session id, used when the transponder code is absent.
    #[serde(rename = "fr24_id", default)]
    pub alt_identity: Option<String>,
    #[serde(default)]
    pub callsign: Option<String>,
    #[serde(rename = "reg", default)]
    pub registration: Option<String>,
    /// ICAO type designator.
    #[serde(rename = "type", default)]
    pub aircraft_type: Option<String>,
    #[serde(rename = "painted_as", default)]
    pub painted_operator_code: Option<String>,
    #[serde(rename = "operating_as", default)]
    pub operating_operator_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gspeed: Option<i32>,
}

impl FlightRecord {
    pub fn new(identity: &str) -> Self {
        Self {
            identity: Some(identity.to_string()),
            ..Default::default()
        }
    }

    pub fn with_callsign(mut self, callsign: &str) -> Self {
        self.callsign = Some(callsign.to_string());
        self
    }

    pub fn with_registration(mut self, registration: &str) -> Self {
        self.registration = Some(registration.to_string());
        self
    }

    pub fn with_type(mut self, aircraft_type: &str) -> Self {
        self.aircraft_type = Some(aircraft_type.to_string());
        self
    }

    /// Deduplication key: the transponder code, else the session id.
    pub fn key(&self) -> Option<&str> {
        non_blank(&self.identity).or_else(|| non_blank(&self.alt_identity))
    }

    /// Transponder code, or `""` when absent.
    pub fn identity_or_empty(&self) -> &str {
        non_blank(&self.identity).unwrap_or("")
    }

    pub fn registration(&self) -> Option<&str> {
        non_blank(&self.registration)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
