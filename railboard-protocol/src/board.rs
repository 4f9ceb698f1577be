//! Departure board payload types
//!
//! Every field is optional on the wire. Validation of individual service
//! records is the consumer's job, so one malformed record never fails the
//! decode of the whole board.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

/// Top-level departure board response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureBoard {
    /// Name of the origin station
    #[serde(default)]
    pub location_name: Option<String>,
    /// CRS code of the origin station
    #[serde(default)]
    pub crs: Option<String>,
    /// Upcoming services; absent when nothing runs on the journey
    #[serde(default)]
    pub train_services: Option<Vec<RawService>>,
    /// Operator notices (disruption, engineering works)
    #[serde(default)]
    pub nrcc_messages: Option<Vec<NrccMessage>>,
}

impl DepartureBoard {
    /// Whether the payload carries a services collection
    pub fn has_services(&self) -> bool {
        self.train_services.is_some()
    }

    /// Concatenated operator notice text, if any notice has text
    pub fn notice_text(&self) -> Option<String> {
        let messages = self.nrcc_messages.as_ref()?;
        let mut text = String::new();
        for message in messages {
            if let Some(value) = message.value.as_deref() {
                text.push_str(value);
            }
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One service record as sent by the upstream service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawService {
    /// Scheduled time of departure ("14:32")
    #[serde(default)]
    pub std: Option<String>,
    /// Estimated time of departure ("On time", "14:40", "Delayed", "Cancelled")
    #[serde(default)]
    pub etd: Option<String>,
    /// Destinations, first is the one shown
    #[serde(default)]
    pub destination: Option<Vec<Location>>,
    /// Platform number
    #[serde(default)]
    pub platform: Option<String>,
    /// Train operating company
    #[serde(default)]
    pub operator: Option<String>,
    /// Reason for a delay
    #[serde(default)]
    pub delay_reason: Option<String>,
    /// Reason for a cancellation
    #[serde(default)]
    pub cancel_reason: Option<String>,
}

impl RawService {
    /// Name of the first listed destination
    pub fn destination_name(&self) -> Option<&str> {
        self.destination
            .as_ref()?
            .first()?
            .location_name
            .as_deref()
    }
}

/// A calling point
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Station name
    #[serde(default)]
    pub location_name: Option<String>,
    /// Station CRS code
    #[serde(default)]
    pub crs: Option<String>,
}

/// Operator notice
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NrccMessage {
    /// Notice text
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}
