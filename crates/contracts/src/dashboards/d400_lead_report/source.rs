//! Data-source response handling and single-flight load bookkeeping
use super::record::{value_text, LeadRecord};
use serde_json::Value;
use thiserror::Error;

/// Query parameter value selecting the "get data" action
pub const GET_DATA_ACTION: &str = "getData";

/// Why a load attempt failed. Each kind is shown to the user; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Request never produced a usable HTTP response
    #[error("Network Error: {0}")]
    Network(String),

    /// Body is not JSON, or not an array of records
    #[error("Data Error: The server sent a non-JSON response.")]
    Malformed { reason: String, raw: String },

    /// JSON object with an `error` field
    #[error("Data Error: {0}")]
    Server(String),
}

/// `<url>?action=<action>`, appending to an existing query string when present
pub fn request_url(base: &str, action: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}action={}", base, separator, action)
}

/// Classify an HTTP reply that arrived.
///
/// The body decides, whatever the status: a 404 page is malformed data and a 500 carrying
/// `{"error": ...}` is a server error. Only a failure status with an empty body is
/// reported as a network error.
pub fn classify_response(
    success: bool,
    status: &str,
    body: &str,
) -> Result<Vec<LeadRecord>, LoadError> {
    if !success && body.trim().is_empty() {
        return Err(LoadError::Network(format!("HTTP error: {}", status)));
    }
    parse_records(body)
}

/// Classify a response body.
///
/// Array entries that are not JSON objects carry no fields and are skipped.
pub fn parse_records(body: &str) -> Result<Vec<LeadRecord>, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        reason,
        raw: body.to_string(),
    };

    let value: Value = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(LeadRecord::from(map)),
                _ => None,
            })
            .collect()),
        Value::Object(map) => match map.get("error").and_then(value_text) {
            Some(message) => Err(LoadError::Server(message)),
            None => Err(malformed("expected a JSON array of records".to_string())),
        },
        _ => Err(malformed("expected a JSON array of records".to_string())),
    }
}

/// Handle for one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Keeps at most one fetch in flight and recognises stale completions.
///
/// `begin` refuses to start while a load is running. `invalidate` abandons the running
/// load (e.g. when the dashboard is left); its result is then rejected by `finish`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSequencer {
    generation: u64,
    in_flight: Option<u64>,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin(&mut self) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        Some(LoadTicket(self.generation))
    }

    /// Returns `true` when the ticket belongs to the current load and its result may be applied
    pub fn finish(&mut self, ticket: LoadTicket) -> bool {
        if self.in_flight == Some(ticket.0) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
    }
}
