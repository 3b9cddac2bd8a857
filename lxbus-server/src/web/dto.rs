//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::correlate::CorrelationReport;
use crate::domain::{ArrivalEntry, PendingRequest, RequestState};

/// Request body for a new arrival lookup.
#[derive(Debug, Deserialize)]
pub struct NewRequestBody {
    /// Stop code to look up
    pub stop_code: String,
}

/// Response to a newly created lookup.
#[derive(Debug, Serialize)]
pub struct NewRequestResponse {
    /// Correlation handle to poll with
    pub request_id: String,
}

/// Response to a status poll.
#[derive(Debug, Serialize)]
pub struct RequestStatusResponse {
    /// Correlation handle
    pub request_id: String,

    /// Stop code the lookup is for
    pub stop_code: String,

    /// One of "pending", "returned_empty", "returned_with_results",
    /// "returned_error"
    pub state: &'static str,

    /// Human-readable status text for the non-result states
    pub message: Option<String>,

    /// Decoded arrivals (non-empty only with results)
    pub arrivals: Vec<ArrivalResult>,
}

impl RequestStatusResponse {
    pub fn from_request(request: &PendingRequest) -> Self {
        let stop = request.stop_code();

        let message = match request.state() {
            RequestState::Pending => {
                Some(format!("reply for stop code {stop} not yet returned"))
            }
            RequestState::ReturnedEmpty => {
                Some(format!("no bus information for stop code {stop}"))
            }
            RequestState::ReturnedError => Some(
                request
                    .error_message()
                    .unwrap_or("lookup failed")
                    .to_string(),
            ),
            RequestState::ReturnedWithResults => None,
        };

        Self {
            request_id: request.id().to_string(),
            stop_code: stop.as_str().to_string(),
            state: state_label(request.state()),
            message,
            arrivals: request.entries().iter().map(ArrivalResult::from_entry).collect(),
        }
    }
}

/// Wire label for a request state.
pub fn state_label(state: RequestState) -> &'static str {
    match state {
        RequestState::Pending => "pending",
        RequestState::ReturnedEmpty => "returned_empty",
        RequestState::ReturnedWithResults => "returned_with_results",
        RequestState::ReturnedError => "returned_error",
    }
}

/// One arrival in a status response.
#[derive(Debug, Serialize)]
pub struct ArrivalResult {
    /// Route identifier
    pub bus_number: String,

    /// Destination text
    pub destination: String,

    /// Provider-reported minutes to arrival, when usable
    pub eta_minutes: Option<u32>,

    /// Provider's arrival-time text, verbatim
    pub provider_timestamp: String,

    /// When the entry was decoded (RFC 3339)
    pub last_modified: String,
}

impl ArrivalResult {
    pub fn from_entry(entry: &ArrivalEntry) -> Self {
        Self {
            bus_number: entry.bus_number.clone(),
            destination: entry.destination.clone(),
            eta_minutes: entry.eta_minutes,
            provider_timestamp: entry.provider_timestamp.clone(),
            last_modified: entry.last_modified.to_rfc3339(),
        }
    }
}

/// Inbound provider mail, as posted by the delivery mechanism.
#[derive(Debug, Deserialize)]
pub struct InboundMailBody {
    /// Message subject line
    pub subject: String,

    /// HTML message body
    pub body: String,
}

/// Response to an inbound mail delivery.
#[derive(Debug, Serialize)]
pub struct CorrelationResponse {
    /// Stop code extracted from the subject
    pub stop_code: String,

    /// Arrival entries parsed from the body
    pub entries_parsed: usize,

    /// Requests settled by this message
    pub completed_requests: usize,

    /// Requests that lost a completion race
    pub failed_requests: usize,
}

impl CorrelationResponse {
    pub fn from_report(report: &CorrelationReport) -> Self {
        Self {
            stop_code: report.stop_code.as_str().to_string(),
            entries_parsed: report.entries_parsed,
            completed_requests: report.completed,
            failed_requests: report.failed.len(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
