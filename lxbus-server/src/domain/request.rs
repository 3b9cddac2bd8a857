//! Pending lookup requests and their lifecycle.
//!
//! A request moves from `Pending` to exactly one terminal state. The
//! fields enforcing that invariant are private; all mutation goes
//! through [`PendingRequest::complete`], which rejects a second
//! transition.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{ArrivalEntry, StopCode};

/// Error returned when parsing an invalid request id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid request id")]
pub struct InvalidRequestId;

/// Opaque correlation handle for one pending lookup.
///
/// Freshly generated ids are random 128-bit values; collisions are
/// treated as impossible.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a fresh, unique handle.
    pub fn generate() -> Self {
        RequestId(Uuid::new_v4())
    }

    /// Parse a handle previously issued by [`RequestId::generate`].
    pub fn parse(s: &str) -> Result<Self, InvalidRequestId> {
        Uuid::from_str(s).map(RequestId).map_err(|_| InvalidRequestId)
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle state of a lookup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Created, no provider reply correlated yet.
    Pending,

    /// Provider replied with no buses for the stop.
    ReturnedEmpty,

    /// Provider replied with at least one arrival entry.
    ReturnedWithResults,

    /// The request failed or expired before a reply arrived.
    ReturnedError,
}

impl RequestState {
    /// Whether this state permits no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestState::Pending)
    }
}

/// Outcome applied when completing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Arrivals were decoded for the stop.
    WithResults(Vec<ArrivalEntry>),

    /// The provider reported no buses.
    Empty,

    /// The lookup failed or expired.
    Error(String),
}

/// Error returned when completing an already-terminal request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request already completed")]
pub struct AlreadyTerminal;

/// One client-issued arrival lookup awaiting a provider reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    id: RequestId,
    stop_code: StopCode,
    state: RequestState,
    entries: Vec<ArrivalEntry>,
    error: Option<String>,
    created_at: DateTime<Utc>,
}

impl PendingRequest {
    /// Create a new request in the `Pending` state with a fresh handle.
    pub fn new(stop_code: StopCode) -> Self {
        Self {
            id: RequestId::generate(),
            stop_code,
            state: RequestState::Pending,
            entries: Vec::new(),
            error: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn stop_code(&self) -> &StopCode {
        &self.stop_code
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Decoded arrivals. Non-empty only in `ReturnedWithResults`.
    pub fn entries(&self) -> &[ArrivalEntry] {
        &self.entries
    }

    /// Error message stored on the `ReturnedError` transition.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply a completion outcome, transitioning to a terminal state.
    ///
    /// Fails with [`AlreadyTerminal`] if the request has already been
    /// completed; the earlier transition stands untouched.
    pub fn complete(&mut self, outcome: Completion) -> Result<(), AlreadyTerminal> {
        if self.state.is_terminal() {
            return Err(AlreadyTerminal);
        }

        match outcome {
            Completion::WithResults(entries) => {
                self.entries = entries;
                self.state = RequestState::ReturnedWithResults;
            }
            Completion::Empty => {
                self.state = RequestState::ReturnedEmpty;
            }
            Completion::Error(message) => {
                self.error = Some(message);
                self.state = RequestState::ReturnedError;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(code: &str) -> StopCode {
        StopCode::parse(code).unwrap()
    }

    fn entry(bus: &str) -> ArrivalEntry {
        ArrivalEntry {
            bus_number: bus.to_string(),
            destination: "Restelo".to_string(),
            eta_minutes: Some(5),
            provider_timestamp: "17:05".to_string(),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn new_request_is_pending() {
        let req = PendingRequest::new(stop("758"));
        assert_eq!(req.state(), RequestState::Pending);
        assert!(req.entries().is_empty());
        assert!(req.error_message().is_none());
    }

    #[test]
    fn requests_compare_by_value() {
        let req = PendingRequest::new(stop("758"));
        let copy = req.clone();
        assert_eq!(req, copy);

        let other = PendingRequest::new(stop("758"));
        assert_ne!(req, other);
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = PendingRequest::new(stop("758"));
        let b = PendingRequest::new(stop("758"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn request_id_roundtrip() {
        let id = RequestId::generate();
        let parsed = RequestId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn garbage_request_id_rejected() {
        assert!(RequestId::parse("").is_err());
        assert!(RequestId::parse("not-a-handle").is_err());
    }

    #[test]
    fn complete_with_results_stores_entries() {
        let mut req = PendingRequest::new(stop("758"));
        req.complete(Completion::WithResults(vec![entry("728")]))
            .unwrap();
        assert_eq!(req.state(), RequestState::ReturnedWithResults);
        assert_eq!(req.entries().len(), 1);
        assert_eq!(req.entries()[0].bus_number, "728");
    }

    #[test]
    fn complete_empty_stores_no_entries() {
        let mut req = PendingRequest::new(stop("758"));
        req.complete(Completion::Empty).unwrap();
        assert_eq!(req.state(), RequestState::ReturnedEmpty);
        assert!(req.entries().is_empty());
    }

    #[test]
    fn complete_error_stores_message() {
        let mut req = PendingRequest::new(stop("758"));
        req.complete(Completion::Error("expired".to_string())).unwrap();
        assert_eq!(req.state(), RequestState::ReturnedError);
        assert_eq!(req.error_message(), Some("expired"));
    }

    #[test]
    fn second_completion_rejected_and_first_wins() {
        let mut req = PendingRequest::new(stop("758"));
        req.complete(Completion::WithResults(vec![entry("728")]))
            .unwrap();

        let err = req.complete(Completion::Empty);
        assert_eq!(err, Err(AlreadyTerminal));

        // The winning transition is untouched
        assert_eq!(req.state(), RequestState::ReturnedWithResults);
        assert_eq!(req.entries().len(), 1);
    }

    #[test]
    fn terminal_states() {
        assert!(!RequestState::Pending.is_terminal());
        assert!(RequestState::ReturnedEmpty.is_terminal());
        assert!(RequestState::ReturnedWithResults.is_terminal());
        assert!(RequestState::ReturnedError.is_terminal());
    }
}
