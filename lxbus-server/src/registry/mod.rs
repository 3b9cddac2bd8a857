//! The shared store of in-flight lookup requests.
//!
//! The registry is the only shared mutable state in the system. It is
//! keyed two ways: by handle for client polls and completions, and by
//! stop code for correlation fan-out. Both maps are sharded, so
//! unrelated stop codes never contend on a common lock, and state
//! transitions run under the per-key exclusive guard, which makes
//! exactly one completion win when several race for the same handle.

mod error;

pub use error::RegistryError;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{ArrivalEntry, Completion, PendingRequest, RequestId, RequestState, StopCode};

/// Store of lookup requests, indexed by handle and by stop code.
#[derive(Debug, Default)]
pub struct RequestRegistry {
    /// All requests, keyed by their correlation handle.
    requests: DashMap<RequestId, PendingRequest>,

    /// Handles per stop code, in creation order.
    ///
    /// Handles are appended on creation and never removed; consumers
    /// filter on the live request state.
    by_stop: DashMap<StopCode, Vec<RequestId>>,
}

impl RequestRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new `Pending` request for the stop and return its handle.
    pub fn create_request(&self, stop_code: StopCode) -> RequestId {
        let request = PendingRequest::new(stop_code.clone());
        let id = request.id();

        // Insert into the primary map before indexing, so any handle
        // visible through the index can always be resolved.
        self.requests.insert(id, request);
        self.by_stop.entry(stop_code).or_default().push(id);

        id
    }

    /// Look up a request by handle.
    ///
    /// Unknown handles are a normal condition (clients polling stale
    /// or garbage handles) and report `NotFound`.
    pub fn get_request(&self, id: &RequestId) -> Result<PendingRequest, RegistryError> {
        self.requests
            .get(id)
            .map(|r| r.value().clone())
            .ok_or(RegistryError::NotFound(*id))
    }

    /// All requests still `Pending` for the stop, oldest first.
    pub fn list_pending_by_stop_code(&self, stop_code: &StopCode) -> Vec<PendingRequest> {
        let ids = match self.by_stop.get(stop_code) {
            Some(ids) => ids.value().clone(),
            None => return Vec::new(),
        };

        ids.iter()
            .filter_map(|id| self.requests.get(id))
            .filter(|r| r.state() == RequestState::Pending)
            .map(|r| r.value().clone())
            .collect()
    }

    /// Complete a request with decoded arrival entries.
    pub fn complete_with_results(
        &self,
        id: &RequestId,
        entries: Vec<ArrivalEntry>,
    ) -> Result<(), RegistryError> {
        self.complete(id, Completion::WithResults(entries))
    }

    /// Complete a request with a "no buses reported" outcome.
    pub fn complete_empty(&self, id: &RequestId) -> Result<(), RegistryError> {
        self.complete(id, Completion::Empty)
    }

    /// Complete a request with an error outcome.
    pub fn complete_error(
        &self,
        id: &RequestId,
        message: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.complete(id, Completion::Error(message.into()))
    }

    fn complete(&self, id: &RequestId, outcome: Completion) -> Result<(), RegistryError> {
        // get_mut holds the shard's exclusive guard for the duration of
        // the transition, so concurrent completions serialize here and
        // the losers observe the terminal state.
        let mut request = self
            .requests
            .get_mut(id)
            .ok_or(RegistryError::NotFound(*id))?;

        request
            .complete(outcome)
            .map_err(|_| RegistryError::InvalidState(*id))
    }

    /// Expire every request still `Pending` that was created before
    /// `cutoff`, completing it with an error outcome.
    ///
    /// Expiry is an ordinary completion attempt: a correlation racing
    /// the sweep wins or loses under the same one-transition rule.
    /// Returns the number of requests expired.
    pub fn sweep_expired(&self, cutoff: DateTime<Utc>) -> usize {
        let stale: Vec<RequestId> = self
            .requests
            .iter()
            .filter(|r| r.state() == RequestState::Pending && r.created_at() < cutoff)
            .map(|r| r.id())
            .collect();

        stale
            .iter()
            .filter(|id| {
                self.complete_error(id, "request expired before a provider reply arrived")
                    .is_ok()
            })
            .count()
    }
}
