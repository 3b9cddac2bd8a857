//! Mail correlation: matching inbound provider messages to pending
//! lookup requests.
//!
//! This module implements the core correlation pass that answers:
//! "a provider email just arrived — which open requests does it
//! settle?"
//!
//! One message maps to exactly one stop code, but a stop code may
//! have any number of concurrently pending requests (several clients
//! asking about the same stop). The pass therefore fans out to every
//! pending request for the extracted stop code; completions are
//! independent, and a race lost on one request never blocks settling
//! the others.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::carris::{self, ExtractionError, ParseError};
use crate::domain::{RequestId, StopCode};
use crate::registry::{RegistryError, RequestRegistry};

/// Errors that drop an inbound message before any correlation happens.
///
/// Both are permanent for a given message (redelivery reproduces the
/// same bytes) and leave the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorrelateError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Outcome of one correlation pass.
#[derive(Debug, Clone)]
pub struct CorrelationReport {
    /// Stop code extracted from the message subject.
    pub stop_code: StopCode,

    /// Number of arrival entries parsed from the body.
    pub entries_parsed: usize,

    /// Requests transitioned to a terminal state by this pass.
    pub completed: usize,

    /// Requests that could not be completed, with the reason.
    ///
    /// These are collected, not propagated: the usual cause is losing
    /// a completion race to a duplicate delivery or the expiry sweep.
    pub failed: Vec<(RequestId, RegistryError)>,
}

/// Matches inbound provider messages to pending requests.
///
/// The single entry point [`Correlator::correlate`] is invoked once
/// per delivered message by the mail transport.
pub struct Correlator {
    registry: Arc<RequestRegistry>,
}

impl Correlator {
    pub fn new(registry: Arc<RequestRegistry>) -> Self {
        Self { registry }
    }

    /// Correlate one inbound message against the registry.
    ///
    /// Extracts the stop code from `subject`, parses arrivals out of
    /// `body`, and completes every request still pending for that
    /// stop: with the parsed entries if there are any, or as an empty
    /// ("no buses") result otherwise.
    ///
    /// A message whose stop code has no pending requests is a normal
    /// no-op — everything it could have settled already timed out or
    /// was settled by an earlier delivery.
    pub fn correlate(
        &self,
        subject: &str,
        body: &str,
    ) -> Result<CorrelationReport, CorrelateError> {
        let stop_code = carris::extract_stop_code(subject)?;
        let entries = carris::parse_arrivals(body)?;

        let pending = self.registry.list_pending_by_stop_code(&stop_code);
        if pending.is_empty() {
            debug!(%stop_code, "no pending requests for inbound message, discarding");
            return Ok(CorrelationReport {
                stop_code,
                entries_parsed: entries.len(),
                completed: 0,
                failed: Vec::new(),
            });
        }

        let mut completed = 0;
        let mut failed = Vec::new();

        for request in &pending {
            let id = request.id();
            let result = if entries.is_empty() {
                self.registry.complete_empty(&id)
            } else {
                self.registry.complete_with_results(&id, entries.clone())
            };

            match result {
                Ok(()) => completed += 1,
                Err(e) => {
                    warn!(%stop_code, request_id = %id, error = %e, "completion lost a race");
                    failed.push((id, e));
                }
            }
        }

        debug!(
            %stop_code,
            entries = entries.len(),
            completed,
            failed = failed.len(),
            "correlated inbound message"
        );

        Ok(CorrelationReport {
            stop_code,
            entries_parsed: entries.len(),
            completed,
            failed,
        })
    }
}
