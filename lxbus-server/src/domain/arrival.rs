//! Arrival entry records decoded from provider messages.

use chrono::{DateTime, Utc};

/// One bus arrival reported by the provider.
///
/// Entries are decoded from a provider email body and are immutable
/// once appended to a request. Each completed request owns its own
/// entries; they are never shared between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalEntry {
    /// Route identifier as printed by the provider (e.g. "728").
    pub bus_number: String,

    /// Free-text destination of the service.
    pub destination: String,

    /// Provider-reported minutes until arrival.
    ///
    /// `None` when the provider cell was missing or non-numeric; the
    /// feed is noisy and this field is best-effort.
    pub eta_minutes: Option<u32>,

    /// The provider's own arrival-time text, kept verbatim (this is
    /// the upstream estimate, not the email's timestamp).
    pub provider_timestamp: String,

    /// When this entry was decoded.
    pub last_modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_compare_by_value() {
        let now = Utc::now();
        let a = ArrivalEntry {
            bus_number: "728".to_string(),
            destination: "Restelo".to_string(),
            eta_minutes: Some(5),
            provider_timestamp: "17:05".to_string(),
            last_modified: now,
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
