//! Carris adapter error types.

use crate::domain::InvalidStopCode;

/// Errors extracting a stop code from a message subject.
///
/// Extraction failures are permanent: redelivery of the same message
/// would reproduce the same malformed subject, so callers log and
/// drop rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// The subject does not match the provider pattern at all.
    #[error("no stop code in subject: {subject:?}")]
    NoStopCode { subject: String },

    /// The matched digits do not form a valid stop code.
    #[error("unusable stop code in subject: {0}")]
    BadStopCode(#[from] InvalidStopCode),
}

/// Errors parsing arrival entries out of a message body.
///
/// A well-formed body with zero arrival rows is *not* an error; these
/// cover bodies that are not recognizable provider replies at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The body was empty or whitespace.
    #[error("empty message body")]
    EmptyBody,

    /// The body has no arrivals table.
    #[error("no arrivals table in message body")]
    MissingTable,
}
