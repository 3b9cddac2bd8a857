//! Registry error types.

use crate::domain::RequestId;

/// Errors from request store operations.
///
/// Both variants are normal operational conditions rather than faults:
/// clients poll stale or garbage handles (`NotFound`), and racing
/// correlation passes lose the completion race (`InvalidState`).
/// Neither corrupts registry state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The handle is unknown or has expired out of the store.
    #[error("no such request: {0}")]
    NotFound(RequestId),

    /// The request is no longer pending; the earlier completion stands.
    #[error("request {0} already completed")]
    InvalidState(RequestId),
}
