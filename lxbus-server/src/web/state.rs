//! Application state for the web layer.

use std::sync::Arc;

use crate::correlate::Correlator;
use crate::registry::RequestRegistry;

/// Shared application state.
///
/// The registry is the single shared store; the correlator holds its
/// own handle to the same registry.
#[derive(Clone)]
pub struct AppState {
    /// Store of in-flight lookup requests
    pub registry: Arc<RequestRegistry>,

    /// Correlation pass for inbound provider mail
    pub correlator: Arc<Correlator>,
}

impl AppState {
    /// Create a new app state around a registry.
    pub fn new(registry: RequestRegistry) -> Self {
        let registry = Arc::new(registry);
        let correlator = Arc::new(Correlator::new(Arc::clone(&registry)));

        Self {
            registry,
            correlator,
        }
    }
}
