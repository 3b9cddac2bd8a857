//! Web layer for the bus arrival bridge.
//!
//! Provides the client-facing lookup endpoints and the inbound mail
//! webhook for the provider's replies.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
