//! Domain types for the bus arrival bridge.
//!
//! This module contains the core domain model types that represent
//! validated lookup data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod arrival;
mod request;
mod stop_code;

pub use arrival::ArrivalEntry;
pub use request::{
    AlreadyTerminal, Completion, InvalidRequestId, PendingRequest, RequestId, RequestState,
};
pub use stop_code::{InvalidStopCode, StopCode};
