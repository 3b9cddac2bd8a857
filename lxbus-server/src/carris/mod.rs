//! Carris provider adapter.
//!
//! Carris answers a stop lookup by email: the stop code is embedded in
//! the subject line and the arrivals are an HTML table in the body.
//! Key characteristics of the feed:
//! - delivery is at-least-once, so the same logical message may be
//!   seen more than once
//! - the body markup is not under our control; a reply may carry zero
//!   arrival rows ("no buses"), and individual cells are noisy
//! - the email's own timestamps are meaningless; only the provider's
//!   in-band arrival-time text is kept
//!
//! Everything here is pure text processing with no state.

mod error;
mod extract;
mod parse;

pub use error::{ExtractionError, ParseError};
pub use extract::extract_stop_code;
pub use parse::parse_arrivals;
