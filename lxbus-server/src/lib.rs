//! Bus arrival lookup bridge for the Carris network.
//!
//! A web application that answers: "is there a new bus arriving at
//! stop X?" — where the answer arrives asynchronously, parsed out of
//! an inbound email from the tracking provider.

pub mod carris;
pub mod correlate;
pub mod domain;
pub mod registry;
pub mod web;
