//! Contact directory with ZIP-range lookup.
//!
//! Administrators register contacts with one or more inclusive ZIP ranges;
//! end users query a 5-digit ZIP and get back every contact whose ranges
//! contain it. The `directory` module owns the domain types, validation,
//! storage contract, and HTTP routes; persistence backends live with the
//! service binary.

pub mod config;
pub mod directory;
pub mod error;
pub mod telemetry;
