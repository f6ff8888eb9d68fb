//! Utils Module - Constants & Telemetry
//!
//! Shared values and the stats collector used by the API and CLI.

pub mod constants;
pub mod telemetry;

pub use constants::*;
pub use telemetry::*;
