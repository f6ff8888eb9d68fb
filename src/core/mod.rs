//! Core Module - Business Logic
//!
//! Text risk scoring and the built-in sample messages.

pub mod risk_score;
pub mod samples;

pub use risk_score::*;
pub use samples::*;
