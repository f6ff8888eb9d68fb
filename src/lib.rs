//! Scam Sentry Library
//!
//! Heuristic fraud-message risk scorer. Scores free text (SMS, e-mail, call
//! transcripts) by counting known scam phrases and urgency, threat and
//! money-request words, then buckets the result into a risk level with
//! matching recommendations.
//!
//! ```
//! let assessment = scam_sentry::score("Digital arrest warrant issued. Pay fine now!");
//! assert_eq!(assessment.risk_level, scam_sentry::RiskLevel::Critical);
//! ```

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::risk_score::{matched_keywords, score, score_with_components, RiskComponents};
pub use crate::core::samples::{find_sample, Channel, SampleMessage, SAMPLE_MESSAGES};
pub use models::config::ServerConfig;
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{recommendations_for, PatternFlags, RiskAssessment, RiskLevel, Sentiment};
pub use utils::telemetry::{TelemetryCollector, TelemetryStats};
