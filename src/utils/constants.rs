//! Constants Module - Single Source of Truth
//!
//! Word lists, weights, thresholds and canned texts used by the scorer,
//! the CLI and the API. No other module hardcodes these values.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "ScamSentry";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// KEYWORD LISTS
// ============================================

/// Multi-word scam phrases. Every phrase found adds `SCAM_PHRASE_WEIGHT`.
/// Order here is the order of `matched_keywords` in an assessment.
pub const SCAM_PHRASES: [&str; 12] = [
    "digital arrest",
    "urgent payment",
    "account frozen",
    "verify otp",
    "police complaint",
    "cybercrime",
    "immediate action",
    "arrest warrant",
    "legal notice",
    "court case",
    "pay fine",
    "money transfer",
];

/// Pressure words ("act right now")
pub const URGENCY_WORDS: [&str; 5] = ["urgent", "immediate", "now", "asap", "quickly"];

/// Law-enforcement / punishment words
pub const THREAT_WORDS: [&str; 6] = ["arrest", "police", "court", "legal", "jail", "prison"];

/// Payment request words
pub const MONEY_WORDS: [&str; 6] = ["pay", "payment", "transfer", "money", "amount", "fine"];

// ============================================
// SCORING WEIGHTS
// ============================================

pub const SCAM_PHRASE_WEIGHT: u32 = 15;
pub const URGENCY_WEIGHT: u32 = 25;
pub const THREAT_WEIGHT: u32 = 30;
pub const MONEY_WEIGHT: u32 = 20;

/// Upper clamp for the total score
pub const MAX_RISK_SCORE: u8 = 100;

// ============================================
// THRESHOLDS
// ============================================
// Level thresholds are inclusive lower bounds. Sentiment and
// recommendations use strict `>` against their own cut-offs.

pub const CRITICAL_THRESHOLD: u8 = 80;
pub const HIGH_THRESHOLD: u8 = 60;
pub const MEDIUM_THRESHOLD: u8 = 30;

/// `score > THREATENING_SENTIMENT_ABOVE` => threatening
pub const THREATENING_SENTIMENT_ABOVE: u8 = 50;

/// `score > URGENT_RECOMMENDATIONS_ABOVE` => do-not-engage list
pub const URGENT_RECOMMENDATIONS_ABOVE: u8 = 60;

// ============================================
// RECOMMENDATIONS
// ============================================

pub const URGENT_RECOMMENDATIONS: [&str; 4] = [
    "Do not respond to this message",
    "Block the sender immediately",
    "Report to cybercrime authorities",
    "Never share OTP or banking details",
];

pub const CAUTION_RECOMMENDATIONS: [&str; 2] = [
    "Exercise caution",
    "Verify sender through official channels",
];

// ============================================
// SAMPLE MESSAGES
// ============================================

pub const SAMPLE_DIGITAL_ARREST_SMS: &str = "URGENT: Digital arrest warrant issued against you. Pay ₹25,000 fine immediately to cybercrime@gov.in or face 7 years imprisonment. Call 9876543210 NOW!";

pub const SAMPLE_BANKING_EMAIL: &str = "Dear Customer, Your bank account will be frozen in 2 hours due to suspicious activity. Verify your account by sharing OTP 123456 immediately.";

pub const SAMPLE_AUTHORITY_CALL: &str = "Hello sir, I am calling from CBI office. We have received complaint against you. You need to transfer money to government account to avoid arrest.";

// ============================================
// API DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Largest accepted text body (bytes)
pub const DEFAULT_MAX_TEXT_BYTES: usize = 10_000;

/// Largest accepted batch
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Requests per minute per API key / IP
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

pub const DEFAULT_TELEMETRY_DIR: &str = "./telemetry";

/// Keywords listed in `/v1/stats`
pub const TOP_KEYWORDS_LIMIT: usize = 5;
