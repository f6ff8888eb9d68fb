//! Risk Scoring Module
//! Keyword heuristic that turns free text into a 0-100 fraud risk score
//!
//! Scoring rules:
//! - each scam phrase found: +15
//! - each urgency word found: +25
//! - each threat word found: +30
//! - each money word found: +20
//! - total clamped to 100
//!
//! Matching is case-insensitive substring containment, counted per distinct
//! word (repeating a word does not raise the score).

use serde::{Deserialize, Serialize};

use crate::models::types::{PatternFlags, RiskAssessment};
use crate::utils::constants::{
    MAX_RISK_SCORE, MONEY_WEIGHT, MONEY_WORDS, SCAM_PHRASES, SCAM_PHRASE_WEIGHT, THREAT_WEIGHT,
    THREAT_WORDS, URGENCY_WEIGHT, URGENCY_WORDS,
};

/// Score a text. Total over all strings: empty input scores 0.
pub fn score(text: &str) -> RiskAssessment {
    score_with_components(text).0
}

/// Score a text and also return its unclamped component breakdown
pub fn score_with_components(text: &str) -> (RiskAssessment, RiskComponents) {
    let lower = text.to_lowercase();
    let components = RiskComponents::from_lowercase(&lower);
    let assessment = RiskAssessment::new(
        components.clamped_total(),
        matched_keywords(&lower),
        components.patterns(),
    );
    (assessment, components)
}

/// Scam phrases contained in already-lowercased text, in list order
pub fn matched_keywords(lower: &str) -> Vec<String> {
    SCAM_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}

/// Individual score components before clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskComponents {
    /// Scam phrase score
    pub base: u32,
    /// Urgency word score
    pub urgency: u32,
    /// Threat word score
    pub threat: u32,
    /// Money request score
    pub money: u32,
}

impl RiskComponents {
    /// Compute all four components from lowercased text
    pub fn from_lowercase(lower: &str) -> Self {
        Self {
            base: count_found(lower, &SCAM_PHRASES) * SCAM_PHRASE_WEIGHT,
            urgency: count_found(lower, &URGENCY_WORDS) * URGENCY_WEIGHT,
            threat: count_found(lower, &THREAT_WORDS) * THREAT_WEIGHT,
            money: count_found(lower, &MONEY_WORDS) * MONEY_WEIGHT,
        }
    }

    /// Sum before clamping (can exceed 100)
    pub fn total(&self) -> u32 {
        self.base + self.urgency + self.threat + self.money
    }

    pub fn clamped_total(&self) -> u8 {
        self.total().min(MAX_RISK_SCORE as u32) as u8
    }

    /// A category is flagged when its component is nonzero
    pub fn patterns(&self) -> PatternFlags {
        PatternFlags {
            urgency: self.urgency > 0,
            threats: self.threat > 0,
            money_requests: self.money > 0,
        }
    }
}

/// Number of distinct words from `words` contained in `lower`
fn count_found(lower: &str, words: &[&str]) -> u32 {
    words.iter().filter(|word| lower.contains(*word)).count() as u32
}
