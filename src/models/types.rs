//! Type definitions for Scam Sentry
//! Core data structures produced by text risk analysis

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    CAUTION_RECOMMENDATIONS, CRITICAL_THRESHOLD, HIGH_THRESHOLD, MEDIUM_THRESHOLD,
    THREATENING_SENTIMENT_ABOVE, URGENT_RECOMMENDATIONS, URGENT_RECOMMENDATIONS_ABOVE,
};

/// Risk level classification for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Below the medium threshold
    Low,
    /// Suspicious - exercise caution
    Medium,
    /// Likely a scam
    High,
    /// Almost certainly a scam
    Critical,
}

impl RiskLevel {
    /// Bucket a score. Thresholds are inclusive lower bounds, checked highest first.
    pub fn from_score(score: u8) -> Self {
        if score >= CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score >= HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "✅",
            RiskLevel::Medium => "🟠",
            RiskLevel::High => "🔴",
            RiskLevel::Critical => "💀",
        }
    }

    /// Badge variant used by the web UI
    pub fn badge_variant(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "destructive",
            RiskLevel::High => "warning",
            RiskLevel::Medium => "secondary",
            RiskLevel::Low => "success",
        }
    }

    /// HIGH and CRITICAL count as threats in telemetry
    pub fn is_threat(&self) -> bool {
        *self >= RiskLevel::High
    }
}

/// Overall tone of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Neutral,
    Threatening,
}

impl Sentiment {
    /// Strictly above 50 is threatening. 51..=59 is therefore a MEDIUM level
    /// with a threatening sentiment.
    pub fn from_score(score: u8) -> Self {
        if score > THREATENING_SENTIMENT_ABOVE {
            Sentiment::Threatening
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Neutral => "neutral",
            Sentiment::Threatening => "threatening",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Sentiment::Threatening => "destructive",
            Sentiment::Neutral => "secondary",
        }
    }
}

/// Which trigger-word categories appeared in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFlags {
    pub urgency: bool,
    pub threats: bool,
    pub money_requests: bool,
}

impl PatternFlags {
    /// Display labels of the raised flags, in UI order
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.urgency {
            labels.push("Urgency");
        }
        if self.threats {
            labels.push("Threats");
        }
        if self.money_requests {
            labels.push("Money Request");
        }
        labels
    }

    pub fn any(&self) -> bool {
        self.urgency || self.threats || self.money_requests
    }
}

/// Recommendation list for a score. The cut-off is `> 60`, one above the
/// HIGH boundary, so a score of exactly 60 still gets the cautious list.
pub fn recommendations_for(score: u8) -> &'static [&'static str] {
    if score > URGENT_RECOMMENDATIONS_ABOVE {
        &URGENT_RECOMMENDATIONS
    } else {
        &CAUTION_RECOMMENDATIONS
    }
}

/// Result of scoring one text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// 0-100
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    /// Scam phrases found, in list order
    pub matched_keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub recommendations: Vec<String>,
    pub patterns: PatternFlags,
}

impl RiskAssessment {
    /// Derive level, sentiment and recommendations from a final score
    pub fn new(risk_score: u8, matched_keywords: Vec<String>, patterns: PatternFlags) -> Self {
        Self {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            matched_keywords,
            sentiment: Sentiment::from_score(risk_score),
            recommendations: recommendations_for(risk_score)
                .iter()
                .map(|r| r.to_string())
                .collect(),
            patterns,
        }
    }

    /// Human-readable multi-line report (CLI output)
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} Risk Level: {}\n   Fraud probability: {}%\n   Sentiment: {}\n",
            self.risk_level.emoji(),
            self.risk_level.as_str(),
            self.risk_score,
            self.sentiment.as_str(),
        );

        let labels = self.patterns.labels();
        if !labels.is_empty() {
            out.push_str(&format!("   Patterns: {}\n", labels.join(", ")));
        }

        if !self.matched_keywords.is_empty() {
            out.push_str(&format!(
                "   Detected keywords: {}\n",
                self.matched_keywords.join(", ")
            ));
        }

        out.push_str("   Recommendations:\n");
        for rec in &self.recommendations {
            out.push_str(&format!("     - {}\n", rec));
        }

        out
    }
}
