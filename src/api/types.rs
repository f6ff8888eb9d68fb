//! API Request/Response Types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::risk_score::RiskComponents;
use crate::core::samples::Channel;
use crate::models::errors::AppError;
use crate::models::types::RiskAssessment;
use crate::utils::constants::APP_VERSION;
use crate::utils::telemetry::{KeywordCount, TelemetryStats};

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: err.source.as_ref().map(|s| s.to_string()),
        }
    }
}

// ============================================
// Text Analysis
// ============================================

#[derive(Debug, Deserialize)]
pub struct TextAnalysisRequest {
    /// Missing text is treated like blank text (400)
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub channel: Channel,
}

#[derive(Debug, Serialize)]
pub struct TextAnalysisData {
    pub analysis_id: Uuid,
    pub channel: Channel,
    pub text_length: usize,
    pub assessment: RiskAssessment,
    pub components: RiskComponents,
    pub level_badge: &'static str,
    pub sentiment_badge: &'static str,
}

impl TextAnalysisData {
    pub fn new(
        channel: Channel,
        text_length: usize,
        assessment: RiskAssessment,
        components: RiskComponents,
    ) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            channel,
            text_length,
            level_badge: assessment.risk_level.badge_variant(),
            sentiment_badge: assessment.sentiment.badge_variant(),
            assessment,
            components,
        }
    }
}

// ============================================
// Batch Analysis
// ============================================

#[derive(Debug, Deserialize)]
pub struct BatchAnalysisRequest {
    pub texts: Vec<String>,
    #[serde(default)]
    pub channel: Channel,
}

#[derive(Debug, Serialize)]
pub struct BatchAnalysisData {
    pub total_requested: usize,
    pub total_processed: usize,
    pub total_low: usize,
    pub total_medium: usize,
    pub total_high: usize,
    pub total_critical: usize,
    pub results: Vec<BatchTextResult>,
    pub processing_time_ms: f64,
}

#[derive(Debug, Serialize)]
pub struct BatchTextResult {
    pub index: usize,
    pub status: String, // "success" | "error"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================
// Samples
// ============================================

#[derive(Debug, Serialize)]
pub struct SampleData {
    pub id: &'static str,
    pub title: &'static str,
    pub channel: Channel,
    pub text: &'static str,
    pub assessment: RiskAssessment,
}

// ============================================
// Stats / Telemetry
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub total_analyzed: u64,
    pub total_threats: u64,
    pub by_level: std::collections::HashMap<String, u64>,
    pub by_channel: std::collections::HashMap<String, u64>,
    pub urgency_patterns: u64,
    pub threat_patterns: u64,
    pub money_patterns: u64,
    pub top_keywords: Vec<KeywordCount>,
    pub avg_latency_ms: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

impl StatsData {
    pub fn from_stats(stats: TelemetryStats, uptime_seconds: u64) -> Self {
        Self {
            total_analyzed: stats.total_analyzed,
            total_threats: stats.total_threats,
            by_level: stats.by_level,
            by_channel: stats.by_channel,
            urgency_patterns: stats.urgency_patterns,
            threat_patterns: stats.threat_patterns,
            money_patterns: stats.money_patterns,
            top_keywords: stats.top_keywords,
            avg_latency_ms: stats.avg_latency_ms,
            uptime_seconds,
            api_version: APP_VERSION.to_string(),
        }
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
