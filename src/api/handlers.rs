//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{StatusCode, Uri},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::types::*;
use crate::core::risk_score::{score, score_with_components};
use crate::core::samples::SAMPLE_MESSAGES;
use crate::models::config::ServerConfig;
use crate::models::errors::AppError;
use crate::models::types::RiskLevel;
use crate::utils::constants::APP_VERSION;
use crate::utils::telemetry::TelemetryCollector;

type Rejection = (StatusCode, Json<ApiResponse<()>>);

/// Shared application state
pub struct AppState {
    pub telemetry: Arc<TelemetryCollector>,
    pub config: ServerConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(telemetry: Arc<TelemetryCollector>, config: ServerConfig) -> Self {
        Self {
            telemetry,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Blank text is rejected here, at the caller boundary; the scorer
    /// itself accepts anything.
    fn validate_text(&self, text: &str) -> Result<(), AppError> {
        if text.trim().is_empty() {
            return Err(AppError::bad_request("text cannot be empty"));
        }
        if text.len() > self.config.max_text_bytes {
            return Err(AppError::payload_too_large(
                text.len(),
                self.config.max_text_bytes,
            ));
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Malformed or mistyped JSON bodies get the same error envelope as every
/// other failure instead of axum's plain-text rejection.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    start: Instant,
) -> Result<T, Rejection> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| reject(AppError::bad_request(rejection.body_text()), start))
}

fn reject(err: AppError, start: Instant) -> Rejection {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(ApiError::from(&err), elapsed_ms(start))),
    )
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Text Analysis
// ============================================

pub async fn analyze_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextAnalysisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TextAnalysisData>>, Rejection> {
    let start = Instant::now();
    let req = json_body(payload, start)?;

    let text = req.text.unwrap_or_default();
    state.validate_text(&text).map_err(|e| reject(e, start))?;

    if !state.config.analysis_delay.is_zero() {
        tokio::time::sleep(state.config.analysis_delay).await;
    }

    let (assessment, components) = score_with_components(&text);
    let latency = start.elapsed().as_millis() as u64;
    state.telemetry.record(&assessment, req.channel, latency);

    info!(
        channel = req.channel.as_str(),
        text_len = text.len(),
        score = assessment.risk_score,
        level = assessment.risk_level.as_str(),
        keywords = assessment.matched_keywords.len(),
        "Text analyzed"
    );

    let data = TextAnalysisData::new(req.channel, text.len(), assessment, components);

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Batch Analysis
// ============================================

pub async fn batch_analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchAnalysisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchAnalysisData>>, Rejection> {
    let start = Instant::now();
    let req = json_body(payload, start)?;

    if req.texts.is_empty() {
        return Err(reject(
            AppError::bad_request("texts array cannot be empty"),
            start,
        ));
    }

    let max_batch = state.config.max_batch_size;
    if req.texts.len() > max_batch {
        return Err(reject(
            AppError::bad_request(format!("Maximum {} texts per batch request", max_batch)),
            start,
        ));
    }

    // Scoring is synchronous and cheap, no need to fan out
    let mut results = Vec::with_capacity(req.texts.len());
    for (index, text) in req.texts.iter().enumerate() {
        let item_start = Instant::now();

        match state.validate_text(text) {
            Ok(()) => {
                let assessment = score(text);
                state.telemetry.record(
                    &assessment,
                    req.channel,
                    item_start.elapsed().as_millis() as u64,
                );
                results.push(BatchTextResult {
                    index,
                    status: "success".to_string(),
                    assessment: Some(assessment),
                    error: None,
                });
            }
            Err(e) => {
                debug!(index, error = %e, "Batch item rejected");
                results.push(BatchTextResult {
                    index,
                    status: "error".to_string(),
                    assessment: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let count_level = |level: RiskLevel| {
        results
            .iter()
            .filter(|r| r.assessment.as_ref().map(|a| a.risk_level) == Some(level))
            .count()
    };

    let data = BatchAnalysisData {
        total_requested: req.texts.len(),
        total_processed: results.iter().filter(|r| r.assessment.is_some()).count(),
        total_low: count_level(RiskLevel::Low),
        total_medium: count_level(RiskLevel::Medium),
        total_high: count_level(RiskLevel::High),
        total_critical: count_level(RiskLevel::Critical),
        results,
        processing_time_ms: elapsed_ms(start),
    };

    info!(
        requested = data.total_requested,
        processed = data.total_processed,
        critical = data.total_critical,
        "Batch analyzed"
    );

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Samples
// ============================================

pub async fn list_samples() -> Json<ApiResponse<Vec<SampleData>>> {
    let start = Instant::now();

    let data = SAMPLE_MESSAGES
        .iter()
        .map(|sample| SampleData {
            id: sample.id,
            title: sample.title,
            channel: sample.channel,
            text: sample.text,
            assessment: score(sample.text),
        })
        .collect();

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let stats = state.telemetry.get_stats();

    let data = StatsData::from_stats(stats, state.uptime_seconds());

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Fallback
// ============================================

pub async fn not_found(uri: Uri) -> AppError {
    debug!(path = uri.path(), "No matching route");
    AppError::not_found(uri.path())
}
