//! Centralized Error Handling Module
//!
//! The scorer itself cannot fail. Everything around it (CLI input, HTTP
//! requests, configuration) reports failures through `AppError` so each one
//! carries a unique code for logs and API clients.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: API errors
//! - INPUT_xxx: caller-boundary input errors
//! - CFG_xxx: Configuration errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::api::types::{ApiError, ApiResponse};

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Text or batch larger than the configured limit
    ApiPayloadTooLarge,
    /// Unauthorized (malformed API key)
    ApiUnauthorized,
    /// Rate limit exceeded
    ApiRateLimited,
    /// Internal server error
    ApiInternalError,
    /// Resource not found
    ApiNotFound,

    // ============================================
    // Input Errors
    // ============================================
    /// Blank or missing text at the caller boundary
    InputEmptyText,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors
    // ============================================
    Io,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiPayloadTooLarge => "API_PAYLOAD_TOO_LARGE",
            Self::ApiUnauthorized => "API_UNAUTHORIZED",
            Self::ApiRateLimited => "API_RATE_LIMITED",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::ApiNotFound => "API_NOT_FOUND",
            Self::InputEmptyText => "INPUT_EMPTY_TEXT",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::Io => "IO_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::InputEmptyText | Self::ConfigInvalidValue => 400,
            Self::ApiUnauthorized => 401,
            Self::ApiNotFound => 404,
            Self::ApiPayloadTooLarge => 413,
            Self::ApiRateLimited => 429,
            _ => 500,
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self.http_status() {
            400..=499 => 2,
            _ => 1,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    pub fn payload_too_large(len: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::ApiPayloadTooLarge,
            format!("Text is {} bytes, limit is {} bytes", len, limit),
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::ApiUnauthorized, "Invalid API key")
    }

    pub fn rate_limited(retry_after: u64) -> Self {
        Self::new(
            ErrorCode::ApiRateLimited,
            format!("Rate limit exceeded. Retry after {} seconds", retry_after),
        )
    }

    pub fn empty_text() -> Self {
        Self::new(ErrorCode::InputEmptyText, "Text to analyze is empty")
    }

    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(ErrorCode::ApiNotFound, format!("No route for {}", path))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }
}

// ============================================
// Result type alias
// ============================================

pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Io, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ApiBadRequest, "JSON error", err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ApiResponse::error(ApiError::from(&self), 0.0);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::empty_text();
        assert_eq!(err.code, ErrorCode::InputEmptyText);
        assert_eq!(err.code_str(), "INPUT_EMPTY_TEXT");
        assert_eq!(err.to_string(), "[INPUT_EMPTY_TEXT] Text to analyze is empty");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::ApiPayloadTooLarge.http_status(), 413);
        assert_eq!(ErrorCode::ApiRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::Io.http_status(), 500);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCode::InputEmptyText.exit_code(), 2);
        assert_eq!(ErrorCode::Io.exit_code(), 1);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::payload_too_large(20_000, 10_000).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_not_found_and_internal() {
        let err = AppError::not_found("/v2/nothing");
        assert_eq!(err.code_str(), "API_NOT_FOUND");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = AppError::internal("Handler panicked");
        assert_eq!(err.code_str(), "API_INTERNAL_ERROR");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
