//! Configuration module for the Scam Sentry API
//!
//! Defaults come from utils/constants.rs; every value can be overridden
//! through the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_TEXT_BYTES, DEFAULT_PORT,
    DEFAULT_RATE_LIMIT_PER_MINUTE, DEFAULT_TELEMETRY_DIR,
};

/// Runtime configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest text accepted by analysis endpoints
    pub max_text_bytes: usize,
    /// Largest batch accepted by `/v1/analyze/batch`
    pub max_batch_size: usize,
    /// Requests per minute per API key / IP
    pub rate_limit_per_minute: u32,
    /// Artificial delay before each single-text analysis (demo pacing)
    pub analysis_delay: Duration,
    /// Where telemetry exports are written
    pub telemetry_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            analysis_delay: Duration::ZERO,
            telemetry_dir: PathBuf::from(DEFAULT_TELEMETRY_DIR),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    /// `PORT` (platform-provided) wins over `SCAM_SENTRY_PORT`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("SCAM_SENTRY_HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT").or_else(|| lookup("SCAM_SENTRY_PORT")) {
            Some(raw) => parse_value("PORT", &raw)?,
            None => defaults.port,
        };
        let max_text_bytes =
            parse_or("SCAM_SENTRY_MAX_TEXT_BYTES", &lookup, defaults.max_text_bytes)?;
        let max_batch_size = parse_or("SCAM_SENTRY_MAX_BATCH", &lookup, defaults.max_batch_size)?;
        let rate_limit_per_minute =
            parse_or("SCAM_SENTRY_RATE_LIMIT", &lookup, defaults.rate_limit_per_minute)?;
        let delay_ms: u64 = parse_or("SCAM_SENTRY_ANALYSIS_DELAY_MS", &lookup, 0)?;
        let telemetry_dir = lookup("SCAM_SENTRY_TELEMETRY_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.telemetry_dir);

        if max_text_bytes == 0 {
            return Err(AppError::invalid_config("SCAM_SENTRY_MAX_TEXT_BYTES", "0"));
        }
        if max_batch_size == 0 {
            return Err(AppError::invalid_config("SCAM_SENTRY_MAX_BATCH", "0"));
        }
        // A zero window budget would answer 429 to every request
        if rate_limit_per_minute == 0 {
            return Err(AppError::invalid_config("SCAM_SENTRY_RATE_LIMIT", "0"));
        }

        let config = Self {
            host,
            port,
            max_text_bytes,
            max_batch_size,
            rate_limit_per_minute,
            analysis_delay: Duration::from_millis(delay_ms),
            telemetry_dir,
        };

        info!(
            host = %config.host,
            port = config.port,
            max_text_bytes = config.max_text_bytes,
            max_batch_size = config.max_batch_size,
            rate_limit = config.rate_limit_per_minute,
            delay_ms = delay_ms,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// `host:port` string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::invalid_config(key, raw))
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> AppResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_text_bytes, 10_000);
        assert_eq!(config.analysis_delay, Duration::ZERO);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_platform_port_wins() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("SCAM_SENTRY_PORT", "7000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("SCAM_SENTRY_MAX_TEXT_BYTES", "256"),
            ("SCAM_SENTRY_ANALYSIS_DELAY_MS", "2000"),
            ("SCAM_SENTRY_TELEMETRY_DIR", "/tmp/sentry"),
        ]))
        .unwrap();
        assert_eq!(config.max_text_bytes, 256);
        assert_eq!(config.analysis_delay, Duration::from_secs(2));
        assert_eq!(config.telemetry_dir, PathBuf::from("/tmp/sentry"));
    }

    #[test]
    fn test_invalid_number_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("SCAM_SENTRY_RATE_LIMIT", "lots")]))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn test_zero_batch_rejected() {
        let err =
            ServerConfig::from_lookup(lookup_from(&[("SCAM_SENTRY_MAX_BATCH", "0")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        let err =
            ServerConfig::from_lookup(lookup_from(&[("SCAM_SENTRY_RATE_LIMIT", "0")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert!(err.message.contains("SCAM_SENTRY_RATE_LIMIT"));
    }
}
