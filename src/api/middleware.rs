//! API Middleware (Auth, Rate Limiting, Logging)

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::models::errors::AppError;
use crate::utils::constants::DEFAULT_RATE_LIMIT_PER_MINUTE;

/// Rate limiter configuration
pub struct RateLimitConfig {
    /// Requests per window
    pub requests_per_window: u32,
    /// Window duration
    pub window_duration: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: DEFAULT_RATE_LIMIT_PER_MINUTE,
            window_duration: Duration::from_secs(60),
        }
    }
}

/// In-memory fixed-window rate limiter keyed by API key or client IP
pub struct RateLimiter {
    requests: DashMap<String, (u32, Instant)>,
    requests_per_window: AtomicU32,
    window_duration: Duration,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            requests: DashMap::new(),
            requests_per_window: AtomicU32::new(config.requests_per_window),
            window_duration: config.window_duration,
        }
    }

    /// Change the per-window limit (applied at startup from config)
    pub fn set_requests_per_window(&self, limit: u32) {
        self.requests_per_window.store(limit, Ordering::Relaxed);
    }

    /// Check if request is allowed, returns (allowed, remaining, reset_seconds)
    pub fn check(&self, key: &str) -> (bool, u32, u64) {
        let now = Instant::now();
        let limit = self.requests_per_window.load(Ordering::Relaxed);

        let mut entry = self.requests.entry(key.to_string()).or_insert((0, now));

        // Reset window if expired
        if now.duration_since(entry.1) > self.window_duration {
            entry.0 = 0;
            entry.1 = now;
        }

        let remaining = limit.saturating_sub(entry.0);
        let reset_secs = self
            .window_duration
            .saturating_sub(now.duration_since(entry.1))
            .as_secs();

        if entry.0 >= limit {
            return (false, 0, reset_secs);
        }

        entry.0 += 1;
        (true, remaining - 1, reset_secs)
    }

    /// Drop entries idle for two windows, returns how many were removed
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let before = self.requests.len();
        self.requests.retain(|_, (_, timestamp)| {
            now.duration_since(*timestamp) < self.window_duration * 2
        });
        before.saturating_sub(self.requests.len())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

// Global rate limiter instance
lazy_static::lazy_static! {
    pub static ref RATE_LIMITER: Arc<RateLimiter> = Arc::new(RateLimiter::default());
}

/// Periodically evict idle rate-limit entries
pub fn start_cleanup_task() {
    tokio::spawn(async {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = RATE_LIMITER.cleanup();
            if removed > 0 {
                info!(removed, "Rate limiter cleanup");
            }
        }
    });
}

fn is_health_path(path: &str) -> bool {
    path == "/health" || path == "/v1/health"
}

fn api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get("x-api-key").and_then(|v| v.to_str().ok())
}

/// API key format check. Anonymous callers are let through (rate limited).
pub async fn auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_health_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    match api_key(&headers) {
        Some(key) if !validate_api_key(key) => {
            warn!("Invalid API key attempted");
            Err(AppError::unauthorized())
        }
        _ => Ok(next.run(request).await),
    }
}

/// Accepts keys starting with "sk_" or "pk_", and "demo"
fn validate_api_key(key: &str) -> bool {
    key.starts_with("sk_") || key.starts_with("pk_") || key == "demo"
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    if is_health_path(request.uri().path()) {
        return next.run(request).await;
    }

    // API key first, then client IP
    let rate_key = api_key(&headers)
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .or_else(|| headers.get("x-real-ip"))
                .and_then(|v| v.to_str().ok())
        })
        .unwrap_or("unknown")
        .to_string();

    let (allowed, remaining, reset) = RATE_LIMITER.check(&rate_key);

    if !allowed {
        warn!(key = %rate_key, "Rate limit exceeded");
        return AppError::rate_limited(reset).into_response();
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert("x-ratelimit-remaining", remaining.into());
    headers.insert("x-ratelimit-reset", reset.into());

    response
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %latency.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_blocks_after_limit() {
        let limiter = RateLimiter::new(RateLimitConfig {
            requests_per_window: 2,
            window_duration: Duration::from_secs(60),
        });

        assert!(limiter.check("k").0);
        let (allowed, remaining, _) = limiter.check("k");
        assert!(allowed);
        assert_eq!(remaining, 0);
        assert!(!limiter.check("k").0);

        // Other keys have their own window
        assert!(limiter.check("other").0);
    }

    #[test]
    fn test_set_requests_per_window() {
        let limiter = RateLimiter::default();
        limiter.set_requests_per_window(1);
        assert!(limiter.check("k").0);
        assert!(!limiter.check("k").0);
    }

    #[test]
    fn test_cleanup_keeps_fresh_entries() {
        let limiter = RateLimiter::default();
        limiter.check("fresh");
        assert_eq!(limiter.cleanup(), 0);
    }

    #[test]
    fn test_api_key_format() {
        assert!(validate_api_key("sk_live_123"));
        assert!(validate_api_key("pk_test"));
        assert!(validate_api_key("demo"));
        assert!(!validate_api_key("hunter2"));
    }
}
