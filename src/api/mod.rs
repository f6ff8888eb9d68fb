//! Scam Sentry API Module
//! REST API for text fraud-risk analysis

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use middleware::{start_cleanup_task, RATE_LIMITER};
pub use routes::create_router;
pub use types::*;
