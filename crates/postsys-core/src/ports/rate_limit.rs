//! Request throttling port.

use async_trait::async_trait;
use std::time::Duration;

/// Decides whether a client may issue another request.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Consume one request for `key` (usually the client address).
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Outcome of a throttling decision.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// How long until the client may retry, when denied.
    pub retry_after: Duration,
}

impl RateLimitResult {
    pub fn allow(remaining: u32) -> Self {
        Self {
            allowed: true,
            remaining,
            retry_after: Duration::ZERO,
        }
    }

    pub fn deny(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            retry_after,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
