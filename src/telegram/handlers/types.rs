//! Handler types and shared dependencies

use std::sync::Arc;

use crate::conversation::FlowLinks;
use crate::core::rate_limiter::RateLimiter;
use crate::telegram::sessions::Sessions;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sessions: Sessions,
    pub rate_limiter: Arc<RateLimiter>,
    pub links: Arc<FlowLinks>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(sessions: Sessions, rate_limiter: Arc<RateLimiter>, links: FlowLinks) -> Self {
        Self {
            sessions,
            rate_limiter,
            links: Arc::new(links),
        }
    }
}
