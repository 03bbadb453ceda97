//! Test fixtures for the wizard

use std::sync::Arc;
use std::time::Duration;

use paywizard::conversation::FlowLinks;
use paywizard::core::rate_limiter::{RateLimiter, ThrottleScope};
use paywizard::telegram::{HandlerDeps, Sessions};

pub fn links() -> FlowLinks {
    FlowLinks {
        paypal: "https://pay.example/paypal".to_string(),
        mercadopago: "https://pay.example/mercadopago".to_string(),
        patreon: "https://pay.example/patreon".to_string(),
        group_invite: "https://t.me/+testgroup".to_string(),
    }
}

/// Dependencies with a limiter that never throttles.
pub fn deps() -> HandlerDeps {
    deps_with_limiter(RateLimiter::new(Duration::ZERO, ThrottleScope::PerChat))
}

pub fn deps_with_limiter(limiter: RateLimiter) -> HandlerDeps {
    HandlerDeps::new(Sessions::new(), Arc::new(limiter), links())
}
