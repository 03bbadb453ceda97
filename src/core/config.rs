//! Configuration read once from the environment.
//!
//! `.env` is loaded by `main` before any of these statics are touched.

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Deployment environment
/// Read from ENVIRONMENT environment variable
/// `production` selects the webhook runner, anything else long polling
pub static ENVIRONMENT: Lazy<String> =
    Lazy::new(|| env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()));

/// Returns true when running with ENVIRONMENT=production.
pub fn is_production() -> bool {
    is_production_value(&ENVIRONMENT)
}

fn is_production_value(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("production")
}

/// Webhook URL for Telegram updates
/// Read from WEBHOOK_URL environment variable
pub static WEBHOOK_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("WEBHOOK_URL"));

/// Port the webhook HTTP server listens on
/// Read from PORT environment variable
/// Default: 8080
pub static PORT: Lazy<u16> = Lazy::new(|| env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Rate limiting configuration
pub mod rate_limit {
    use super::Duration;
    use crate::core::rate_limiter::ThrottleScope;
    use once_cell::sync::Lazy;
    use std::env;

    /// Default minimum gap between accepted events (in milliseconds)
    pub const DEFAULT_INTERVAL_MS: u64 = 5000;

    /// Interval between accepted events (in milliseconds)
    /// Read from RATE_LIMIT_INTERVAL_MS environment variable
    pub static INTERVAL_MS: Lazy<u64> = Lazy::new(|| {
        env::var("RATE_LIMIT_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_INTERVAL_MS)
    });

    /// Request count per interval
    /// Read from RATE_LIMIT_COUNT environment variable
    /// Carried for configuration compatibility; the limiter only looks at the interval
    pub static LIMIT: Lazy<u32> = Lazy::new(|| {
        env::var("RATE_LIMIT_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1)
    });

    /// Throttle scope: "chat" (default) or "global"
    /// Read from RATE_LIMIT_SCOPE environment variable
    pub static SCOPE: Lazy<ThrottleScope> = Lazy::new(|| {
        env::var("RATE_LIMIT_SCOPE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    });

    /// Rate limit interval duration
    pub fn interval() -> Duration {
        Duration::from_millis(*INTERVAL_MS)
    }

    /// How often stale throttle entries are evicted
    pub const CLEANUP_PERIOD_SECS: u64 = 300;

    pub fn cleanup_period() -> Duration {
        Duration::from_secs(CLEANUP_PERIOD_SECS)
    }
}

/// Links handed out during the conversation
pub mod links {
    use crate::conversation::FlowLinks;
    use once_cell::sync::Lazy;

    /// Value of `key`, or `default` when unset or blank.
    pub(super) fn link_var(key: &str, default: &str) -> String {
        super::non_empty_var(key).unwrap_or_else(|| default.to_string())
    }

    /// Payment link for Paypal
    /// Read from PAYPAL_LINK environment variable
    pub static PAYPAL_LINK: Lazy<String> = Lazy::new(|| link_var("PAYPAL_LINK", "https://www.paypal.com"));

    /// Payment link for MercadoPago
    /// Read from MERCADOPAGO_LINK environment variable
    pub static MERCADOPAGO_LINK: Lazy<String> =
        Lazy::new(|| link_var("MERCADOPAGO_LINK", "https://www.mercadopago.com"));

    /// Payment link for Patreon
    /// Read from PATREON_LINK environment variable
    pub static PATREON_LINK: Lazy<String> = Lazy::new(|| link_var("PATREON_LINK", "https://www.patreon.com"));

    /// Invite link to the private Telegram group
    /// Read from GROUP_INVITE_LINK environment variable
    pub static GROUP_INVITE_LINK: Lazy<String> = Lazy::new(|| link_var("GROUP_INVITE_LINK", "https://t.me/+invite"));

    /// Snapshot of all links for the conversation engine
    pub fn flow_links() -> FlowLinks {
        FlowLinks {
            paypal: PAYPAL_LINK.clone(),
            mercadopago: MERCADOPAGO_LINK.clone(),
            patreon: PATREON_LINK.clone(),
            group_invite: GROUP_INVITE_LINK.clone(),
        }
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Bot API server configuration utilities
pub mod bot_api {
    /// Returns the BOT_API_URL environment variable if set.
    pub fn get_url() -> Option<String> {
        super::non_empty_var("BOT_API_URL")
    }
}
