//! Logger setup and startup diagnostics
//!
//! Logs go to the terminal and to `LOG_FILE_PATH`. At startup the values the
//! conversation depends on (token, links, rate limit) are reported once.

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;
use crate::core::rate_limiter::RateLimiter;

/// Installs the global logger writing to the terminal and to `log_file_path`.
///
/// Fails when the file cannot be created or a logger is already installed.
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the runtime configuration at startup
///
/// Warns about values that are still on their placeholder defaults so a
/// misconfigured deployment is visible in the first lines of the log.
pub fn log_startup_configuration(rate_limiter: &RateLimiter) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Environment: {}", config::ENVIRONMENT.as_str());
    log::info!("{}", rate_limit_summary(rate_limiter));

    if config::BOT_TOKEN.is_empty() {
        log::error!("❌ BOT_TOKEN: not set");
    }

    if config::is_production() && config::WEBHOOK_URL.is_none() {
        log::error!("❌ ENVIRONMENT=production but WEBHOOK_URL is not set");
    }

    for (name, value) in [
        ("PAYPAL_LINK", config::links::PAYPAL_LINK.as_str()),
        ("MERCADOPAGO_LINK", config::links::MERCADOPAGO_LINK.as_str()),
        ("PATREON_LINK", config::links::PATREON_LINK.as_str()),
        ("GROUP_INVITE_LINK", config::links::GROUP_INVITE_LINK.as_str()),
    ] {
        if url::Url::parse(value).is_err() {
            log::warn!("⚠️  {}: '{}' is not a valid URL", name, value);
        } else {
            log::info!("✅ {}: {}", name, value);
        }
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// One-line description of the active throttle settings.
pub fn rate_limit_summary(rate_limiter: &RateLimiter) -> String {
    format!(
        "Rate limit: {} ms between events ({:?} scope, limit {})",
        rate_limiter.interval().as_millis(),
        rate_limiter.scope(),
        rate_limiter.limit()
    )
}
