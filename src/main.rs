use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use paywizard::cli::{Cli, RunMode};
use paywizard::core::rate_limiter::RateLimiter;
use paywizard::core::{config, init_logger, log_startup_configuration};
use paywizard::telegram::{create_bot, run_polling, run_webhook, setup_bot_commands, HandlerDeps, Sessions};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation, webhook setup).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    let cli = Cli::parse_args();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    let rate_limiter = Arc::new(
        RateLimiter::new(config::rate_limit::interval(), *config::rate_limit::SCOPE)
            .with_limit(*config::rate_limit::LIMIT),
    );
    log_startup_configuration(&rate_limiter);
    let _cleanup = Arc::clone(&rate_limiter).spawn_cleanup_task(config::rate_limit::cleanup_period());

    let deps = HandlerDeps::new(Sessions::new(), rate_limiter, config::links::flow_links());

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    match cli.run_mode(config::is_production(), config::WEBHOOK_URL.clone(), *config::PORT) {
        RunMode::Polling => run_polling(bot, deps).await?,
        RunMode::Webhook { url, port } => run_webhook(bot, deps, &url, port).await?,
    }

    Ok(())
}
