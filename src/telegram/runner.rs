//! Update delivery: long polling or webhook behind an axum server

use std::net::SocketAddr;

use axum::routing::get;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use teloxide::update_listeners::Polling;

use crate::core::error::{AppError, AppResult};
use crate::telegram::handlers::{schema, HandlerDeps};
use crate::telegram::Bot;

/// Runs the dispatcher with long polling until Ctrl-C.
pub async fn run_polling(bot: Bot, deps: HandlerDeps) -> AppResult<()> {
    log::info!("Starting bot in long polling mode");

    // Create polling listener that drops pending updates on start
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Registers the webhook and serves it on `0.0.0.0:port` together with `/health`.
pub async fn run_webhook(bot: Bot, deps: HandlerDeps, webhook_url: &str, port: u16) -> AppResult<()> {
    let url = url::Url::parse(webhook_url)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Starting bot in webhook mode: {} (listening on {})", url, addr);

    let (listener, stop_flag, router) = webhooks::axum_to_router(bot.clone(), Options::new(addr, url)).await?;
    let app = router.route("/health", get(health));

    let tcp = tokio::net::TcpListener::bind(addr).await?;
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(tcp, app).with_graceful_shutdown(stop_flag).await {
            log::error!("Webhook server error: {}", e);
        }
    });

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
        )
        .await;

    server
        .await
        .map_err(|e| AppError::Anyhow(anyhow::anyhow!("Webhook server task failed: {}", e)))?;
    log::info!("Webhook server stopped");
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}
