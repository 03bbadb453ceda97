//! Telegram transport: bot setup, handler tree and update delivery

pub mod bot;
pub mod flow;
pub mod handlers;
pub mod runner;
pub mod sessions;

/// Bot type used across the crate
pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command, ReplySink};
pub use flow::{handle_chat_event, send_about, Outcome};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use runner::{run_polling, run_webhook};
pub use sessions::Sessions;
