//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Rendering of transport-neutral replies into Telegram messages

use async_trait::async_trait;
use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::command::BotCommands;

use crate::conversation::{Keyboard, Reply};
use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::telegram::Bot;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponibles:")]
pub enum Command {
    #[command(description = "comenzar el proceso de acceso a la comunidad")]
    Start,
    #[command(description = "información sobre este bot")]
    About,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Token missing, invalid BOT_API_URL or HTTP client failure
pub fn create_bot() -> AppResult<Bot> {
    let token = config::BOT_TOKEN.clone();
    if token.is_empty() {
        return Err(AppError::Config("BOT_TOKEN environment variable not set".to_string()));
    }

    let client = ClientBuilder::new()
        .timeout(config::network::timeout())
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

    let bot = match config::bot_api::get_url() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(&bot_api_url)?;
            Bot::with_client(token, client).set_api_url(url)
        }
        None => Bot::with_client(token, client),
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// Converts reply buttons into a Telegram inline keyboard.
pub fn inline_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.id.as_str()))
            .collect::<Vec<_>>()
    }))
}

/// Destination for outbound replies.
///
/// Implemented by the real `Bot`; tests plug in a recorder.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, chat_id: ChatId, reply: &Reply) -> AppResult<()>;
}

#[async_trait]
impl ReplySink for Bot {
    async fn send_reply(&self, chat_id: ChatId, reply: &Reply) -> AppResult<()> {
        let mut request = self.send_message(chat_id, reply.text.clone());
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(inline_keyboard(keyboard));
        }
        request.await?;
        Ok(())
    }
}
