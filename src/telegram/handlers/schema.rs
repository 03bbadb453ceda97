//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{ChatId, Message};

use super::commands::{handle_about_command, handle_start_command};
use super::types::{HandlerDeps, HandlerError};
use crate::conversation::Event;
use crate::telegram::bot::Command;
use crate::telegram::flow::handle_chat_event;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's Dispatcher.
/// The same schema is used in production and can be used in integration tests.
///
/// # Arguments
/// * `deps` - Handler dependencies (sessions, rate limiter, links)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callback))
}

/// /start and /about
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private())
        .branch(dptree::entry().filter_command::<Command>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let deps = deps.clone();
                async move { handle_command(bot, msg, cmd, deps).await }
            },
        ))
}

/// Every other private message feeds the step under the cursor
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_message(bot, msg, deps).await }
        })
}

/// Inline keyboard presses under private-chat messages
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .filter(|q: CallbackQuery| private_chat_of(&q).is_some())
        .endpoint(move |bot: Bot, q: CallbackQuery| {
            let deps = deps.clone();
            async move { handle_callback(bot, q, deps).await }
        })
}

/// Chat the pressed button belongs to, when that chat is private.
fn private_chat_of(q: &CallbackQuery) -> Option<ChatId> {
    q.message
        .as_ref()
        .map(|m| m.chat())
        .filter(|chat| chat.is_private())
        .map(|chat| chat.id)
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command, deps: HandlerDeps) -> Result<(), HandlerError> {
    log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

    match cmd {
        Command::Start => handle_start_command(&bot, &msg, &deps).await,
        Command::About => handle_about_command(&bot, &msg, &deps).await,
    }
}

async fn handle_message(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let event = Event::from_message_text(msg.text());
    handle_chat_event(&bot, &deps, msg.chat.id, event).await?;
    Ok(())
}

async fn handle_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> Result<(), HandlerError> {
    // Stops the spinner on the client whatever happens next.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        log::warn!("Failed to answer callback query: {}", e);
    }

    let Some(chat_id) = private_chat_of(&q) else {
        log::warn!("Callback query {:?} outside a private chat, ignoring", q.id);
        return Ok(());
    };

    let data = q.data.as_deref().unwrap_or_default();
    let Some(event) = Event::from_callback_data(data) else {
        log::warn!("Unknown callback data {:?} from chat {}", data, chat_id);
        return Ok(());
    };

    handle_chat_event(&bot, &deps, chat_id, event).await?;
    Ok(())
}
