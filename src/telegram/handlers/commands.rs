//! Command handler implementations (/start, /about)

use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::conversation::Event;
use crate::telegram::flow::{handle_chat_event, send_about};
use crate::telegram::Bot;

/// Handle /start command: restart the wizard from the greeting
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    handle_chat_event(bot, deps, msg.chat.id, Event::Start).await?;
    Ok(())
}

/// Handle /about command. Does not touch the conversation.
pub(super) async fn handle_about_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    send_about(bot, deps, msg.chat.id).await?;
    Ok(())
}
