//! dptree handler tree of the bot
//!
//! Commands, private messages and button presses all end up in
//! `flow::handle_chat_event`; this module only routes and extracts.

mod commands;
mod schema;
pub mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
