//! Paywizard - Telegram bot that walks users through community payment onboarding
//!
//! The bot greets a user, asks whether they already paid, collects the payment
//! method, name and email, hands out the payment link and finally the invite
//! to the private group.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging and rate limiting
//! - `conversation`: Transport-independent wizard state and transitions
//! - `telegram`: Telegram bot integration and handlers
//! - `cli`: Command line interface

pub mod cli;
pub mod conversation;
pub mod core;
pub mod telegram;

// Re-export commonly used types for convenience
pub use conversation::{handle_event, ConversationState, Event, FlowLinks, Transition};
pub use crate::core::{config, AppError, AppResult};
pub use telegram::{create_bot, schema, HandlerDeps};
