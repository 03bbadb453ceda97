//! Per-chat conversation state storage

use std::sync::Arc;

use teloxide::dispatching::dialogue::{InMemStorage, InMemStorageError, Storage};
use teloxide::types::ChatId;

use crate::conversation::{ConversationState, Cursor};
use crate::core::error::AppResult;

/// In-memory session map keyed by chat id.
///
/// A missing entry reads as an ended conversation: ended sessions are
/// removed, and a chat never seen before is greeted on its next message just
/// like one that finished the flow.
#[derive(Clone)]
pub struct Sessions {
    storage: Arc<InMemStorage<ConversationState>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self {
            storage: InMemStorage::new(),
        }
    }

    /// Current state of a chat; `Cursor::Ended` when nothing is stored.
    pub async fn load(&self, chat_id: ChatId) -> AppResult<ConversationState> {
        let state = Arc::clone(&self.storage).get_dialogue(chat_id).await?;
        Ok(state.unwrap_or_else(|| ConversationState::new().at(Cursor::Ended)))
    }

    /// Stores the state. An ended conversation is dropped instead.
    pub async fn save(&self, chat_id: ChatId, state: ConversationState) -> AppResult<()> {
        if state.is_ended() {
            return self.remove(chat_id).await;
        }
        Arc::clone(&self.storage).update_dialogue(chat_id, state).await?;
        Ok(())
    }

    pub async fn remove(&self, chat_id: ChatId) -> AppResult<()> {
        if let Err(err) = Arc::clone(&self.storage).remove_dialogue(chat_id).await {
            if !matches!(err, InMemStorageError::DialogueNotFound) {
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// True when a state is stored for the chat.
    pub async fn contains(&self, chat_id: ChatId) -> AppResult<bool> {
        Ok(Arc::clone(&self.storage).get_dialogue(chat_id).await?.is_some())
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}
