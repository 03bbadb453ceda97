//! Reply sink that records outgoing messages instead of calling Telegram

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use teloxide::types::ChatId;

use paywizard::conversation::Reply;
use paywizard::core::{AppError, AppResult};
use paywizard::telegram::ReplySink;

/// Records every reply; can be switched to fail all sends.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(ChatId, Reply)>>>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn sent(&self) -> Vec<(ChatId, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent to one chat, oldest first.
    pub fn texts_for(&self, chat_id: ChatId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(chat, _)| *chat == chat_id)
            .map(|(_, reply)| reply.text)
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_reply(&self, chat_id: ChatId, reply: &Reply) -> AppResult<()> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::Io(std::io::Error::other("send failed")));
        }
        self.sent.lock().unwrap().push((chat_id, reply.clone()));
        Ok(())
    }
}
