//! Outbound replies, independent of the chat transport

use super::event::ButtonId;
use super::state::PaymentMethod;

/// A labeled inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub id: ButtonId,
}

impl Button {
    pub fn new(label: impl Into<String>, id: ButtonId) -> Self {
        Self {
            label: label.into(),
            id,
        }
    }
}

/// Rows of buttons attached under a message.
pub type Keyboard = Vec<Vec<Button>>;

/// One message the transport has to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Every button id on this reply, row by row.
    pub fn button_ids(&self) -> Vec<ButtonId> {
        self.keyboard
            .iter()
            .flatten()
            .flatten()
            .map(|button| button.id)
            .collect()
    }
}

/// Si / No
pub fn yes_no_keyboard() -> Keyboard {
    vec![vec![Button::new("Sí", ButtonId::Yes), Button::new("No", ButtonId::No)]]
}

/// One button per payment method, on a single row.
pub fn method_keyboard() -> Keyboard {
    vec![PaymentMethod::ALL
        .iter()
        .map(|method| Button::new(method.label(), ButtonId::Method(*method)))
        .collect()]
}

/// "Ya pagué" for the chosen method.
pub fn paid_keyboard(method: PaymentMethod) -> Keyboard {
    vec![vec![Button::new(
        format!("✅ Ya pagué con {}", method.label()),
        ButtonId::Paid(method),
    )]]
}
