//! Inbound events understood by the conversation engine

use std::fmt;
use std::str::FromStr;

use super::state::PaymentMethod;

/// Callback data carried by the inline keyboard buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Yes,
    No,
    Method(PaymentMethod),
    Paid(PaymentMethod),
}

impl ButtonId {
    /// Callback data string sent to Telegram.
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonId::Yes => "yes",
            ButtonId::No => "no",
            ButtonId::Method(PaymentMethod::Paypal) => "paypal",
            ButtonId::Method(PaymentMethod::MercadoPago) => "mercadopago",
            ButtonId::Method(PaymentMethod::Patreon) => "patreon",
            ButtonId::Paid(PaymentMethod::Paypal) => "paid_paypal",
            ButtonId::Paid(PaymentMethod::MercadoPago) => "paid_mercadopago",
            ButtonId::Paid(PaymentMethod::Patreon) => "paid_patreon",
        }
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(ButtonId::Yes),
            "no" => Ok(ButtonId::No),
            "paypal" => Ok(ButtonId::Method(PaymentMethod::Paypal)),
            "mercadopago" => Ok(ButtonId::Method(PaymentMethod::MercadoPago)),
            "patreon" => Ok(ButtonId::Method(PaymentMethod::Patreon)),
            "paid_paypal" => Ok(ButtonId::Paid(PaymentMethod::Paypal)),
            "paid_mercadopago" => Ok(ButtonId::Paid(PaymentMethod::MercadoPago)),
            "paid_patreon" => Ok(ButtonId::Paid(PaymentMethod::Patreon)),
            other => Err(format!("unknown button id: {}", other)),
        }
    }
}

/// One inbound event for a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The `/start` command.
    Start,
    /// A plain text message.
    Text(String),
    /// A message without text (sticker, photo, voice...).
    NonText,
    /// An inline keyboard button press.
    Click(ButtonId),
}

impl Event {
    /// Builds a click event from raw callback data.
    ///
    /// Returns `None` for ids no handler knows about; such clicks are ignored.
    pub fn from_callback_data(data: &str) -> Option<Event> {
        data.parse().ok().map(Event::Click)
    }

    /// Builds a message event from optional message text.
    pub fn from_message_text(text: Option<&str>) -> Event {
        match text {
            Some(text) => Event::Text(text.to_string()),
            None => Event::NonText,
        }
    }
}
