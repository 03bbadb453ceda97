//! Per-chat conversation state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse tag describing how far the user got in the onboarding flow.
///
/// Ordered: the happy path only ever moves forward through these values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Start,
    AskedPayment,
    SelectedMethod,
    CollectedName,
    CollectedEmail,
    AwaitingPaymentConfirmation,
    Verified,
}

/// The ordered steps of the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Greets and asks whether the user already paid.
    Greeting,
    /// Waits for a yes/no answer typed as text.
    PaymentAnswer,
    /// Waits for the payment method.
    MethodChoice,
    /// Stores the full name, asks for the email.
    CollectName,
    /// Stores the email, sends the payment link.
    CollectEmail,
    /// Waits for "ok" once the user paid.
    ConfirmPayment,
    /// Hands out the group invite and ends the conversation.
    GrantAccess,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::Greeting,
        Step::PaymentAnswer,
        Step::MethodChoice,
        Step::CollectName,
        Step::CollectEmail,
        Step::ConfirmPayment,
        Step::GrantAccess,
    ];

    /// 0-based position in the step sequence.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    /// Cursor pointing at the following step, or `Ended` after the last one.
    pub fn next(self) -> Cursor {
        match Step::from_index(self.index() + 1) {
            Some(step) => Cursor::At(step),
            None => Cursor::Ended,
        }
    }

    /// Phase recorded once this step has run.
    pub fn phase(self) -> Phase {
        match self {
            Step::Greeting | Step::PaymentAnswer => Phase::AskedPayment,
            Step::MethodChoice => Phase::SelectedMethod,
            Step::CollectName => Phase::CollectedName,
            Step::CollectEmail => Phase::CollectedEmail,
            Step::ConfirmPayment => Phase::AwaitingPaymentConfirmation,
            Step::GrantAccess => Phase::Verified,
        }
    }

    /// Automatic steps run as soon as the cursor lands on them,
    /// without waiting for the next message.
    pub fn is_automatic(self) -> bool {
        matches!(self, Step::Greeting | Step::GrantAccess)
    }
}

/// Position of the next step to run, or the "conversation ended" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    At(Step),
    Ended,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::At(Step::Greeting)
    }
}

impl Cursor {
    /// Step index, `None` once the conversation ended.
    pub fn index(self) -> Option<usize> {
        match self {
            Cursor::At(step) => Some(step.index()),
            Cursor::Ended => None,
        }
    }

    /// Moves one step forward. `Ended` stays `Ended`.
    pub fn advance(self) -> Cursor {
        match self {
            Cursor::At(step) => step.next(),
            Cursor::Ended => Cursor::Ended,
        }
    }

    pub fn is_ended(self) -> bool {
        self == Cursor::Ended
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::At(step) => write!(f, "{}", step.index()),
            Cursor::Ended => write!(f, "ended"),
        }
    }
}

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Paypal,
    MercadoPago,
    Patreon,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Paypal, PaymentMethod::MercadoPago, PaymentMethod::Patreon];

    /// Human-readable name shown on buttons and in replies.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Paypal => "Paypal",
            PaymentMethod::MercadoPago => "MercadoPago",
            PaymentMethod::Patreon => "Patreon",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    /// Accepts any casing and ignores spaces and dashes ("Mercado Pago").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "paypal" => Ok(PaymentMethod::Paypal),
            "mercadopago" => Ok(PaymentMethod::MercadoPago),
            "patreon" => Ok(PaymentMethod::Patreon),
            _ => Err(format!("unknown payment method: {}", s)),
        }
    }
}

/// Everything the wizard knows about one chat.
///
/// Treated as an immutable value: transitions build a new state instead of
/// mutating the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub cursor: Cursor,
    pub phase: Phase,
    pub method: Option<PaymentMethod>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ConversationState {
    /// Fresh state: cursor on the greeting, phase `Start`, nothing collected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with the cursor moved to `cursor`.
    #[must_use]
    pub fn at(&self, cursor: Cursor) -> Self {
        Self {
            cursor,
            ..self.clone()
        }
    }

    /// Copy marking `step` as executed: phase from the step, cursor on the next one.
    #[must_use]
    pub fn after(&self, step: Step) -> Self {
        Self {
            cursor: step.next(),
            phase: step.phase(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_ended(&self) -> bool {
        self.cursor.is_ended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_step_indices_follow_sequence() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(*step));
        }
        assert_eq!(Step::from_index(7), None);
    }

    #[test]
    fn test_last_step_advances_to_ended() {
        assert_eq!(Step::GrantAccess.next(), Cursor::Ended);
        assert_eq!(Cursor::Ended.advance(), Cursor::Ended);
        assert_eq!(Cursor::At(Step::CollectName).advance(), Cursor::At(Step::CollectEmail));
    }

    #[test]
    fn test_step_phases_never_decrease() {
        let phases: Vec<Phase> = Step::ALL.iter().map(|s| s.phase()).collect();
        assert!(phases.windows(2).all(|w| w[0] <= w[1]));
        assert!(Phase::Start < phases[0]);
    }

    #[test]
    fn test_default_state() {
        let state = ConversationState::new();
        assert_eq!(state.cursor, Cursor::At(Step::Greeting));
        assert_eq!(state.cursor.index(), Some(0));
        assert_eq!(state.phase, Phase::Start);
        assert!(state.method.is_none() && state.name.is_none() && state.email.is_none());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("Paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::Paypal));
        assert_eq!("Mercado Pago".parse::<PaymentMethod>(), Ok(PaymentMethod::MercadoPago));
        assert_eq!(" PATREON ".parse::<PaymentMethod>(), Ok(PaymentMethod::Patreon));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_state_survives_session_serialization() {
        let state = ConversationState::new()
            .after(Step::CollectName)
            .with_method(PaymentMethod::Patreon)
            .with_name("Jane Doe");

        let json = serde_json::to_string(&state).unwrap();
        let restored: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
