//! Pure transition function of the onboarding wizard
//!
//! Given the stored state and one inbound event, returns the next state and
//! the replies to send. No I/O happens here; the transport sends the replies
//! and decides whether to persist the new state.

use once_cell::sync::Lazy;
use regex::Regex;

use super::event::{ButtonId, Event};
use super::reply::{method_keyboard, paid_keyboard, yes_no_keyboard, Reply};
use super::state::{ConversationState, Cursor, PaymentMethod, Step};
use super::texts::{self, FlowLinks};

#[allow(clippy::expect_used)]
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ConversationState,
    pub replies: Vec<Reply>,
}

impl Transition {
    pub fn new(state: ConversationState) -> Self {
        Self { state, replies: vec![] }
    }

    /// State untouched, one reply.
    fn stay(state: &ConversationState, reply: Reply) -> Self {
        Self::new(state.clone()).with_reply(reply)
    }

    #[must_use]
    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.replies.push(reply);
        self
    }

    /// True when the state did not change and nothing is sent.
    pub fn is_noop(&self, before: &ConversationState) -> bool {
        self.replies.is_empty() && &self.state == before
    }

    /// Runs automatic steps until the cursor waits for input or the flow ends.
    fn settle(mut self, links: &FlowLinks) -> Self {
        while let Cursor::At(step) = self.state.cursor {
            if !step.is_automatic() {
                break;
            }
            let next = run_step(step, &self.state, None, links);
            self.state = next.state;
            self.replies.extend(next.replies);
        }
        self
    }
}

/// Handles one event for one chat.
///
/// - `Start` resets the conversation and greets.
/// - `Text` / `NonText` run the step under the cursor.
/// - `Click` runs the jump handler of the button, whatever the cursor.
pub fn handle_event(state: &ConversationState, event: &Event, links: &FlowLinks) -> Transition {
    let transition = match event {
        Event::Start => Transition::new(ConversationState::new()),
        Event::Text(text) => on_message(state, Some(text.as_str()), links),
        Event::NonText => on_message(state, None, links),
        Event::Click(button) => on_click(state, *button),
    };
    transition.settle(links)
}

fn on_message(state: &ConversationState, text: Option<&str>, links: &FlowLinks) -> Transition {
    match state.cursor {
        Cursor::At(step) => run_step(step, state, text, links),
        // A message after the end starts over; `settle` runs the greeting.
        Cursor::Ended => Transition::new(ConversationState::new()),
    }
}

/// Executes a single step against the current state.
///
/// `text` is `None` for automatic steps and for messages that carry no text.
pub fn run_step(step: Step, state: &ConversationState, text: Option<&str>, links: &FlowLinks) -> Transition {
    if step.is_automatic() {
        return match step {
            Step::Greeting => Transition::new(state.after(step))
                .with_reply(Reply::with_keyboard(texts::GREETING, yes_no_keyboard())),
            _ => Transition::new(state.after(step)).with_reply(Reply::text(texts::group_invite(&links.group_invite))),
        };
    }

    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Transition::stay(state, Reply::text(texts::MESSAGE_NOT_UNDERSTOOD));
    };

    match step {
        Step::PaymentAnswer => match parse_yes_no(text) {
            Some(true) => ask_method(state.after(step)),
            Some(false) => decline(state),
            None => Transition::stay(state, Reply::text(texts::YES_NO_NOT_UNDERSTOOD)),
        },
        Step::MethodChoice => match text.parse::<PaymentMethod>() {
            Ok(method) => choose_method(state, method),
            Err(_) => Transition::stay(state, Reply::with_keyboard(texts::CHOOSE_METHOD_AGAIN, method_keyboard())),
        },
        Step::CollectName => {
            Transition::new(state.after(step).with_name(text)).with_reply(Reply::text(texts::ASK_EMAIL))
        }
        Step::CollectEmail => {
            if !EMAIL_RE.is_match(text) {
                return Transition::stay(state, Reply::text(texts::INVALID_EMAIL));
            }
            let next = state.after(step).with_email(text);
            let link = links.payment_links_for(next.method);
            let confirm = match next.method {
                Some(method) => Reply::with_keyboard(texts::ASK_CONFIRMATION, paid_keyboard(method)),
                None => Reply::text(texts::ASK_CONFIRMATION),
            };
            Transition::new(next)
                .with_reply(Reply::text(texts::payment_link(&link)))
                .with_reply(confirm)
        }
        Step::ConfirmPayment => {
            if is_confirmation(text) {
                // Verification is a placeholder: any confirmation is accepted.
                Transition::new(state.after(step))
            } else {
                Transition::stay(state, Reply::text(texts::CONFIRMATION_REMINDER))
            }
        }
        // Automatic steps were handled above.
        Step::Greeting | Step::GrantAccess => Transition::new(state.clone()),
    }
}

fn on_click(state: &ConversationState, button: ButtonId) -> Transition {
    match button {
        ButtonId::Yes => ask_method(state.after(Step::PaymentAnswer)),
        ButtonId::No => decline(state),
        ButtonId::Method(method) => choose_method(state, method),
        ButtonId::Paid(method) => {
            let next = state.at(state.cursor.advance()).with_method(method);
            Transition::new(next).with_reply(Reply::text(texts::WILL_VERIFY))
        }
    }
}

fn ask_method(next: ConversationState) -> Transition {
    Transition::new(next).with_reply(Reply::with_keyboard(texts::ASK_METHOD, method_keyboard()))
}

fn choose_method(state: &ConversationState, method: PaymentMethod) -> Transition {
    let next = state.after(Step::MethodChoice).with_method(method);
    Transition::new(next).with_reply(Reply::text(texts::method_selected(method)))
}

fn decline(state: &ConversationState) -> Transition {
    Transition::new(state.at(Cursor::Ended)).with_reply(Reply::text(texts::PLEASE_PAY))
}

fn normalize_answer(text: &str) -> String {
    text.trim()
        .trim_end_matches(['!', '.', '?'])
        .to_lowercase()
        .replace('í', "i")
}

/// `Some(true)` for yes, `Some(false)` for no, `None` when unclear.
fn parse_yes_no(text: &str) -> Option<bool> {
    match normalize_answer(text).as_str() {
        "si" | "s" | "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

fn is_confirmation(text: &str) -> bool {
    matches!(normalize_answer(text).as_str(), "ok" | "okay" | "listo")
}
