//! Payment-onboarding conversation engine
//!
//! A fixed sequence of wizard steps plus button-triggered jumps, expressed as
//! one pure transition function over an immutable per-chat state.

pub mod event;
pub mod reply;
pub mod state;
pub mod texts;
pub mod transition;

pub use event::{ButtonId, Event};
pub use reply::{Button, Keyboard, Reply};
pub use state::{ConversationState, Cursor, PaymentMethod, Phase, Step};
pub use texts::FlowLinks;
pub use transition::{handle_event, run_step, Transition};
