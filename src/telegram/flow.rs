//! Drives one chat event through throttling, the engine and the sink

use std::time::Duration;

use teloxide::types::ChatId;

use crate::conversation::{handle_event, texts, Cursor, Event, Reply};
use crate::core::error::AppResult;
use crate::telegram::bot::ReplySink;
use crate::telegram::handlers::types::HandlerDeps;

/// What happened to an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected by the rate limiter; the engine was not consulted.
    Throttled(Duration),
    /// Processed by the engine and the new state stored.
    Handled { from: Cursor, to: Cursor },
    /// Answered without touching the conversation (`/about`).
    Replied,
}

/// Applies the rate limit to one event.
///
/// Sends the wait notice and returns the remaining time when the event is
/// rejected.
async fn throttle<S>(sink: &S, deps: &HandlerDeps, chat_id: ChatId) -> AppResult<Option<Duration>>
where
    S: ReplySink + ?Sized,
{
    let Err(remaining) = deps.rate_limiter.check(chat_id).await else {
        return Ok(None);
    };

    log::info!(
        "Chat {} throttled, {} ms until next event is accepted",
        chat_id,
        remaining.as_millis()
    );
    let wait_secs = remaining.as_secs_f64().ceil() as u64;
    sink.send_reply(chat_id, &Reply::text(texts::rate_limited(wait_secs)))
        .await?;
    Ok(Some(remaining))
}

/// Processes one event for one chat.
///
/// The rate limit is checked first. On success the stored state is loaded,
/// the transition computed and every reply sent in order. The new state is
/// only persisted once all replies went out, so a failed send leaves the
/// chat where it was.
pub async fn handle_chat_event<S>(sink: &S, deps: &HandlerDeps, chat_id: ChatId, event: Event) -> AppResult<Outcome>
where
    S: ReplySink + ?Sized,
{
    if let Some(remaining) = throttle(sink, deps, chat_id).await? {
        return Ok(Outcome::Throttled(remaining));
    }

    let state = deps.sessions.load(chat_id).await?;
    let transition = handle_event(&state, &event, &deps.links);

    if transition.is_noop(&state) {
        log::debug!("Chat {}: {:?} left the state untouched", chat_id, event);
    }

    for reply in &transition.replies {
        if let Err(e) = sink.send_reply(chat_id, reply).await {
            log::error!(
                "Failed to send reply to chat {} at cursor {}: {}",
                chat_id,
                state.cursor,
                e
            );
            return Err(e);
        }
    }

    let from = state.cursor;
    let to = transition.state.cursor;
    log::info!("Chat {}: {} -> {} ({:?})", chat_id, from, to, transition.state.phase);
    deps.sessions.save(chat_id, transition.state).await?;

    Ok(Outcome::Handled { from, to })
}

/// Sends the `/about` text. Throttled like every other event, but the
/// conversation state is neither read nor written.
pub async fn send_about<S>(sink: &S, deps: &HandlerDeps, chat_id: ChatId) -> AppResult<Outcome>
where
    S: ReplySink + ?Sized,
{
    if let Some(remaining) = throttle(sink, deps, chat_id).await? {
        return Ok(Outcome::Throttled(remaining));
    }

    sink.send_reply(chat_id, &Reply::text(texts::about(env!("CARGO_PKG_VERSION"))))
        .await?;
    Ok(Outcome::Replied)
}
