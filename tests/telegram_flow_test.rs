//! Adapter behavior between the handler tree and the conversation engine

mod common;

use std::time::Duration;

use common::fixtures::{deps, deps_with_limiter};
use common::recorder::RecordingSink;
use paywizard::conversation::{texts, ButtonId, Cursor, Event, PaymentMethod, Step};
use paywizard::core::rate_limiter::{RateLimiter, ThrottleScope};
use paywizard::telegram::{handle_chat_event, send_about, Outcome};
use pretty_assertions::assert_eq;
use teloxide::types::ChatId;

const CHAT: ChatId = ChatId(1001);

#[tokio::test]
async fn test_full_flow_sends_invite_and_drops_session() {
    let sink = RecordingSink::new();
    let deps = deps();

    let events = [
        Event::Start,
        Event::Click(ButtonId::Yes),
        Event::Click(ButtonId::Method(PaymentMethod::Paypal)),
        Event::Text("Jane Doe".to_string()),
        Event::Text("jane@x.com".to_string()),
        Event::Text("ok".to_string()),
    ];
    for event in events {
        handle_chat_event(&sink, &deps, CHAT, event).await.unwrap();
    }

    let sent = sink.texts_for(CHAT);
    assert_eq!(sent.first().map(String::as_str), Some(texts::GREETING));
    assert!(sent.iter().any(|t| t.contains("https://pay.example/paypal")));
    assert!(sent.last().unwrap().contains("https://t.me/+testgroup"));
    assert!(!deps.sessions.contains(CHAT).await.unwrap());
}

#[tokio::test]
async fn test_failed_send_keeps_previous_state() {
    let sink = RecordingSink::new();
    let deps = deps();

    handle_chat_event(&sink, &deps, CHAT, Event::Start).await.unwrap();
    let before = deps.sessions.load(CHAT).await.unwrap();
    assert_eq!(before.cursor, Cursor::At(Step::PaymentAnswer));

    sink.set_failing(true);
    let result = handle_chat_event(&sink, &deps, CHAT, Event::Click(ButtonId::Yes)).await;
    assert!(result.is_err());
    assert_eq!(deps.sessions.load(CHAT).await.unwrap(), before);
}

#[tokio::test]
async fn test_throttled_event_skips_engine() {
    let sink = RecordingSink::new();
    let deps = deps_with_limiter(RateLimiter::new(Duration::from_secs(5), ThrottleScope::PerChat));

    let first = handle_chat_event(&sink, &deps, CHAT, Event::Start).await.unwrap();
    assert_eq!(
        first,
        Outcome::Handled {
            from: Cursor::Ended,
            to: Cursor::At(Step::PaymentAnswer)
        }
    );

    let second = handle_chat_event(&sink, &deps, CHAT, Event::Click(ButtonId::Yes))
        .await
        .unwrap();
    assert!(matches!(second, Outcome::Throttled(_)));

    let state = deps.sessions.load(CHAT).await.unwrap();
    assert_eq!(state.cursor, Cursor::At(Step::PaymentAnswer));
    assert!(sink.texts_for(CHAT).last().unwrap().starts_with("⏳"));
}

#[tokio::test]
async fn test_global_scope_throttles_other_chats() {
    let sink = RecordingSink::new();
    let deps = deps_with_limiter(RateLimiter::new(Duration::from_secs(5), ThrottleScope::Global));

    handle_chat_event(&sink, &deps, ChatId(1), Event::Start).await.unwrap();
    let other = handle_chat_event(&sink, &deps, ChatId(2), Event::Start).await.unwrap();

    assert!(matches!(other, Outcome::Throttled(_)));
    assert!(!deps.sessions.contains(ChatId(2)).await.unwrap());
}

#[tokio::test]
async fn test_chats_do_not_share_state() {
    let sink = RecordingSink::new();
    let deps = deps();

    handle_chat_event(&sink, &deps, ChatId(1), Event::Start).await.unwrap();
    handle_chat_event(&sink, &deps, ChatId(1), Event::Click(ButtonId::Yes))
        .await
        .unwrap();
    handle_chat_event(&sink, &deps, ChatId(2), Event::Start).await.unwrap();

    assert_eq!(
        deps.sessions.load(ChatId(1)).await.unwrap().cursor,
        Cursor::At(Step::MethodChoice)
    );
    assert_eq!(
        deps.sessions.load(ChatId(2)).await.unwrap().cursor,
        Cursor::At(Step::PaymentAnswer)
    );
}

#[tokio::test]
async fn test_decline_removes_session() {
    let sink = RecordingSink::new();
    let deps = deps();

    handle_chat_event(&sink, &deps, CHAT, Event::Start).await.unwrap();
    let outcome = handle_chat_event(&sink, &deps, CHAT, Event::Click(ButtonId::No))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Handled {
            from: Cursor::At(Step::PaymentAnswer),
            to: Cursor::Ended
        }
    );
    assert!(!deps.sessions.contains(CHAT).await.unwrap());
    assert_eq!(sink.texts_for(CHAT).last().map(String::as_str), Some(texts::PLEASE_PAY));
}

#[tokio::test]
async fn test_paid_click_after_flow_ended_stays_ended() {
    let sink = RecordingSink::new();
    let deps = deps();

    let events = [
        Event::Start,
        Event::Click(ButtonId::Yes),
        Event::Click(ButtonId::Method(PaymentMethod::Paypal)),
        Event::Text("Jane Doe".to_string()),
        Event::Text("jane@x.com".to_string()),
        Event::Text("ok".to_string()),
    ];
    for event in events {
        handle_chat_event(&sink, &deps, CHAT, event).await.unwrap();
    }
    sink.clear();

    let outcome = handle_chat_event(&sink, &deps, CHAT, Event::Click(ButtonId::Paid(PaymentMethod::Paypal)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Handled {
            from: Cursor::Ended,
            to: Cursor::Ended
        }
    );
    assert_eq!(sink.texts_for(CHAT), vec![texts::WILL_VERIFY.to_string()]);
    assert!(!deps.sessions.contains(CHAT).await.unwrap());
    assert!(deps.sessions.load(CHAT).await.unwrap().is_ended());
}

#[tokio::test]
async fn test_paid_click_after_decline_stays_ended() {
    let sink = RecordingSink::new();
    let deps = deps();

    handle_chat_event(&sink, &deps, CHAT, Event::Start).await.unwrap();
    handle_chat_event(&sink, &deps, CHAT, Event::Click(ButtonId::No))
        .await
        .unwrap();
    handle_chat_event(&sink, &deps, CHAT, Event::Click(ButtonId::Paid(PaymentMethod::Patreon)))
        .await
        .unwrap();

    assert!(!deps.sessions.contains(CHAT).await.unwrap());
}

#[tokio::test]
async fn test_first_message_from_new_chat_is_greeted() {
    let sink = RecordingSink::new();
    let deps = deps();

    let outcome = handle_chat_event(&sink, &deps, CHAT, Event::Text("hola".to_string()))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Handled {
            from: Cursor::Ended,
            to: Cursor::At(Step::PaymentAnswer)
        }
    );
    assert_eq!(sink.texts_for(CHAT), vec![texts::GREETING.to_string()]);
}

#[tokio::test]
async fn test_about_leaves_conversation_untouched() {
    let sink = RecordingSink::new();
    let deps = deps();

    handle_chat_event(&sink, &deps, CHAT, Event::Start).await.unwrap();
    let before = deps.sessions.load(CHAT).await.unwrap();

    let outcome = send_about(&sink, &deps, CHAT).await.unwrap();
    assert_eq!(outcome, Outcome::Replied);
    assert!(sink.texts_for(CHAT).last().unwrap().contains("/start"));
    assert_eq!(deps.sessions.load(CHAT).await.unwrap(), before);
}

#[tokio::test]
async fn test_about_is_rate_limited() {
    let sink = RecordingSink::new();
    let deps = deps_with_limiter(RateLimiter::new(Duration::from_secs(5), ThrottleScope::PerChat));

    assert_eq!(send_about(&sink, &deps, CHAT).await.unwrap(), Outcome::Replied);
    let second = send_about(&sink, &deps, CHAT).await.unwrap();

    assert!(matches!(second, Outcome::Throttled(_)));
    assert_eq!(sink.texts_for(CHAT).len(), 2);
    assert!(sink.texts_for(CHAT)[1].starts_with("⏳"));
}
