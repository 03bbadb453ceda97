use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Which events share a throttle slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThrottleScope {
    /// One slot per chat: users never throttle each other.
    #[default]
    PerChat,
    /// One slot for the whole process: any chat's event throttles every other chat.
    Global,
}

impl FromStr for ThrottleScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" | "per_chat" | "user" => Ok(ThrottleScope::PerChat),
            "global" => Ok(ThrottleScope::Global),
            other => Err(format!("unknown throttle scope: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ThrottleKey {
    Chat(ChatId),
    Global,
}

/// Throttle for inbound bot events.
///
/// Remembers when the last event was accepted for each key and rejects any
/// event arriving sooner than `interval` after it. Rejected events do not
/// move the window.
#[derive(Clone)]
pub struct RateLimiter {
    /// Time of the last accepted event per key
    last_accepted: Arc<Mutex<HashMap<ThrottleKey, Instant>>>,
    interval: Duration,
    limit: u32,
    scope: ThrottleScope,
}

impl RateLimiter {
    /// Creates a limiter with an empty history.
    ///
    /// # Arguments
    ///
    /// * `interval` - Minimum gap between two accepted events for the same key
    /// * `scope` - Whether the slot is per chat or shared by everyone
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paywizard::core::rate_limiter::{RateLimiter, ThrottleScope};
    /// use std::time::Duration;
    ///
    /// let limiter = RateLimiter::new(Duration::from_secs(5), ThrottleScope::PerChat);
    /// ```
    pub fn new(interval: Duration, scope: ThrottleScope) -> Self {
        Self {
            last_accepted: Arc::new(Mutex::new(HashMap::new())),
            interval,
            limit: 1,
            scope,
        }
    }

    /// Sets the configured request count. Stored for reporting only.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn scope(&self) -> ThrottleScope {
        self.scope
    }

    fn key_for(&self, chat_id: ChatId) -> ThrottleKey {
        match self.scope {
            ThrottleScope::PerChat => ThrottleKey::Chat(chat_id),
            ThrottleScope::Global => ThrottleKey::Global,
        }
    }

    /// Checks an event and records its time when accepted.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the event is accepted, `Err(remaining)` with the time left
    /// until the next event would be accepted.
    pub async fn check(&self, chat_id: ChatId) -> Result<(), Duration> {
        self.check_at(chat_id, Instant::now()).await
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    pub async fn check_at(&self, chat_id: ChatId, now: Instant) -> Result<(), Duration> {
        let key = self.key_for(chat_id);
        let mut last_accepted = self.last_accepted.lock().await;

        if let Some(&last) = last_accepted.get(&key) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.interval {
                return Err(self.interval - elapsed);
            }
        }

        last_accepted.insert(key, now);
        Ok(())
    }

    /// Evicts entries whose window has already passed.
    ///
    /// # Returns
    ///
    /// Number of removed entries.
    pub async fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Instant::now()).await
    }

    pub async fn cleanup_expired_at(&self, now: Instant) -> usize {
        let mut last_accepted = self.last_accepted.lock().await;
        let before = last_accepted.len();
        let interval = self.interval;
        last_accepted.retain(|_, last| now.saturating_duration_since(*last) < interval);
        before - last_accepted.len()
    }

    /// Number of keys currently tracked.
    pub async fn tracked(&self) -> usize {
        self.last_accepted.lock().await.len()
    }

    /// Spawns a background task that evicts stale entries every `period`.
    pub fn spawn_cleanup_task(self: Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = self.cleanup_expired().await;
                if removed > 0 {
                    log::debug!("Rate limiter evicted {} stale entries", removed);
                }
            }
        })
    }
}
