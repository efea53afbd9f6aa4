use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::{
    config::Config,
    domain::{ChatId, MessageRef},
    messaging::{port::MessagingPort, types::MessagingCapabilities},
    Result,
};

#[derive(Clone, Copy, Debug)]
pub struct ThrottleConfig {
    /// Minimum spacing between any two outbound calls.
    pub global_min_interval: Duration,
    /// Minimum spacing between calls to the same chat.
    pub per_chat_min_interval: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            global_min_interval: Duration::from_millis(40), // ~25/sec
            per_chat_min_interval: Duration::from_millis(1050), // ~0.95/sec
        }
    }
}

impl From<&Config> for ThrottleConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            global_min_interval: cfg.throttle_global_interval,
            per_chat_min_interval: cfg.throttle_per_chat_interval,
        }
    }
}

/// Book the first free slot at or after `now`; returns the wait until it.
fn book(next_free: &mut Instant, interval: Duration, now: Instant) -> Duration {
    let slot = now.max(*next_free);
    *next_free = slot + interval;
    slot - now
}

/// Next free send slot per chat.
///
/// A chat whose slot is already in the past behaves exactly like an unseen chat,
/// so such entries are pruned once per interval.
#[derive(Debug)]
struct ChatSlots {
    next_free: HashMap<i64, Instant>,
    next_prune: Instant,
}

impl ChatSlots {
    fn book(&mut self, chat_id: i64, interval: Duration, now: Instant) -> Duration {
        if now >= self.next_prune {
            self.next_free.retain(|_, at| *at > now);
            self.next_prune = now + interval;
        }
        let next_free = self.next_free.entry(chat_id).or_insert(now);
        book(next_free, interval, now)
    }
}

/// `MessagingPort` decorator that spaces out outbound sends.
///
/// Keeps a burst of replies (one user pasting many messages at once) under the
/// messenger's flood limits.
pub struct ThrottledMessenger {
    inner: Arc<dyn MessagingPort>,
    cfg: ThrottleConfig,
    global: Mutex<Instant>,
    per_chat: Mutex<ChatSlots>,
}

impl ThrottledMessenger {
    pub fn new(inner: Arc<dyn MessagingPort>, cfg: ThrottleConfig) -> Self {
        let now = Instant::now();
        Self {
            inner,
            cfg,
            global: Mutex::new(now),
            per_chat: Mutex::new(ChatSlots {
                next_free: HashMap::new(),
                next_prune: now,
            }),
        }
    }

    async fn wait_for_slot(&self, chat_id: i64) {
        let now = Instant::now();
        let global_wait = {
            let mut next_free = self.global.lock().await;
            book(&mut next_free, self.cfg.global_min_interval, now)
        };
        let chat_wait = self
            .per_chat
            .lock()
            .await
            .book(chat_id, self.cfg.per_chat_min_interval, now);

        let wait = global_wait.max(chat_wait);
        if !wait.is_zero() {
            sleep(wait).await;
        }
    }

    #[cfg(test)]
    async fn tracked_chats(&self) -> usize {
        self.per_chat.lock().await.next_free.len()
    }
}

#[async_trait::async_trait]
impl MessagingPort for ThrottledMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        self.inner.capabilities()
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        self.wait_for_slot(chat_id.0).await;
        self.inner.send_text(chat_id, text).await
    }
}
