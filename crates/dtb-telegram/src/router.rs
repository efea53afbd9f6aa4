use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tokio::sync::Mutex;

use tracing::{info, warn};

use dtb_core::messaging::throttled::{ThrottleConfig, ThrottledMessenger};
use dtb_core::{
    config::Config, messaging::port::MessagingPort, security::RateLimiter,
    service::TallyService,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub service: Arc<TallyService>,
    pub messenger: Arc<dyn MessagingPort>,
    pub rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl AppState {
    pub fn new(cfg: Arc<Config>, messenger: Arc<dyn MessagingPort>) -> Self {
        let rate_limiter = RateLimiter::new(
            cfg.rate_limit_enabled,
            cfg.rate_limit_requests,
            cfg.rate_limit_window,
        );
        Self {
            service: Arc::new(TallyService::new(messenger.clone())),
            messenger,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
            cfg,
        }
    }
}

/// Long-poll Telegram until Ctrl-C.
///
/// teloxide reconnects on network errors by itself, so there is no restart loop here.
pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => info!(username = %me.username(), "bot started"),
        Err(e) => warn!(error = %e, "get_me failed; continuing"),
    }
    if cfg.telegram_allowed_users.is_empty() {
        info!("no allowlist configured; answering everyone");
    } else {
        info!(
            allowed_users = cfg.telegram_allowed_users.len(),
            "allowlist active"
        );
    }

    // Throttle outbound replies; the adapter still retries once on RetryAfter.
    let raw_messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let messenger: Arc<dyn MessagingPort> = Arc::new(ThrottledMessenger::new(
        raw_messenger,
        ThrottleConfig::from(cfg.as_ref()),
    ));

    let state = Arc::new(AppState::new(cfg, messenger));

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("shutdown complete");
    Ok(())
}
