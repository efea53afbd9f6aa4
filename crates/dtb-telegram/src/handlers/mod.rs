//! Telegram update handlers.
//!
//! `handle_message` first decides whether a message needs an answer at all,
//! then checks auth and the rate limit, then hands off to the command or text
//! handler.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use tracing::{debug, warn};

use dtb_core::domain::{ChatId, UserId};
use dtb_core::security::is_authorized;

use crate::router::AppState;

mod commands;
mod route;
mod text;

use route::{route, Envelope, Route};

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let sender = msg.from();
    let route = route(&Envelope {
        is_channel: msg.chat.is_channel(),
        sender_is_bot: sender.map(|u| u.is_bot).unwrap_or(false),
        text: msg.text(),
        caption: msg.caption(),
    });
    if route == Route::Ignore {
        debug!(chat_id = msg.chat.id.0, "ignoring update");
        return Ok(());
    }

    let chat_id = ChatId(msg.chat.id.0);
    let user_id = sender.map(|u| UserId(u.id.0 as i64));

    if !is_authorized(user_id, &state.cfg.telegram_allowed_users) {
        warn!(chat_id = chat_id.0, user_id = user_id.map(|u| u.0), "unauthorized");
        notify(
            &state,
            chat_id,
            "Unauthorized. Contact the bot owner for access.",
        )
        .await;
        return Ok(());
    }

    if let Some(user_id) = user_id {
        let limited = state.rate_limiter.lock().await.check(user_id);
        if let Err(wait) = limited {
            warn!(user_id = user_id.0, wait_secs = wait.as_secs_f64(), "rate limited");
            let notice = format!(
                "Too many messages. Try again in {:.0}s.",
                wait.as_secs_f64().ceil()
            );
            notify(&state, chat_id, &notice).await;
            return Ok(());
        }
    }

    match route {
        Route::Command(text) => commands::handle_command(&state, chat_id, text).await,
        Route::Tally(text) => {
            let username = sender.and_then(|u| u.username.as_deref());
            text::handle_text(&state, chat_id, user_id, username, text).await;
        }
        Route::Ignore => {}
    }
    Ok(())
}

/// Best-effort notice through the throttled messenger.
async fn notify(state: &AppState, chat_id: ChatId, text: &str) {
    if let Err(e) = state.messenger.send_text(chat_id, text).await {
        warn!(chat_id = chat_id.0, error = %e, "failed to send notice");
    }
}
