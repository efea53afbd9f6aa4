use tracing::error;

use dtb_core::{
    domain::{ChatId, UserId},
    messaging::types::IncomingText,
};

use crate::router::AppState;

pub async fn handle_text(
    state: &AppState,
    chat_id: ChatId,
    user_id: Option<UserId>,
    username: Option<&str>,
    text: &str,
) {
    let incoming = IncomingText {
        chat_id,
        user_id,
        username: username.map(str::to_string),
        text: text.to_string(),
    };

    // Failures are logged here and never reach the dispatcher.
    if let Err(e) = state.service.handle_text(&incoming).await {
        error!(chat_id = chat_id.0, error = %e, "message handler error");
    }
}
