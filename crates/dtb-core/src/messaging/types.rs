use crate::domain::{ChatId, UserId};

/// Inbound text, already pulled out of the transport envelope.
#[derive(Clone, Debug)]
pub struct IncomingText {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub username: Option<String>,
    pub text: String,
}

#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}
