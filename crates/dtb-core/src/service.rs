use std::sync::Arc;

use tracing::info;

use crate::{
    domain::MessageRef,
    messaging::{port::MessagingPort, types::IncomingText},
    tally, Result,
};

/// Answers each inbound message with its duration total.
///
/// Messages are independent: nothing is remembered between calls.
pub struct TallyService {
    messenger: Arc<dyn MessagingPort>,
}

impl TallyService {
    pub fn new(messenger: Arc<dyn MessagingPort>) -> Self {
        Self { messenger }
    }

    /// Reply to `msg` in its own chat.
    ///
    /// Only an empty message is skipped; whitespace-only text still gets a zero total.
    pub async fn handle_text(&self, msg: &IncomingText) -> Result<Vec<MessageRef>> {
        let text = msg.text.as_str();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            chat_id = msg.chat_id.0,
            user_id = msg.user_id.map(|u| u.0),
            username = msg.username.as_deref().unwrap_or("unknown"),
            text,
            "incoming message"
        );

        let tally = tally::tally_text(text);
        let reply = tally::format_reply(&tally);

        let limit = self.messenger.capabilities().max_message_len;
        let mut sent = Vec::new();
        for chunk in split_chunks(&reply, limit) {
            sent.push(self.messenger.send_text(msg.chat_id, chunk).await?);
        }

        info!(
            chat_id = msg.chat_id.0,
            total_minutes = tally.total_minutes,
            unparsed = tally.parse_errors.len(),
            reply = %reply,
            "sent reply"
        );

        Ok(sent)
    }
}

/// Split `text` into pieces of at most `limit` bytes, preferring line breaks.
///
/// Only long error lists ever get here; the total line is always short.
fn split_chunks(text: &str, limit: usize) -> Vec<&str> {
    let limit = limit.max(1);
    let mut out = Vec::new();
    let mut rest = text;

    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            // A single char wider than the limit; send it whole.
            cut = rest.chars().next().map(char::len_utf8).unwrap_or(rest.len());
        } else if let Some(nl) = rest[..cut].rfind('\n') {
            if nl > 0 {
                cut = nl;
            }
        }

        out.push(&rest[..cut]);
        rest = rest[cut..].strip_prefix('\n').unwrap_or(&rest[cut..]);
    }

    if !rest.is_empty() || out.is_empty() {
        out.push(rest);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatId, UserId},
        testing::FakeMessenger,
    };

    fn incoming(text: &str) -> IncomingText {
        IncomingText {
            chat_id: ChatId(42),
            user_id: Some(UserId(7)),
            username: Some("alice".to_string()),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn replies_to_the_same_chat() {
        let fake = Arc::new(FakeMessenger::new(4096));
        let service = TallyService::new(fake.clone());

        let sent = service
            .handle_text(&incoming("4.50 + 1:15, 2h30 abc"))
            .await
            .unwrap();
        assert_eq!(sent.len(), 1);

        let msgs = fake.sent();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].0, ChatId(42));
        assert_eq!(
            msgs[0].1,
            "Total: 8 hours 35 minutes (08:35)\nCouldn't parse: abc. Use formats like 4.50, 4:50, 4h50 or 4"
        );
    }

    #[tokio::test]
    async fn empty_message_gets_no_reply() {
        let fake = Arc::new(FakeMessenger::new(4096));
        let service = TallyService::new(fake.clone());

        let sent = service.handle_text(&incoming("")).await.unwrap();
        assert!(sent.is_empty());
        assert!(fake.sent().is_empty());
    }

    #[tokio::test]
    async fn whitespace_message_replies_with_zero() {
        let fake = Arc::new(FakeMessenger::new(4096));
        let service = TallyService::new(fake.clone());

        let sent = service.handle_text(&incoming("   \n ")).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(fake.sent()[0].1, "Total: 0 hours 0 minutes (00:00)");
    }

    #[tokio::test]
    async fn separators_only_still_replies_with_zero() {
        let fake = Arc::new(FakeMessenger::new(4096));
        let service = TallyService::new(fake.clone());

        service.handle_text(&incoming(" , + ")).await.unwrap();
        assert_eq!(fake.sent()[0].1, "Total: 0 hours 0 minutes (00:00)");
    }

    #[tokio::test]
    async fn long_replies_are_split() {
        let fake = Arc::new(FakeMessenger::new(40));
        let service = TallyService::new(fake.clone());

        service.handle_text(&incoming("1 foo bar")).await.unwrap();
        let msgs = fake.sent();
        assert!(msgs.len() > 1);
        assert!(msgs.iter().all(|(_, t)| t.len() <= 40));
        assert_eq!(msgs[0].1, "Total: 1 hour 0 minutes (01:00)");
    }

    #[tokio::test]
    async fn send_failure_is_returned() {
        let service = TallyService::new(Arc::new(FakeMessenger::failing()));
        assert!(service.handle_text(&incoming("1")).await.is_err());
    }

    #[test]
    fn split_prefers_line_breaks() {
        assert_eq!(split_chunks("aaa\nbbb", 5), vec!["aaa", "bbb"]);
        assert_eq!(split_chunks("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(split_chunks("short", 100), vec!["short"]);
        assert_eq!(split_chunks("", 10), vec![""]);
    }

    #[test]
    fn split_respects_char_boundaries() {
        let chunks = split_chunks("ééé", 3);
        assert_eq!(chunks, vec!["é", "é", "é"]);
        assert_eq!(split_chunks("é", 1), vec!["é"]);
    }
}
