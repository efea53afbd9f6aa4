use tracing::warn;

use dtb_core::{domain::ChatId, tally::usage_text};

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

fn command_reply(cmd: &str) -> String {
    match cmd {
        "start" | "help" => usage_text(),
        other => format!("Unknown command /{other}. Send /help for the accepted formats."),
    }
}

pub async fn handle_command(state: &AppState, chat_id: ChatId, text: &str) {
    let (cmd, _args) = parse_command(text);
    let reply = command_reply(&cmd);

    if let Err(e) = state.messenger.send_text(chat_id, &reply).await {
        warn!(command = %cmd, error = %e, "failed to answer command");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_with_bot_suffix() {
        assert_eq!(
            parse_command("/Help@tally_bot now"),
            ("help".to_string(), "now".to_string())
        );
        assert_eq!(parse_command("/start"), ("start".to_string(), String::new()));
    }

    #[test]
    fn start_and_help_share_usage() {
        assert_eq!(command_reply("start"), usage_text());
        assert_eq!(command_reply("help"), usage_text());
    }

    #[test]
    fn unknown_command_points_to_help() {
        assert!(command_reply("foo").starts_with("Unknown command /foo."));
    }
}
