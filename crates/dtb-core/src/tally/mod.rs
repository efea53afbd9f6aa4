//! Duration tally: message text in, summary reply out.
//!
//! Pure and synchronous. Nothing here touches the transport or shared state.

pub mod aggregate;
pub mod notation;
pub mod reply;
pub mod tokenize;

pub use aggregate::{aggregate, Tally};
pub use notation::{parse_token, Notation, ParsedDuration, TokenError};
pub use reply::{format_reply, usage_text, FORMAT_HINT};
pub use tokenize::tokenize;

/// Tally every duration in `text`.
pub fn tally_text(text: &str) -> Tally {
    aggregate(tokenize(text))
}

/// Full pipeline used by the bot for each inbound message.
pub fn reply_for(text: &str) -> String {
    format_reply(&tally_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_reply() {
        assert_eq!(
            reply_for("4.50 + 1:15, 2h30 abc"),
            "Total: 8 hours 35 minutes (08:35)\nCouldn't parse: abc. Use formats like 4.50, 4:50, 4h50 or 4"
        );
    }

    #[test]
    fn separators_only_reply() {
        assert_eq!(reply_for("  ,  + "), "Total: 0 hours 0 minutes (00:00)");
        assert_eq!(reply_for("  \u{feff}  "), "Total: 0 hours 0 minutes (00:00)");
    }

    #[test]
    fn every_token_is_counted_or_reported() {
        let text = "1 2:30 nope 3h 4.5 ?? :15 x.y";
        let tokens = tokenize(text);
        let t = tally_text(text);
        let parsed = tokens.iter().filter(|tok| parse_token(tok).is_ok()).count();
        assert_eq!(parsed + t.parse_errors.len(), tokens.len());
        assert_eq!(t.parse_errors, vec!["nope", "??", "x.y"]);
    }

    #[test]
    fn multiline_message() {
        assert_eq!(
            reply_for("mon 4:30\ntue 3h\nwed 5"),
            "Total: 12 hours 30 minutes (12:30)\nCouldn't parse: mon, tue, wed. Use formats like 4.50, 4:50, 4h50 or 4"
        );
    }
}
