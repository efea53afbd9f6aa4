/// What an inbound message asks of the bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Route<'a> {
    /// Nothing to answer: channel posts, other bots, stickers, service messages.
    Ignore,
    Command(&'a str),
    Tally(&'a str),
}

/// The parts of a message that decide its route.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Envelope<'a> {
    pub is_channel: bool,
    pub sender_is_bot: bool,
    pub text: Option<&'a str>,
    pub caption: Option<&'a str>,
}

/// Text wins over caption; an empty string counts as absent.
fn body<'a>(env: &Envelope<'a>) -> Option<&'a str> {
    env.text
        .filter(|t| !t.is_empty())
        .or_else(|| env.caption.filter(|c| !c.is_empty()))
}

pub(crate) fn route<'a>(env: &Envelope<'a>) -> Route<'a> {
    if env.is_channel || env.sender_is_bot {
        return Route::Ignore;
    }
    if let Some(text) = env.text.filter(|t| t.starts_with('/')) {
        return Route::Command(text);
    }
    match body(env) {
        Some(text) => Route::Tally(text),
        None => Route::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str) -> Envelope<'_> {
        Envelope {
            text: Some(t),
            ..Envelope::default()
        }
    }

    #[test]
    fn plain_text_is_tallied() {
        assert_eq!(route(&text("4:30 2h")), Route::Tally("4:30 2h"));
    }

    #[test]
    fn caption_is_used_when_there_is_no_text() {
        let env = Envelope {
            caption: Some("1.5"),
            ..Envelope::default()
        };
        assert_eq!(route(&env), Route::Tally("1.5"));

        let env = Envelope {
            text: Some(""),
            caption: Some("2h"),
            ..Envelope::default()
        };
        assert_eq!(route(&env), Route::Tally("2h"));
    }

    #[test]
    fn text_wins_over_caption() {
        let env = Envelope {
            text: Some("1"),
            caption: Some("2"),
            ..Envelope::default()
        };
        assert_eq!(route(&env), Route::Tally("1"));
    }

    #[test]
    fn messages_without_text_are_ignored() {
        assert_eq!(route(&Envelope::default()), Route::Ignore);
        let env = Envelope {
            caption: Some(""),
            ..Envelope::default()
        };
        assert_eq!(route(&env), Route::Ignore);
    }

    #[test]
    fn whitespace_text_is_still_tallied() {
        assert_eq!(route(&text("  ")), Route::Tally("  "));
    }

    #[test]
    fn slash_text_is_a_command_but_slash_caption_is_not() {
        assert_eq!(route(&text("/help")), Route::Command("/help"));
        let env = Envelope {
            caption: Some("/help"),
            ..Envelope::default()
        };
        assert_eq!(route(&env), Route::Tally("/help"));
    }

    #[test]
    fn channels_and_bots_are_ignored() {
        let env = Envelope {
            is_channel: true,
            ..text("1")
        };
        assert_eq!(route(&env), Route::Ignore);
        let env = Envelope {
            sender_is_bot: true,
            ..text("/help")
        };
        assert_eq!(route(&env), Route::Ignore);
    }
}
