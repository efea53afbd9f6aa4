use tracing::{debug, trace};

use super::notation::{parse_token, TokenError};

/// Sum of a message's durations plus the tokens that could not be read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub total_minutes: u64,
    /// Original token text, in the order the tokens appeared.
    pub parse_errors: Vec<String>,
}

impl Tally {
    pub fn hours(&self) -> u64 {
        self.total_minutes / 60
    }

    pub fn remaining_minutes(&self) -> u64 {
        self.total_minutes % 60
    }
}

/// Parse every token and accumulate the total.
///
/// Each token is handled on its own: it either adds its full value to the total
/// or lands in `parse_errors`. Blank tokens are skipped.
pub fn aggregate<'a, I>(tokens: I) -> Tally
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tally = Tally::default();

    for raw in tokens {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }

        let counted = parse_token(token).and_then(|d| {
            trace!(token, notation = %d.notation, hours = d.hours, minutes = d.minutes, "parsed token");
            tally
                .total_minutes
                .checked_add(d.total_minutes())
                .ok_or(TokenError::Overflow)
        });

        match counted {
            Ok(total) => tally.total_minutes = total,
            Err(reason) => {
                debug!(token, %reason, "unparsed duration token");
                tally.parse_errors.push(token.to_string());
            }
        }
    }

    tally
}
