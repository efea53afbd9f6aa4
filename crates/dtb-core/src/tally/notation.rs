//! Single-token duration parsing.
//!
//! Accepted notations, first match wins:
//! - colon `H:M` (`4:50`, `:30`, `2:`)
//! - letter `HhM` (`4h50`, `4H`, `h30`)
//! - dot `H.MM` (`4.50`, `4.5` = 4h50m, `4.x` = 4h)
//! - bare integer hours (`4`)

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notation {
    Colon,
    Letter,
    Dot,
    Bare,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Notation::Colon => "colon",
            Notation::Letter => "letter",
            Notation::Dot => "dot",
            Notation::Bare => "bare integer",
        };
        f.write_str(name)
    }
}

/// One successfully read token, already normalized (`minutes < 60`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedDuration {
    pub hours: u64,
    pub minutes: u64,
    pub notation: Notation,
}

impl ParsedDuration {
    pub fn total_minutes(&self) -> u64 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }
}

/// Why a token was not counted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("no known notation matches")]
    UnknownNotation,

    #[error("{part} of {notation} notation is not a number")]
    NotANumber {
        notation: Notation,
        part: &'static str,
    },

    #[error("value is too large")]
    Overflow,
}

/// Parse one trimmed, non-empty token into hours and minutes.
///
/// Minutes past 59 are carried into hours before returning. A token either
/// parses completely or fails; there is no partial result.
pub fn parse_token(token: &str) -> Result<ParsedDuration, TokenError> {
    let (hours, minutes, notation) = if token.contains(':') {
        let (h, m) = read_pair(token, ':', Notation::Colon)?;
        (h, m, Notation::Colon)
    } else if token.contains(['h', 'H']) {
        let (h, m) = read_pair(&token.to_lowercase(), 'h', Notation::Letter)?;
        (h, m, Notation::Letter)
    } else if token.contains('.') {
        let mut parts = token.split('.');
        let h = read_field(parts.next().unwrap_or(""), Notation::Dot, "hour part")?;
        let m = fraction_minutes(parts.next().unwrap_or(""));
        (h, m, Notation::Dot)
    } else if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        let h = read_field(token, Notation::Bare, "hour part")?;
        (h, 0, Notation::Bare)
    } else {
        return Err(TokenError::UnknownNotation);
    };

    let (hours, minutes) = normalize(hours, minutes)?;
    hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .ok_or(TokenError::Overflow)?;

    Ok(ParsedDuration {
        hours,
        minutes,
        notation,
    })
}

/// Carry whole hours out of `minutes`.
fn normalize(hours: u64, minutes: u64) -> Result<(u64, u64), TokenError> {
    if minutes < 60 {
        return Ok((hours, minutes));
    }
    let hours = hours
        .checked_add(minutes / 60)
        .ok_or(TokenError::Overflow)?;
    Ok((hours, minutes % 60))
}

/// Hours and minutes around the first `sep`. Anything after a second `sep` is ignored.
fn read_pair(token: &str, sep: char, notation: Notation) -> Result<(u64, u64), TokenError> {
    let mut parts = token.split(sep);
    let hours = read_field(parts.next().unwrap_or(""), notation, "hour part")?;
    let minutes = read_field(parts.next().unwrap_or(""), notation, "minute part")?;
    Ok((hours, minutes))
}

/// An empty part counts as zero; otherwise the part must start with a digit.
fn read_field(part: &str, notation: Notation, name: &'static str) -> Result<u64, TokenError> {
    if part.is_empty() {
        return Ok(0);
    }
    leading_int(part)?.ok_or(TokenError::NotANumber {
        notation,
        part: name,
    })
}

/// Value of the leading run of ASCII digits (`"30h"` -> 30), `None` if there is none.
fn leading_int(part: &str) -> Result<Option<u64>, TokenError> {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    if end == 0 {
        return Ok(None);
    }
    part[..end]
        .parse::<u64>()
        .map(Some)
        .map_err(|_| TokenError::Overflow)
}

/// Minutes from the fractional part of dot notation.
///
/// A lone digit is tens of minutes and longer runs keep their first two digits.
/// Anything that is not all digits reads as zero minutes rather than failing.
fn fraction_minutes(frac: &str) -> u64 {
    let digits = frac.as_bytes();
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return 0;
    }
    let tens = u64::from(digits[0] - b'0') * 10;
    match digits.get(1) {
        Some(d) => tens + u64::from(d - b'0'),
        None => tens,
    }
}
