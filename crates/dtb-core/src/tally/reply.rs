use super::aggregate::Tally;

pub const FORMAT_HINT: &str = "Use formats like 4.50, 4:50, 4h50 or 4";

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Render a tally as the chat reply.
///
/// `Total: 8 hours 35 minutes (08:35)`, followed by a `Couldn't parse:` line
/// when some tokens were rejected.
pub fn format_reply(tally: &Tally) -> String {
    let hours = tally.hours();
    let minutes = tally.remaining_minutes();

    let mut reply = format!(
        "Total: {hours} hour{} {minutes} minute{} ({hours:02}:{minutes:02})",
        plural(hours),
        plural(minutes),
    );

    if !tally.parse_errors.is_empty() {
        reply.push_str(&format!(
            "\nCouldn't parse: {}. {FORMAT_HINT}",
            tally.parse_errors.join(", ")
        ));
    }

    reply
}

/// Text for `/start` and `/help`.
pub fn usage_text() -> String {
    [
        "Send me a list of durations and I'll add them up.",
        "",
        "Accepted formats:",
        "  4:50  hours and minutes",
        "  4h50  same, with an h",
        "  4.50  dot notation (4.5 means 4h50)",
        "  4     whole hours",
        "",
        "Separate entries with spaces, commas or +, e.g. 4.50 + 1:15, 2h30",
    ]
    .join("\n")
}
