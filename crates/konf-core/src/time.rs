//! Time token parsing and formatting.
//!
//! Schedule documents carry session times as wall-clock tokens for the
//! single event timezone. Two token shapes occur in the wild:
//! - plain `"HH:MM"` (also `"H:MM"`),
//! - a legacy compound `"<YYYY-MM-DD>:<HH>.<MM>"` form from an earlier
//!   document revision.
//!
//! Malformed tokens never abort a render pass: parsing degrades to `0`
//! (midnight) for ordering purposes and formatting returns the original
//! string, with a warning logged either way.

/// Parses a time token into minutes since midnight.
///
/// Unparseable input yields `0` so a single bad record cannot block the
/// whole schedule.
#[must_use]
pub fn to_minutes(token: &str) -> u32 {
    match parse_minutes(token) {
        Some(minutes) => minutes,
        None => {
            tracing::warn!(token, "unparseable time token, treating as midnight");
            0
        }
    }
}

/// Formats a time token as `"HH:MM"` for display.
///
/// Plain `"HH:MM"` tokens pass through unchanged; the legacy compound form
/// is re-formatted; anything else is returned as-is.
#[must_use]
pub fn to_display(token: &str) -> String {
    if is_plain_clock(token) {
        return token.to_string();
    }
    if let Some((hours, minutes)) = parse_compound(token) {
        return format!("{hours:02}:{minutes:02}");
    }
    tracing::warn!(token, "unparseable time token, displaying verbatim");
    token.to_string()
}

/// Formats minutes since midnight as a zero-padded `"HH:MM"` string.
///
/// Inverse of [`to_minutes`] for valid `"HH:MM"` tokens.
#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn parse_minutes(token: &str) -> Option<u32> {
    if let Some((hours, minutes)) = parse_plain(token) {
        return Some(hours * 60 + minutes);
    }
    parse_compound(token).map(|(hours, minutes)| hours * 60 + minutes)
}

/// `"HH:MM"` or `"H:MM"`.
fn parse_plain(token: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = token.split_once(':')?;
    parse_clock_pair(hours, minutes)
}

/// Legacy `"<YYYY-MM-DD>:<HH>.<MM>"`, e.g. `"2025-04-09:10.30"`.
fn parse_compound(token: &str) -> Option<(u32, u32)> {
    let (date, clock) = token.split_once(':')?;
    if date.len() != 10 || !date.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return None;
    }
    let (hours, minutes) = clock.split_once('.')?;
    parse_clock_pair(hours, minutes)
}

fn parse_clock_pair(hours: &str, minutes: &str) -> Option<(u32, u32)> {
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    (hours < 24 && minutes < 60).then_some((hours, minutes))
}

fn is_plain_clock(token: &str) -> bool {
    parse_plain(token).is_some()
}
