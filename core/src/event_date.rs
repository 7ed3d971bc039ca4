//! Event date extraction from topic titles.
//!
//! A topic is an event iff its title contains a `YYYY-MM-DD` date followed
//! by a non-alphanumeric separator (end of title counts as one). An
//! optional ` HH:MM` time component may follow the date, itself optionally
//! followed by a `±HH:MM` offset. Without a time component the event is
//! taken to end at the start of the *following* day, so a bare date parses
//! to next-day midnight; callers computing "time until event" subtract the
//! current instant from that.
//!
//! All parsing lives here as pure functions. Request handlers never touch
//! title text themselves.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Sentinel returned by [`seconds_to_event`] when the title is not an
/// event or fails to parse. Call sites treat this identically to "event
/// not found", not as "event already passed"; the two are distinguished
/// via [`is_event`].
pub const NOT_AN_EVENT: i64 = -1;

/// Result of parsing a topic title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventInfo {
    /// The title carries no recognizable event date.
    NotAnEvent,
    /// The title names an event starting at this instant.
    Scheduled {
        /// Event start, normalized to UTC.
        start: DateTime<Utc>,
    },
}

impl EventInfo {
    /// Whether the title parsed as an event.
    #[must_use]
    pub const fn is_event(&self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }

    /// The event start instant, if any.
    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Scheduled { start } => Some(*start),
            Self::NotAnEvent => None,
        }
    }
}

/// Parse an event start instant out of a topic title.
///
/// The first `YYYY-MM-DD`-shaped substring with a valid separator boundary
/// is taken; if it is not a real calendar date the title is not an event
/// (there is no second scan).
#[must_use]
pub fn parse(title: &str) -> EventInfo {
    let bytes = title.as_bytes();
    let Some(at) = find_date_candidate(bytes) else {
        return EventInfo::NotAnEvent;
    };

    let year = i32::try_from(number(bytes, at, 4)).unwrap_or(0);
    let month = number(bytes, at + 5, 2);
    let day = number(bytes, at + 8, 2);
    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return EventInfo::NotAnEvent;
    };

    let rest = &bytes[at + 10..];
    let start = match scan_time(rest) {
        // Bare date: the event occupies the following calendar day's start,
        // i.e. midnight plus 24 hours.
        None => date
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN).and_utc()),
        Some((hour, minute, consumed)) => {
            let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                return EventInfo::NotAnEvent;
            };
            let naive = date.and_time(time);
            match scan_offset(&rest[consumed..]) {
                None => Some(naive.and_utc()),
                Some(offset_seconds) => FixedOffset::east_opt(offset_seconds)
                    .and_then(|offset| naive.and_local_timezone(offset).single())
                    .map(|dt| dt.with_timezone(&Utc)),
            }
        }
    };

    match start {
        Some(start) => EventInfo::Scheduled { start },
        None => EventInfo::NotAnEvent,
    }
}

/// Whether a title names an event at all.
#[must_use]
pub fn is_event(title: &str) -> bool {
    parse(title).is_event()
}

/// Seconds from `now` until the event named by `title`.
///
/// Returns [`NOT_AN_EVENT`] when the title is not an event or fails to
/// parse. Negative iff the computed start instant is before `now`.
#[must_use]
pub fn seconds_to_event_at(title: &str, now: DateTime<Utc>) -> i64 {
    match parse(title) {
        EventInfo::Scheduled { start } => (start - now).num_seconds(),
        EventInfo::NotAnEvent => NOT_AN_EVENT,
    }
}

/// Seconds from the current instant until the event named by `title`.
#[must_use]
pub fn seconds_to_event(title: &str) -> i64 {
    seconds_to_event_at(title, Utc::now())
}

/// First index where a `YYYY-MM-DD` shape sits on a valid boundary.
fn find_date_candidate(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 10 {
        return None;
    }
    (0..=bytes.len() - 10)
        .find(|&i| is_date_shape(&bytes[i..i + 10]) && is_boundary(bytes.get(i + 10)))
}

fn is_date_shape(b: &[u8]) -> bool {
    b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// A separator boundary: end of title, or anything that is not an ASCII
/// letter or digit.
fn is_boundary(byte: Option<&u8>) -> bool {
    byte.is_none_or(|b| !b.is_ascii_alphanumeric())
}

fn number(bytes: &[u8], at: usize, len: usize) -> u32 {
    bytes[at..at + len]
        .iter()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Scan a ` HH:MM` time component directly after the date. Returns
/// `(hour, minute, bytes consumed)`.
fn scan_time(rest: &[u8]) -> Option<(u32, u32, usize)> {
    if rest.len() < 6 || rest[0] != b' ' {
        return None;
    }
    let t = &rest[1..6];
    if !(t[0].is_ascii_digit() && t[1].is_ascii_digit() && t[2] == b':' && t[3].is_ascii_digit() && t[4].is_ascii_digit())
    {
        return None;
    }
    // A trailing digit would mean we matched inside a longer number.
    if rest.get(6).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    Some((number(rest, 1, 2), number(rest, 4, 2), 6))
}

/// Scan an optional `±HH:MM` offset, with at most one leading space.
/// Returns the offset in seconds east of UTC.
fn scan_offset(rest: &[u8]) -> Option<i32> {
    let rest = rest.strip_prefix(b" ").unwrap_or(rest);
    if rest.len() < 6 {
        return None;
    }
    let sign = match rest[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let t = &rest[1..6];
    if !(t[0].is_ascii_digit() && t[1].is_ascii_digit() && t[2] == b':' && t[3].is_ascii_digit() && t[4].is_ascii_digit())
    {
        return None;
    }
    let hours = i32::try_from(number(rest, 1, 2)).ok()?;
    let minutes = i32::try_from(number(rest, 4, 2)).ok()?;
    Some(sign * (hours * 3600 + minutes * 60))
}
