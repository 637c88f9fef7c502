//! Timeline item collection.
//!
//! Flattens a day's room tracks, common sessions and breaks into one uniform
//! list of timed items, the working unit for grouping and block assembly.
//! Items are derived on every render pass and never persisted.

use serde::Serialize;

use crate::schedule::{Break, Day, Session, SessionKey};
use crate::time;

/// Room name used when a track has an empty room field.
const UNKNOWN_ROOM: &str = "Unknown";

/// A session with its resolved room and numeric minute offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionItem {
    pub session: Session,
    /// Resolved room: the track room, or the day's sentinel room for common
    /// sessions without an explicit room of their own.
    pub room: String,
    /// True for sessions attended from every room simultaneously.
    pub is_common: bool,
    pub start_min: u32,
    pub end_min: u32,
}

impl SessionItem {
    #[must_use]
    pub fn key(&self) -> SessionKey {
        self.session.key()
    }
}

/// A break with numeric minute offsets. Breaks carry no room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakItem {
    pub title: String,
    pub start: String,
    pub end: String,
    pub start_min: u32,
    pub end_min: u32,
}

/// One entry in the flattened day timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineItem {
    Session(SessionItem),
    Break(BreakItem),
}

impl TimelineItem {
    #[must_use]
    pub const fn start_min(&self) -> u32 {
        match self {
            Self::Session(session) => session.start_min,
            Self::Break(break_item) => break_item.start_min,
        }
    }

    /// The raw start token, for display labels.
    #[must_use]
    pub fn start_token(&self) -> &str {
        match self {
            Self::Session(session) => &session.session.start,
            Self::Break(break_item) => &break_item.start,
        }
    }

    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break(_))
    }
}

fn session_item(session: &Session, room: String, is_common: bool) -> SessionItem {
    SessionItem {
        start_min: time::to_minutes(&session.start),
        end_min: time::to_minutes(&session.end),
        session: session.clone(),
        room,
        is_common,
    }
}

fn break_item(break_record: &Break) -> BreakItem {
    BreakItem {
        title: break_record.title.clone(),
        start: break_record.start.clone(),
        end: break_record.end.clone(),
        start_min: time::to_minutes(&break_record.start),
        end_min: time::to_minutes(&break_record.end),
    }
}

/// Collects a day's sessions plus the given breaks into a flat item list.
///
/// `common_room` is the day's sentinel room; common sessions resolve there
/// unless they name a room of their own. Pure function of its inputs.
#[must_use]
pub fn collect_items(day: &Day, breaks: &[Break], common_room: &str) -> Vec<TimelineItem> {
    let mut items = Vec::new();

    for track in &day.tracks {
        let room = if track.room.is_empty() {
            UNKNOWN_ROOM
        } else {
            track.room.as_str()
        };
        for session in &track.sessions {
            items.push(TimelineItem::Session(session_item(
                session,
                room.to_string(),
                false,
            )));
        }
    }

    for session in &day.common_sessions {
        let room = session
            .room
            .clone()
            .unwrap_or_else(|| common_room.to_string());
        items.push(TimelineItem::Session(session_item(session, room, true)));
    }

    for break_record in breaks {
        items.push(TimelineItem::Break(break_item(break_record)));
    }

    items
}

/// Breaks split into the buckets used by the per-room view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPartition {
    /// Shown alongside the common sessions.
    pub common: Vec<Break>,
    /// Shown inside each room's timeline.
    pub room: Vec<Break>,
}

/// Partitions a day's breaks into common and room buckets.
///
/// A break is common when it starts before the earliest room session or at
/// or after the latest room-session end; breaks inside the room-session span
/// belong to the rooms. Days without room sessions classify every break as
/// common.
#[must_use]
pub fn split_breaks(day: &Day) -> BreakPartition {
    let session_minutes: Vec<(u32, u32)> = day
        .tracks
        .iter()
        .flat_map(|track| &track.sessions)
        .map(|session| {
            (
                time::to_minutes(&session.start),
                time::to_minutes(&session.end),
            )
        })
        .collect();

    let bounds = session_minutes.iter().fold(None, |bounds, &(start, end)| {
        Some(match bounds {
            None => (start, end),
            Some((earliest, latest)) => (start.min(earliest), end.max(latest)),
        })
    });

    let mut partition = BreakPartition {
        common: Vec::new(),
        room: Vec::new(),
    };
    for break_record in &day.breaks {
        let start = time::to_minutes(&break_record.start);
        let is_common = match bounds {
            None => true,
            Some((earliest_start, latest_end)) => start < earliest_start || start >= latest_end,
        };
        if is_common {
            partition.common.push(break_record.clone());
        } else {
            partition.room.push(break_record.clone());
        }
    }
    partition
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::schedule::{Break, Day, Session, Track};

    pub fn session(title: &str, start: &str, end: &str) -> Session {
        Session {
            title: title.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            speaker: None,
            kind: None,
            description: None,
            ingress: None,
            tag: None,
            teams: None,
            recording: None,
            room: None,
        }
    }

    pub fn break_record(title: &str, start: &str, end: &str) -> Break {
        Break {
            title: title.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn day(
        date: &str,
        breaks: Vec<Break>,
        common_sessions: Vec<Session>,
        tracks: Vec<Track>,
    ) -> Day {
        Day {
            date: date.to_string(),
            start: None,
            end: None,
            breaks,
            common_sessions,
            tracks,
        }
    }

    pub fn track(room: &str, sessions: Vec<Session>) -> Track {
        Track {
            room: room.to_string(),
            sessions,
        }
    }
}
