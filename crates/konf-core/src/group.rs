//! Connected-session grouping.
//!
//! Back-to-back sessions in the same room merge into a single display unit.
//! Within each room, the earliest unclaimed session seeds a group which is
//! then extended greedily: the pool is rescanned from the front after every
//! match, so chains assemble even when the pool is not in chain order.
//! Quadratic per room, which is fine at event scale.

use std::collections::HashSet;

use serde::Serialize;

use crate::schedule::SessionKey;
use crate::timeline::{SessionItem, TimelineItem};

/// An ordered run of back-to-back sessions in one room.
///
/// Always holds at least two sessions; singletons are never grouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectedGroup {
    pub room: String,
    pub is_common: bool,
    pub sessions: Vec<SessionItem>,
}

impl ConnectedGroup {
    #[must_use]
    pub fn start_min(&self) -> u32 {
        self.sessions.first().map_or(0, |s| s.start_min)
    }

    #[must_use]
    pub fn end_min(&self) -> u32 {
        self.sessions.last().map_or(0, |s| s.end_min)
    }

    /// The raw start token of the first session, for display labels.
    #[must_use]
    pub fn start_token(&self) -> &str {
        self.sessions
            .first()
            .map_or("", |s| s.session.start.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = SessionKey> + '_ {
        self.sessions.iter().map(SessionItem::key)
    }
}

/// The grouper's output: the groups plus the keys they absorbed.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub groups: Vec<ConnectedGroup>,
    /// Keys of every session that ended up inside a group.
    pub absorbed: HashSet<SessionKey>,
}

/// Finds connected session groups across a day's timeline items.
///
/// `common_room` is the day's sentinel room: there, two sessions only chain
/// when they share the same `is_common` flag, so a common plenary never
/// merges with a track session that happens to play in the same hall.
#[must_use]
pub fn find_connected_groups(items: &[TimelineItem], common_room: &str) -> Grouping {
    let mut rooms: Vec<(&str, Vec<&SessionItem>)> = Vec::new();
    for item in items {
        let TimelineItem::Session(session) = item else {
            continue;
        };
        match rooms.iter_mut().find(|(room, _)| *room == session.room) {
            Some((_, sessions)) => sessions.push(session),
            None => rooms.push((session.room.as_str(), vec![session])),
        }
    }

    let mut grouping = Grouping::default();
    for (room, mut pool) in rooms {
        if pool.len() < 2 {
            continue;
        }
        let flag_must_match = room == common_room;
        pool.sort_by_key(|session| session.start_min);

        while !pool.is_empty() {
            let mut group = vec![pool.remove(0)];
            loop {
                let tail = group.last().map_or(0, |s| s.end_min);
                let tail_common = group.last().is_some_and(|s| s.is_common);
                let next = pool.iter().position(|candidate| {
                    candidate.start_min == tail
                        && (!flag_must_match || candidate.is_common == tail_common)
                });
                match next {
                    Some(index) => group.push(pool.remove(index)),
                    None => break,
                }
            }

            if group.len() > 1 {
                grouping
                    .absorbed
                    .extend(group.iter().map(|session| session.key()));
                grouping.groups.push(ConnectedGroup {
                    room: room.to_string(),
                    is_common: group[0].is_common,
                    sessions: group.into_iter().cloned().collect(),
                });
            }
        }
    }

    grouping
}
