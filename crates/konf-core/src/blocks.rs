//! Time-block assembly.
//!
//! Buckets a day's items by shared start minute into display-ordered blocks.
//! Sessions absorbed into connected groups are replaced by one placeholder
//! entry per group, so each block is self-contained and renders without any
//! cross-block state.

use serde::Serialize;

use crate::group::{ConnectedGroup, Grouping};
use crate::time;
use crate::timeline::{BreakItem, SessionItem, TimelineItem};

/// One renderable entry inside a time block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockEntry {
    Break(BreakItem),
    Session(SessionItem),
    Group(ConnectedGroup),
}

impl BlockEntry {
    #[must_use]
    pub fn start_min(&self) -> u32 {
        match self {
            Self::Break(break_item) => break_item.start_min,
            Self::Session(session) => session.start_min,
            Self::Group(group) => group.start_min(),
        }
    }

    fn start_token(&self) -> &str {
        match self {
            Self::Break(break_item) => &break_item.start,
            Self::Session(session) => &session.session.start,
            Self::Group(group) => group.start_token(),
        }
    }

    /// Tie-break rank within a block: breaks, then common sessions, then
    /// rooms in the configured priority order, then everything else in
    /// source order.
    fn rank(&self, room_order: &[String]) -> usize {
        match self {
            Self::Break(_) => 0,
            Self::Session(session) => session_rank(&session.room, session.is_common, room_order),
            Self::Group(group) => session_rank(&group.room, group.is_common, room_order),
        }
    }
}

fn session_rank(room: &str, is_common: bool, room_order: &[String]) -> usize {
    if is_common {
        return 1;
    }
    room_order
        .iter()
        .position(|candidate| candidate == room)
        .map_or(usize::MAX, |index| index + 2)
}

/// All items sharing one start minute, with a display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBlock {
    pub minute: u32,
    /// Display form of the first entry's start token.
    pub label: String,
    pub entries: Vec<BlockEntry>,
}

/// Assembles display-ordered time blocks from a day's items and grouping.
///
/// Blocks come out in non-decreasing minute order; within a block, breaks
/// precede common sessions, which precede room sessions in priority order.
#[must_use]
pub fn build_time_blocks(
    items: &[TimelineItem],
    grouping: &Grouping,
    room_order: &[String],
) -> Vec<TimeBlock> {
    let mut entries: Vec<BlockEntry> = Vec::new();
    for item in items {
        match item {
            TimelineItem::Break(break_item) => entries.push(BlockEntry::Break(break_item.clone())),
            TimelineItem::Session(session) => {
                if !grouping.absorbed.contains(&session.key()) {
                    entries.push(BlockEntry::Session(session.clone()));
                }
            }
        }
    }
    entries.extend(grouping.groups.iter().cloned().map(BlockEntry::Group));

    entries.sort_by_key(|entry| (entry.start_min(), entry.rank(room_order)));

    let mut blocks: Vec<TimeBlock> = Vec::new();
    for entry in entries {
        match blocks.last_mut() {
            Some(block) if block.minute == entry.start_min() => block.entries.push(entry),
            _ => blocks.push(TimeBlock {
                minute: entry.start_min(),
                label: time::to_display(entry.start_token()),
                entries: vec![entry],
            }),
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::find_connected_groups;
    use crate::timeline::collect_items;
    use crate::timeline::fixtures::{break_record, day, session, track};

    fn entry_name(entry: &BlockEntry) -> String {
        match entry {
            BlockEntry::Break(b) => format!("break:{}", b.title),
            BlockEntry::Session(s) => format!("session:{}", s.session.title),
            BlockEntry::Group(g) => format!(
                "group:{}",
                g.sessions
                    .iter()
                    .map(|s| s.session.title.as_str())
                    .collect::<Vec<_>>()
                    .join("+")
            ),
        }
    }

    #[test]
    fn test_blocks_in_nondecreasing_order_breaks_first() {
        let day = day(
            "2025-04-09",
            vec![break_record("Pause", "10:00", "10:15")],
            vec![],
            vec![
                track("X", vec![session("In X", "10:00", "10:30")]),
                track("Y", vec![session("In Y", "09:00", "09:45")]),
            ],
        );
        let items = collect_items(&day, &day.breaks, "Felles");
        let grouping = find_connected_groups(&items, "Felles");
        let blocks = build_time_blocks(&items, &grouping, &[]);

        let minutes: Vec<u32> = blocks.iter().map(|b| b.minute).collect();
        assert_eq!(minutes, [540, 600]);
        assert!(minutes.windows(2).all(|pair| pair[0] <= pair[1]));

        let names: Vec<String> = blocks[1].entries.iter().map(entry_name).collect();
        assert_eq!(names, ["break:Pause", "session:In X"]);
        assert_eq!(blocks[1].label, "10:00");
    }

    #[test]
    fn test_connected_group_collapses_to_single_entry() {
        let day = day(
            "2025-04-09",
            vec![],
            vec![],
            vec![track(
                "Arena",
                vec![
                    session("A", "10:00", "10:30"),
                    session("B", "10:30", "11:00"),
                ],
            )],
        );
        let items = collect_items(&day, &[], "Felles");
        let grouping = find_connected_groups(&items, "Felles");
        let blocks = build_time_blocks(&items, &grouping, &[]);

        // One block at 10:00 holding the group; no block at 10:30.
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].minute, 600);
        assert_eq!(entry_name(&blocks[0].entries[0]), "group:A+B");
    }

    #[test]
    fn test_tie_break_common_then_room_priority() {
        let day = day(
            "2025-04-09",
            vec![break_record("Kaffe", "10:00", "10:10")],
            vec![session("Plenary", "10:00", "10:45")],
            vec![
                track("Landegode", vec![session("Low", "10:00", "10:30")]),
                track("Klasserom", vec![session("High", "10:00", "10:30")]),
                track("Ukjent rom", vec![session("Stray", "10:00", "10:30")]),
            ],
        );
        let items = collect_items(&day, &day.breaks, "Arena");
        let grouping = find_connected_groups(&items, "Arena");
        let order = ["Arena", "Klasserom", "Kantina", "Landegode"].map(String::from);
        let blocks = build_time_blocks(&items, &grouping, &order);

        assert_eq!(blocks.len(), 1);
        let names: Vec<String> = blocks[0].entries.iter().map(entry_name).collect();
        assert_eq!(
            names,
            [
                "break:Kaffe",
                "session:Plenary",
                "session:High",
                "session:Low",
                "session:Stray",
            ]
        );
    }

    #[test]
    fn test_unlisted_rooms_keep_source_order() {
        let day = day(
            "2025-04-09",
            vec![],
            vec![],
            vec![
                track("Zulu", vec![session("First", "10:00", "10:30")]),
                track("Alpha", vec![session("Second", "10:00", "10:30")]),
            ],
        );
        let items = collect_items(&day, &[], "Felles");
        let grouping = find_connected_groups(&items, "Felles");
        let blocks = build_time_blocks(&items, &grouping, &[]);

        let names: Vec<String> = blocks[0].entries.iter().map(entry_name).collect();
        assert_eq!(names, ["session:First", "session:Second"]);
    }

    #[test]
    fn test_label_uses_display_form_of_start_token() {
        let day = day(
            "2025-04-09",
            vec![],
            vec![],
            vec![track(
                "Arena",
                vec![session("Legacy", "2025-04-09:10.30", "2025-04-09:11.00")],
            )],
        );
        let items = collect_items(&day, &[], "Felles");
        let grouping = find_connected_groups(&items, "Felles");
        let blocks = build_time_blocks(&items, &grouping, &[]);

        assert_eq!(blocks[0].label, "10:30");
    }
}
