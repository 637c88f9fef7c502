//! Core domain logic for the conference schedule viewer.
//!
//! This crate contains the fundamental types and logic for:
//! - Schedule document: the immutable day/track/session/break model
//! - Consolidation: collecting timeline items, grouping back-to-back
//!   sessions and assembling display-ordered time blocks
//! - Completion and the upcoming-session window against a reference instant

pub mod blocks;
pub mod group;
pub mod rooms;
pub mod schedule;
pub mod time;
pub mod timeline;
pub mod when;

pub use blocks::{BlockEntry, TimeBlock, build_time_blocks};
pub use group::{ConnectedGroup, Grouping, find_connected_groups};
pub use rooms::{DayRooms, RoomPlan};
pub use schedule::{
    Break, Day, DocumentError, Schedule, ScheduleDoc, Session, SessionKey, Track, parse_document,
};
pub use timeline::{BreakPartition, SessionItem, TimelineItem, collect_items, split_breaks};
pub use when::{Reference, ReferenceError, by_room, is_completed, upcoming_window};
