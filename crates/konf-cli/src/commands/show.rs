//! Show command: render a day's timeline.

use std::io::Write;

use anyhow::Result;

use konf_core::{Day, build_time_blocks, collect_items, find_connected_groups, split_breaks};
use konf_store::Database;

use crate::Config;
use crate::commands::{favorites, util};
use crate::render::{RenderContext, write_break, write_session};

pub struct ShowArgs<'a> {
    pub day: Option<usize>,
    pub at: Option<&'a str>,
    pub by_room: bool,
    pub json: bool,
}

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    db: &Database,
    args: &ShowArgs<'_>,
) -> Result<()> {
    // The persisted favorites-view toggle replaces the day schedule unless
    // the invocation pins down a concrete view.
    if args.day.is_none() && !args.by_room && db.favorites_view()? {
        return favorites::list(writer, config, db, args.json);
    }

    let doc = util::load_schedule(config)?;
    let day_index = util::resolve_day(db, &doc, args.day)?;
    let reference = util::resolve_reference(config, args.at)?;
    let day = &doc.schedule.days[day_index];

    let common_room = config.rooms.common_room(day_index);
    let items = collect_items(day, &day.breaks, common_room);
    let grouping = find_connected_groups(&items, common_room);
    let blocks = build_time_blocks(&items, &grouping, config.rooms.order(day_index));

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &blocks)?;
        writeln!(writer)?;
        return Ok(());
    }

    let favorites = db.favorites()?;
    let ctx = RenderContext {
        favorites: &favorites,
        day_date: &day.date,
        reference,
    };

    writeln!(writer, "Day {} ({})", day_index + 1, day.date)?;
    if blocks.is_empty() {
        writeln!(writer, "No schedule items found for this day.")?;
        return Ok(());
    }

    if args.by_room {
        write_by_room(writer, day, common_room, &ctx)?;
    } else {
        for block in &blocks {
            writeln!(writer)?;
            crate::render::write_block(writer, block, &ctx)?;
        }
    }
    Ok(())
}

/// The per-room variant: a common section plus one section per track, with
/// breaks split between them by the boundary heuristic.
fn write_by_room<W: Write>(
    writer: &mut W,
    day: &Day,
    common_room: &str,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    let partition = split_breaks(day);

    let mut common = collect_items(
        &Day {
            tracks: Vec::new(),
            ..day.clone()
        },
        &partition.common,
        common_room,
    );
    common.sort_by_key(konf_core::TimelineItem::start_min);
    if !common.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{common_room} (felles)")?;
        write_items(writer, &common, ctx)?;
    }

    for track in &day.tracks {
        writeln!(writer)?;
        writeln!(writer, "{}", track.room)?;
        if track.sessions.is_empty() {
            writeln!(writer, "  (no sessions in this room)")?;
            continue;
        }
        let track_day = Day {
            breaks: Vec::new(),
            common_sessions: Vec::new(),
            tracks: vec![track.clone()],
            ..day.clone()
        };
        let mut items = collect_items(&track_day, &partition.room, common_room);
        items.sort_by_key(konf_core::TimelineItem::start_min);
        write_items(writer, &items, ctx)?;
    }
    Ok(())
}

fn write_items<W: Write>(
    writer: &mut W,
    items: &[konf_core::TimelineItem],
    ctx: &RenderContext<'_>,
) -> Result<()> {
    for item in items {
        match item {
            konf_core::TimelineItem::Break(break_item) => write_break(writer, break_item, "")?,
            konf_core::TimelineItem::Session(session) => {
                write_session(writer, session, false, "", ctx)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use konf_core::time;

    #[test]
    fn test_block_labels_match_minutes() {
        let doc = konf_core::parse_document(
            "schedule:\n  days:\n    - date: \"2025-04-09\"\n      tracks:\n        - room: Arena\n          sessions:\n            - title: Talk\n              start: \"10:00\"\n              end: \"10:30\"\n",
        )
        .unwrap();
        let day = &doc.schedule.days[0];
        let items = collect_items(day, &day.breaks, "Arena");
        let grouping = find_connected_groups(&items, "Arena");
        let blocks = build_time_blocks(&items, &grouping, &[]);
        for block in &blocks {
            assert_eq!(time::to_minutes(&block.label), block.minute);
        }
    }
}
