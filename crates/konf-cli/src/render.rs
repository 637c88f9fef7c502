//! Text rendering of schedule items.
//!
//! One set of card renderers shared by the timeline, per-room, favorites
//! and upcoming views, so every surface formats a session the same way.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;

use konf_core::{
    BlockEntry, ConnectedGroup, Reference, SessionItem, TimeBlock, is_completed, time,
    timeline::BreakItem,
};

/// Per-render context: which sessions are favorites and what "now" is.
pub struct RenderContext<'a> {
    /// Favorites keyed by display form (`title-start`).
    pub favorites: &'a BTreeMap<String, usize>,
    /// The rendered day's date, for completion checks.
    pub day_date: &'a str,
    pub reference: Reference,
}

impl RenderContext<'_> {
    fn is_favorite(&self, item: &SessionItem) -> bool {
        self.favorites.contains_key(&item.key().to_string())
    }

    fn is_completed(&self, item: &SessionItem) -> bool {
        is_completed(self.day_date, &item.session.end, self.reference)
    }
}

/// Formats a start/end token pair for display.
#[must_use]
pub fn span(start: &str, end: &str) -> String {
    format!("{}-{}", time::to_display(start), time::to_display(end))
}

fn badges(item: &SessionItem) -> String {
    let mut out = String::new();
    if item.is_common {
        out.push_str("  {felles}");
    }
    if item.session.is_workshop() {
        out.push_str("  {workshop}");
    } else if item.session.kind.is_some() {
        out.push_str("  {foredrag}");
    }
    for tag in item.session.tags() {
        out.push_str("  #");
        out.push_str(tag);
    }
    out
}

/// One session card line plus optional link sub-line.
pub fn write_session<W: Write>(
    writer: &mut W,
    item: &SessionItem,
    show_room: bool,
    indent: &str,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    let star = if ctx.is_favorite(item) { "*" } else { " " };
    let room = if show_room {
        format!("[{}] ", item.room)
    } else {
        String::new()
    };
    let speaker = item
        .session
        .speaker
        .as_deref()
        .map(|speaker| format!("  {speaker}"))
        .unwrap_or_default();
    let done = if ctx.is_completed(item) {
        "  (completed)"
    } else {
        ""
    };
    writeln!(
        writer,
        "{indent}{star} {room}{}  {}{speaker}{}{done}",
        item.session.title,
        span(&item.session.start, &item.session.end),
        badges(item),
    )?;
    write_links(writer, item, indent)?;
    Ok(())
}

/// Outbound links, rendered as-is when present.
fn write_links<W: Write>(writer: &mut W, item: &SessionItem, indent: &str) -> Result<()> {
    if let Some(teams) = item.session.teams.as_deref() {
        writeln!(writer, "{indent}      teams: {teams}")?;
    }
    if let Some(recording) = item.session.recording.as_deref() {
        writeln!(writer, "{indent}      recording: {recording}")?;
    }
    Ok(())
}

pub fn write_break<W: Write>(
    writer: &mut W,
    item: &BreakItem,
    indent: &str,
) -> Result<()> {
    writeln!(
        writer,
        "{indent}  pause  {}  {}",
        item.title,
        span(&item.start, &item.end)
    )?;
    Ok(())
}

/// A connected group: header with the merged span, then the members.
pub fn write_group<W: Write>(
    writer: &mut W,
    group: &ConnectedGroup,
    show_room: bool,
    indent: &str,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    let room = if show_room {
        format!("[{}] ", group.room)
    } else {
        String::new()
    };
    writeln!(
        writer,
        "{indent}  {room}connected  {}-{}",
        time::format_minutes(group.start_min()),
        time::format_minutes(group.end_min()),
    )?;
    for session in &group.sessions {
        write_session(writer, session, false, &format!("{indent}  "), ctx)?;
    }
    Ok(())
}

/// A full time block: label header, then entries in assembler order.
pub fn write_block<W: Write>(
    writer: &mut W,
    block: &TimeBlock,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    writeln!(writer, "{}", block.label)?;
    for entry in &block.entries {
        match entry {
            BlockEntry::Break(item) => write_break(writer, item, "")?,
            BlockEntry::Session(item) => write_session(writer, item, true, "", ctx)?,
            BlockEntry::Group(group) => write_group(writer, group, true, "", ctx)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use konf_core::{Session, collect_items, find_connected_groups, build_time_blocks};
    use konf_core::schedule::{Break, Day, Track};

    fn fixture_day() -> Day {
        Day {
            date: "2025-04-09".to_string(),
            start: None,
            end: None,
            breaks: vec![Break {
                title: "Kaffe".to_string(),
                start: "10:00".to_string(),
                end: "10:10".to_string(),
            }],
            common_sessions: vec![],
            tracks: vec![Track {
                room: "Arena".to_string(),
                sessions: vec![
                    Session {
                        title: "Talk A".to_string(),
                        start: "10:00".to_string(),
                        end: "10:30".to_string(),
                        speaker: Some("Kari Nordmann".to_string()),
                        kind: Some("workshop".to_string()),
                        description: None,
                        ingress: None,
                        tag: Some("frontend".to_string()),
                        teams: Some("https://teams.example/1".to_string()),
                        recording: None,
                        room: None,
                    },
                    Session {
                        title: "Talk B".to_string(),
                        start: "10:30".to_string(),
                        end: "11:00".to_string(),
                        speaker: None,
                        kind: None,
                        description: None,
                        ingress: None,
                        tag: None,
                        teams: None,
                        recording: None,
                        room: None,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_render_blocks_snapshot() {
        let day = fixture_day();
        let items = collect_items(&day, &day.breaks, "Arena");
        let grouping = find_connected_groups(&items, "Arena");
        let blocks = build_time_blocks(&items, &grouping, &["Arena".to_string()]);

        let mut favorites = BTreeMap::new();
        favorites.insert("Talk A-10:00".to_string(), 0);
        let ctx = RenderContext {
            favorites: &favorites,
            day_date: "2025-04-09",
            reference: Reference::parse("2025-04-09T10:45").unwrap(),
        };

        let mut out = Vec::new();
        for block in &blocks {
            write_block(&mut out, block, &ctx).unwrap();
        }
        let out = String::from_utf8(out).unwrap();

        insta::assert_snapshot!(out, @r"
        10:00
          pause  Kaffe  10:00-10:10
          [Arena] connected  10:00-11:00
          * Talk A  10:00-10:30  Kari Nordmann  {workshop}  #frontend  (completed)
                teams: https://teams.example/1
            Talk B  10:30-11:00
        ");
    }
}
