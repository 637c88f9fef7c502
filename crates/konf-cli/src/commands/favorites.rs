//! Favorites commands: list, toggle, view switch.

use std::io::Write;

use anyhow::{Result, bail};
use serde::Serialize;

use konf_core::{
    Reference, SessionKey, TimeBlock, TimelineItem, build_time_blocks, collect_items,
    find_connected_groups,
};
use konf_store::Database;

use crate::Config;
use crate::cli::ViewState;
use crate::commands::util;
use crate::render::{RenderContext, write_block};

#[derive(Debug, Serialize)]
struct DayFavorites {
    day_index: usize,
    date: String,
    blocks: Vec<TimeBlock>,
}

/// Collects one day's favorited sessions as timeline items.
fn favored_items(
    config: &Config,
    favorites: &std::collections::BTreeMap<String, usize>,
    day: &konf_core::Day,
    day_index: usize,
) -> Vec<TimelineItem> {
    let common_room = config.rooms.common_room(day_index);
    collect_items(day, &[], common_room)
        .into_iter()
        .filter(|item| match item {
            TimelineItem::Session(session) => {
                favorites.contains_key(&session.key().to_string())
            }
            TimelineItem::Break(_) => false,
        })
        .collect()
}

/// Lists favorites grouped by day, re-detecting connected groups among
/// them. Favorites pointing at sessions no longer in the document are
/// skipped.
pub fn list<W: Write>(writer: &mut W, config: &Config, db: &Database, json: bool) -> Result<()> {
    let doc = util::load_schedule(config)?;
    let favorites = db.favorites()?;

    let mut days = Vec::new();
    for (day_index, day) in doc.schedule.days.iter().enumerate() {
        let items = favored_items(config, &favorites, day, day_index);
        if items.is_empty() {
            continue;
        }
        let common_room = config.rooms.common_room(day_index);
        let grouping = find_connected_groups(&items, common_room);
        let blocks = build_time_blocks(&items, &grouping, config.rooms.order(day_index));
        days.push(DayFavorites {
            day_index,
            date: day.date.clone(),
            blocks,
        });
    }

    if json {
        serde_json::to_writer_pretty(&mut *writer, &days)?;
        writeln!(writer)?;
        return Ok(());
    }

    if days.is_empty() {
        writeln!(writer, "No favorites yet.")?;
        return Ok(());
    }

    let reference = Reference::now();
    for day in &days {
        writeln!(writer, "Day {} ({})", day.day_index + 1, day.date)?;
        let ctx = RenderContext {
            favorites: &favorites,
            day_date: &day.date,
            reference,
        };
        for block in &day.blocks {
            write_block(writer, block, &ctx)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Toggles a session's favorite state.
///
/// When the session belongs to a connected group, the whole group toggles
/// in one store transaction.
pub fn toggle<W: Write>(
    writer: &mut W,
    config: &Config,
    db: &mut Database,
    title: &str,
    start: &str,
    day_flag: Option<usize>,
) -> Result<()> {
    let doc = util::load_schedule(config)?;
    let key = SessionKey {
        title: title.to_string(),
        start: start.to_string(),
    };

    for (day_index, day) in doc.schedule.days.iter().enumerate() {
        if day_flag.is_some_and(|flag| flag != day_index) {
            continue;
        }
        let common_room = config.rooms.common_room(day_index);
        let items = collect_items(day, &[], common_room);
        let found = items.iter().any(|item| match item {
            TimelineItem::Session(session) => session.key() == key,
            TimelineItem::Break(_) => false,
        });
        if !found {
            continue;
        }

        let favored = !db.is_favorite(&key)?;
        let grouping = find_connected_groups(&items, common_room);
        let group = grouping
            .groups
            .iter()
            .find(|group| group.keys().any(|member| member == key));

        match group {
            Some(group) => {
                let keys: Vec<SessionKey> = group.keys().collect();
                db.set_group(&keys, day_index, favored)?;
                writeln!(
                    writer,
                    "{} {} connected session(s) on day {}",
                    if favored { "Favorited" } else { "Unfavorited" },
                    keys.len(),
                    day_index + 1
                )?;
            }
            None => {
                if favored {
                    db.add_favorite(&key, day_index)?;
                } else {
                    db.remove_favorite(&key)?;
                }
                writeln!(
                    writer,
                    "{} {key} on day {}",
                    if favored { "Favorited" } else { "Unfavorited" },
                    day_index + 1
                )?;
            }
        }
        return Ok(());
    }

    bail!("no session titled {title:?} starting at {start}");
}

/// Persists the favorites-view toggle.
pub fn view<W: Write>(writer: &mut W, db: &Database, state: ViewState) -> Result<()> {
    let enabled = state == ViewState::On;
    db.set_favorites_view(enabled)?;
    writeln!(
        writer,
        "Favorites view {}",
        if enabled { "on" } else { "off" }
    )?;
    Ok(())
}
