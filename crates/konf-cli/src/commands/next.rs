//! Next command: the "what's starting next" window.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use konf_core::{SessionItem, by_room, time, upcoming_window};
use konf_store::Database;

use crate::Config;
use crate::commands::util;
use crate::render::{RenderContext, write_session};

/// How often `--watch` re-evaluates the window.
const WATCH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct RoomWindow {
    room: String,
    sessions: Vec<SessionItem>,
}

pub struct NextArgs<'a> {
    pub day: Option<usize>,
    pub at: Option<&'a str>,
    pub watch: bool,
    pub json: bool,
}

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    db: &Database,
    args: &NextArgs<'_>,
) -> Result<()> {
    let doc = util::load_schedule(config)?;
    let day_index = util::resolve_day(db, &doc, args.day)?;
    let day = &doc.schedule.days[day_index];
    let common_room = config.rooms.common_room(day_index);

    loop {
        let reference = util::resolve_reference(config, args.at)?;
        let window = upcoming_window(day, common_room, reference);
        let favorites = db.favorites()?;

        if args.json {
            let rooms: Vec<RoomWindow> = by_room(&window)
                .into_iter()
                .map(|(room, sessions)| RoomWindow { room, sessions })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &rooms)?;
            writeln!(writer)?;
        } else if window.is_empty() {
            writeln!(writer, "Nothing further starts on day {}.", day_index + 1)?;
        } else {
            let first_start = &window[0].session.start;
            writeln!(
                writer,
                "Starting {} or shortly after:",
                time::to_display(first_start)
            )?;
            let ctx = RenderContext {
                favorites: &favorites,
                day_date: &day.date,
                reference,
            };
            for (room, sessions) in by_room(&window) {
                writeln!(writer)?;
                writeln!(writer, "{room} ({})", sessions.len())?;
                for session in &sessions {
                    write_session(writer, session, false, "", &ctx)?;
                }
            }
        }

        if !args.watch {
            return Ok(());
        }
        writer.flush()?;
        std::thread::sleep(WATCH_INTERVAL);
        writeln!(writer)?;
        writeln!(writer, "---")?;
    }
}
