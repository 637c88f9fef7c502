//! Days command: list the schedule's days.

use std::io::Write;

use anyhow::Result;

use konf_store::Database;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config, db: &Database) -> Result<()> {
    let doc = util::load_schedule(config)?;
    let active = db.active_day()?;

    for (index, day) in doc.schedule.days.iter().enumerate() {
        let session_count: usize = day
            .tracks
            .iter()
            .map(|track| track.sessions.len())
            .sum::<usize>()
            + day.common_sessions.len();
        let marker = if index == active { "*" } else { " " };
        writeln!(
            writer,
            "{marker} {index}: {}  ({} rooms, {session_count} sessions, {} breaks)",
            day.date,
            day.tracks.len(),
            day.breaks.len()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_listing() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            schedule_path: temp.path().join("schedule.yaml"),
            ..Config::default()
        };
        std::fs::write(
            &config.schedule_path,
            "
schedule:
  days:
    - date: \"2025-04-09\"
      breaks:
        - title: Lunsj
          start: \"11:30\"
          end: \"12:15\"
      commonSessions:
        - title: Velkommen
          start: \"09:00\"
          end: \"09:30\"
      tracks:
        - room: Arena
          sessions:
            - title: Talk
              start: \"10:00\"
              end: \"10:30\"
    - date: \"2025-04-10\"
",
        )
        .unwrap();
        let db = Database::open_in_memory().unwrap();
        db.set_active_day(1).unwrap();

        let mut out = Vec::new();
        run(&mut out, &config, &db).unwrap();
        let out = String::from_utf8(out).unwrap();

        insta::assert_snapshot!(out, @r"
          0: 2025-04-09  (1 rooms, 2 sessions, 1 breaks)
        * 1: 2025-04-10  (0 rooms, 0 sessions, 0 breaks)
        ");
    }
}
