//! Status command: configuration, cache and store state.

use std::io::Write;

use anyhow::Result;

use konf_core::parse_document;
use konf_store::Database;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, db: &Database) -> Result<()> {
    writeln!(writer, "Schedule viewer status")?;
    writeln!(writer, "Schedule URL: {}", config.schedule_url)?;
    writeln!(writer, "Cache: {}", config.schedule_path.display())?;

    if config.schedule_path.exists() {
        match std::fs::read_to_string(&config.schedule_path)
            .map_err(anyhow::Error::from)
            .and_then(|text| Ok(parse_document(&text)?))
        {
            Ok(doc) => writeln!(writer, "Cached days: {}", doc.schedule.days.len())?,
            Err(err) => writeln!(writer, "Cached document is invalid: {err}")?,
        }
    } else {
        writeln!(writer, "Cached days: none (run `konf fetch`)")?;
    }

    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(writer, "Favorites: {}", db.favorites()?.len())?;
    writeln!(writer, "Active day: {}", db.active_day()?)?;
    writeln!(
        writer,
        "Favorites view: {}",
        if db.favorites_view()? { "on" } else { "off" }
    )?;
    Ok(())
}
