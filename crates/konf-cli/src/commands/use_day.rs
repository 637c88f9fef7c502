//! Use-day command: persist the active day index.

use std::io::Write;

use anyhow::{Result, bail};

use konf_store::Database;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config, db: &Database, day: usize) -> Result<()> {
    let doc = util::load_schedule(config)?;
    let day_count = doc.schedule.days.len();
    if day >= day_count {
        bail!("day {day} is out of range, the schedule has {day_count} day(s)");
    }
    db.set_active_day(day)?;
    writeln!(
        writer,
        "Active day is now {day} ({})",
        doc.schedule.days[day].date
    )?;
    Ok(())
}
