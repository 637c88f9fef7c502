//! Shared helpers for commands.

use anyhow::{Context, Result, bail};

use konf_core::{Reference, ScheduleDoc, parse_document};
use konf_store::Database;

use crate::Config;

/// Longest payload excerpt shown when a document fails to parse.
const SNIPPET_LEN: usize = 1000;

/// Loads the cached schedule document.
pub fn load_schedule(config: &Config) -> Result<ScheduleDoc> {
    let path = &config.schedule_path;
    if !path.exists() {
        bail!(
            "no cached schedule at {} - run `konf fetch` first",
            path.display()
        );
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&text).map_err(|err| {
        anyhow::anyhow!(
            "{err}\n\nFirst part of the cached payload:\n{}",
            snippet(&text)
        )
    })
}

/// Truncates a payload for inline inspection.
#[must_use]
pub fn snippet(text: &str) -> &str {
    if text.len() <= SNIPPET_LEN {
        return text;
    }
    let mut end = SNIPPET_LEN;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Resolves the reference instant, honoring `--at` only when configured.
pub fn resolve_reference(config: &Config, at: Option<&str>) -> Result<Reference> {
    match at {
        None => Ok(Reference::now()),
        Some(value) => {
            if !config.allow_time_override {
                bail!(
                    "time override is disabled - set `allow_time_override = true` \
                     (or KONF_ALLOW_TIME_OVERRIDE=true) to use --at"
                );
            }
            Ok(Reference::parse(value)?)
        }
    }
}

/// Resolves the day index: the flag if given, the persisted one otherwise.
pub fn resolve_day(db: &Database, doc: &ScheduleDoc, flag: Option<usize>) -> Result<usize> {
    let day_count = doc.schedule.days.len();
    let index = match flag {
        Some(index) => index,
        None => db.active_day()?,
    };
    if index >= day_count {
        bail!("day {index} is out of range, the schedule has {day_count} day(s)");
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_override(allowed: bool) -> Config {
        Config {
            allow_time_override: allowed,
            ..Config::default()
        }
    }

    #[test]
    fn test_resolve_reference_rejects_override_when_disabled() {
        let result = resolve_reference(&config_with_override(false), Some("2025-04-09T10:00"));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_reference_honors_override_when_enabled() {
        let reference =
            resolve_reference(&config_with_override(true), Some("2025-04-09T10:00")).unwrap();
        assert_eq!(reference.minutes, 600);
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let text = "ø".repeat(1200);
        let cut = snippet(&text);
        assert!(cut.len() <= 1000);
        assert!(std::str::from_utf8(cut.as_bytes()).is_ok());
    }

    #[test]
    fn test_resolve_day_out_of_range() {
        let db = Database::open_in_memory().unwrap();
        let doc = parse_document("schedule:\n  days:\n    - date: \"2025-04-09\"\n").unwrap();
        assert_eq!(resolve_day(&db, &doc, None).unwrap(), 0);
        assert!(resolve_day(&db, &doc, Some(2)).is_err());
    }
}
