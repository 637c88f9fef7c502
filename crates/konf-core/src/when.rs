//! Completion state and the "what's starting next" window.
//!
//! Both are evaluated against a reference instant that defaults to the
//! local clock but can be overridden, so the completed/upcoming states can
//! be exercised without waiting for real time to pass.

use chrono::{Local, NaiveDate, Timelike};
use thiserror::Error;

use crate::schedule::Day;
use crate::time;
use crate::timeline::{SessionItem, TimelineItem, collect_items};

/// Sessions starting within this many minutes of the earliest upcoming
/// start are part of the window. Not configurable.
const UPCOMING_WINDOW_MIN: u32 = 30;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("invalid reference instant {value:?}, expected YYYY-MM-DDTHH:MM")]
    Invalid { value: String },
}

/// A reference instant: a date plus minute-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub date: NaiveDate,
    pub minutes: u32,
}

impl Reference {
    /// The current local wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            date: now.date_naive(),
            minutes: now.hour() * 60 + now.minute(),
        }
    }

    /// Parses an override of the form `"YYYY-MM-DDTHH:MM"`.
    pub fn parse(value: &str) -> Result<Self, ReferenceError> {
        let invalid = || ReferenceError::Invalid {
            value: value.to_string(),
        };
        let (date, clock) = value.split_once('T').ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
        let (hours, minutes) = clock.split_once(':').ok_or_else(invalid)?;
        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        if hours >= 24 || minutes >= 60 {
            return Err(invalid());
        }
        Ok(Self {
            date,
            minutes: hours * 60 + minutes,
        })
    }
}

/// Whether a session has finished as of the reference instant.
///
/// True when the day's date is strictly before the reference date, or when
/// the dates match and the session end minute is strictly before the
/// reference minute. An unparseable day date is never completed.
#[must_use]
pub fn is_completed(day_date: &str, session_end: &str, reference: Reference) -> bool {
    let Ok(date) = NaiveDate::parse_from_str(day_date, "%Y-%m-%d") else {
        tracing::warn!(day_date, "unparseable day date, treating sessions as not completed");
        return false;
    };
    if date < reference.date {
        return true;
    }
    if date > reference.date {
        return false;
    }
    time::to_minutes(session_end) < reference.minutes
}

/// Collects the day's not-yet-started sessions that begin at or within 30
/// minutes after the earliest upcoming start.
///
/// Empty when nothing further starts today. Breaks are not part of the
/// window.
#[must_use]
pub fn upcoming_window(day: &Day, common_room: &str, reference: Reference) -> Vec<SessionItem> {
    let mut upcoming: Vec<SessionItem> = collect_items(day, &[], common_room)
        .into_iter()
        .filter_map(|item| match item {
            TimelineItem::Session(session) if session.start_min > reference.minutes => {
                Some(session)
            }
            _ => None,
        })
        .collect();
    upcoming.sort_by_key(|session| session.start_min);

    let Some(earliest) = upcoming.first().map(|session| session.start_min) else {
        return Vec::new();
    };
    upcoming.retain(|session| session.start_min <= earliest + UPCOMING_WINDOW_MIN);
    upcoming
}

/// Groups an upcoming window by resolved room, most sessions first.
///
/// Rooms with equal counts keep first-appearance order.
#[must_use]
pub fn by_room(window: &[SessionItem]) -> Vec<(String, Vec<SessionItem>)> {
    let mut rooms: Vec<(String, Vec<SessionItem>)> = Vec::new();
    for session in window {
        match rooms.iter_mut().find(|(room, _)| *room == session.room) {
            Some((_, sessions)) => sessions.push(session.clone()),
            None => rooms.push((session.room.clone(), vec![session.clone()])),
        }
    }
    rooms.sort_by_key(|(_, sessions)| std::cmp::Reverse(sessions.len()));
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::fixtures::{day, session, track};

    fn reference(value: &str) -> Reference {
        Reference::parse(value).unwrap()
    }

    #[test]
    fn test_reference_parse() {
        let r = reference("2025-04-09T14:31");
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2025, 4, 9).unwrap());
        assert_eq!(r.minutes, 871);
    }

    #[test]
    fn test_reference_parse_rejects_garbage() {
        assert!(Reference::parse("2025-04-09 14:31").is_err());
        assert!(Reference::parse("2025-04-09T25:00").is_err());
        assert!(Reference::parse("someday").is_err());
    }

    #[test]
    fn test_completion_boundaries() {
        // Session ending 14:30 on 2025-04-09.
        assert!(is_completed("2025-04-09", "14:30", reference("2025-04-09T14:31")));
        assert!(!is_completed("2025-04-09", "14:30", reference("2025-04-09T14:29")));
        // End minute equal to the reference minute is not yet completed.
        assert!(!is_completed("2025-04-09", "14:30", reference("2025-04-09T14:30")));
    }

    #[test]
    fn test_completion_across_days() {
        assert!(is_completed("2025-04-09", "14:30", reference("2025-04-10T08:00")));
        assert!(!is_completed("2025-04-10", "14:30", reference("2025-04-09T23:59")));
    }

    #[test]
    fn test_completion_unparseable_date_is_not_completed() {
        assert!(!is_completed("sometime", "14:30", reference("2025-04-09T14:31")));
    }

    fn upcoming_day() -> crate::schedule::Day {
        day(
            "2025-04-09",
            vec![],
            vec![session("Plenary", "13:00", "13:30")],
            vec![
                track(
                    "Arena",
                    vec![
                        session("Soon", "13:10", "13:40"),
                        session("Also soon", "13:25", "13:55"),
                    ],
                ),
                track("Kantina", vec![session("Later", "15:00", "15:30")]),
            ],
        )
    }

    #[test]
    fn test_upcoming_window_anchors_on_earliest_start() {
        let window = upcoming_window(&upcoming_day(), "Storsalen", reference("2025-04-09T12:45"));
        let titles: Vec<&str> = window.iter().map(|s| s.session.title.as_str()).collect();
        // Earliest upcoming is 13:00; 13:30 would be the inclusive edge, so
        // 15:00 falls outside.
        assert_eq!(titles, ["Plenary", "Soon", "Also soon"]);
    }

    #[test]
    fn test_upcoming_window_is_strictly_future() {
        // At exactly 13:00 the plenary has started; the window re-anchors.
        let window = upcoming_window(&upcoming_day(), "Storsalen", reference("2025-04-09T13:00"));
        let titles: Vec<&str> = window.iter().map(|s| s.session.title.as_str()).collect();
        assert_eq!(titles, ["Soon", "Also soon"]);
    }

    #[test]
    fn test_upcoming_window_inclusive_edge() {
        let day = day(
            "2025-04-09",
            vec![],
            vec![],
            vec![track(
                "Arena",
                vec![
                    session("Anchor", "13:00", "13:30"),
                    session("Edge", "13:30", "14:00"),
                    session("Past edge", "13:31", "14:01"),
                ],
            )],
        );
        let window = upcoming_window(&day, "Felles", reference("2025-04-09T12:00"));
        let titles: Vec<&str> = window.iter().map(|s| s.session.title.as_str()).collect();
        assert_eq!(titles, ["Anchor", "Edge"]);
    }

    #[test]
    fn test_upcoming_window_empty_when_day_is_over() {
        let window = upcoming_window(&upcoming_day(), "Storsalen", reference("2025-04-09T16:00"));
        assert!(window.is_empty());
    }

    #[test]
    fn test_by_room_orders_by_descending_count() {
        let window = upcoming_window(&upcoming_day(), "Storsalen", reference("2025-04-09T12:45"));
        let rooms = by_room(&window);
        let names: Vec<&str> = rooms.iter().map(|(room, _)| room.as_str()).collect();
        assert_eq!(names, ["Arena", "Storsalen"]);
        assert_eq!(rooms[0].1.len(), 2);
    }
}
