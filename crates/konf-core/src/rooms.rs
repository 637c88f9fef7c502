//! Per-day room display configuration.
//!
//! Each day has a sentinel room under which common (all-rooms) sessions are
//! displayed, and a priority order used to break ties between rooms sharing
//! a start time. Both are deployment-configurable; the defaults match the
//! two-day event this viewer was built for.

use serde::{Deserialize, Serialize};

/// Fallback sentinel for day indices outside the configured plan.
pub const FALLBACK_COMMON_ROOM: &str = "Felles";

/// Display configuration for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRooms {
    /// Room name under which common sessions are displayed.
    pub common_room: String,
    /// Rooms in display-priority order. Rooms not listed sort last.
    pub order: Vec<String>,
}

/// Room display configuration for the whole event, indexed by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPlan {
    pub days: Vec<DayRooms>,
}

impl Default for RoomPlan {
    fn default() -> Self {
        Self {
            days: vec![
                DayRooms {
                    common_room: "Arena".to_string(),
                    order: ["Arena", "Klasserom", "Kantina", "Landegode"]
                        .map(String::from)
                        .to_vec(),
                },
                DayRooms {
                    common_room: "Storsalen".to_string(),
                    order: [
                        "Storsalen",
                        "Storsal 1",
                        "Storsal 2",
                        "Storsal 3",
                        "The Social",
                        "Saltstraumen",
                        "Salten",
                    ]
                    .map(String::from)
                    .to_vec(),
                },
            ],
        }
    }
}

impl RoomPlan {
    /// The sentinel room for common sessions on the given day.
    #[must_use]
    pub fn common_room(&self, day_index: usize) -> &str {
        self.days
            .get(day_index)
            .map_or(FALLBACK_COMMON_ROOM, |day| day.common_room.as_str())
    }

    /// The room priority order for the given day (empty when unconfigured).
    #[must_use]
    pub fn order(&self, day_index: usize) -> &[String] {
        self.days.get(day_index).map_or(&[], |day| day.order.as_slice())
    }
}
