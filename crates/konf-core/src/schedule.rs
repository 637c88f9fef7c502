//! Schedule document model and parsing.
//!
//! The schedule is a single YAML document fetched once per run:
//! day-indexed, with nested per-room tracks, common (all-rooms) sessions and
//! breaks. The model is held immutably; all timeline structures are derived
//! from it on every render pass.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing a schedule document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The payload was not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The YAML parsed but the required nesting was missing.
    #[error("invalid document structure: {0}")]
    Structure(&'static str),
}

/// A single talk or workshop.
///
/// Identity is the `(title, start)` pair, see [`SessionKey`]. `start` and
/// `end` are raw time tokens; `end` is assumed to follow `start` but this is
/// not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Free text; `"workshop"` is the only value with dedicated handling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Short lead-in paragraph shown before the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<String>,
    /// Comma-separated free-text tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Outbound link to the live meeting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<String>,
    /// Outbound link to the recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<String>,
    /// Only set on common sessions that name their own room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl Session {
    /// The de-duplication and lookup key for this session.
    #[must_use]
    pub fn key(&self) -> SessionKey {
        SessionKey {
            title: self.title.clone(),
            start: self.start.clone(),
        }
    }

    #[must_use]
    pub fn is_workshop(&self) -> bool {
        self.kind.as_deref() == Some("workshop")
    }

    /// Iterates the non-empty trimmed entries of the `tag` field.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// Session identity: the `(title, start)` pair.
///
/// Not a stable opaque ID: two sessions with the same title and start are
/// the same session as far as favorites and grouping are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub title: String,
    pub start: String,
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.title, self.start)
    }
}

/// A scheduled break. No room attachment, no identity beyond its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    pub title: String,
    pub start: String,
    pub end: String,
}

/// A room and its sessions, in document order (not necessarily by time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub room: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// One conference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub breaks: Vec<Break>,
    #[serde(default, rename = "commonSessions")]
    pub common_sessions: Vec<Session>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// The full schedule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDoc {
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days: Vec<Day>,
}

/// Parses a schedule document, checking the required nesting first.
///
/// The structural check is separate from typed deserialization so that a
/// well-formed YAML file that simply isn't a schedule produces a distinct,
/// user-explainable error rather than a field-level serde message.
pub fn parse_document(text: &str) -> Result<ScheduleDoc, DocumentError> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    let days = value
        .get("schedule")
        .and_then(|schedule| schedule.get("days"))
        .and_then(serde_yaml::Value::as_sequence);
    if days.is_none() {
        return Err(DocumentError::Structure(
            "missing required `schedule.days` sequence",
        ));
    }
    Ok(serde_yaml::from_value(value)?)
}
