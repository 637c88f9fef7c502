//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use konf_core::RoomPlan;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the schedule document is hosted.
    pub schedule_url: String,
    /// Local cache of the fetched schedule document.
    pub schedule_path: PathBuf,
    /// Path to the favorites/preferences database.
    pub database_path: PathBuf,
    /// Development switch: honor the `--at` time override.
    pub allow_time_override: bool,
    /// Per-day sentinel room and display order.
    pub rooms: RoomPlan,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            schedule_url: "https://konf.example/schedule.yaml".to_string(),
            schedule_path: data_dir.join("schedule.yaml"),
            database_path: data_dir.join("konf.db"),
            allow_time_override: false,
            rooms: RoomPlan::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (KONF_*)
        figment = figment.merge(Env::prefixed("KONF_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for konf.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("konf"))
}

/// Returns the platform-specific data directory for konf.
///
/// On Linux: `~/.local/share/konf`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("konf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_konf() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "konf");
    }

    #[test]
    fn test_default_config_uses_data_dir() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.schedule_path, data_dir.join("schedule.yaml"));
        assert_eq!(config.database_path, data_dir.join("konf.db"));
        assert!(!config.allow_time_override);
    }

    #[test]
    fn test_default_rooms_match_event_plan() {
        let config = Config::default();
        assert_eq!(config.rooms.common_room(0), "Arena");
        assert_eq!(config.rooms.common_room(1), "Storsalen");
    }
}
