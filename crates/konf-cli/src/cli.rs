//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Conference schedule viewer.
///
/// Fetches a two-day conference schedule document, renders per-day
/// timelines of talks, workshops and breaks across rooms, and keeps a
/// locally persisted favorites list.
#[derive(Debug, Parser)]
#[command(name = "konf", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download the schedule document and cache it locally.
    Fetch {
        /// Fetch from this URL instead of the configured one.
        #[arg(long)]
        url: Option<String>,
    },

    /// Render a day's timeline.
    Show {
        /// Day index (defaults to the persisted active day).
        #[arg(long)]
        day: Option<usize>,

        /// Override the current time (YYYY-MM-DDTHH:MM). Requires
        /// `allow_time_override` in the config.
        #[arg(long)]
        at: Option<String>,

        /// Render one timeline per room instead of the merged view.
        #[arg(long)]
        by_room: bool,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the sessions starting next.
    Next {
        /// Day index (defaults to the persisted active day).
        #[arg(long)]
        day: Option<usize>,

        /// Override the current time (YYYY-MM-DDTHH:MM).
        #[arg(long)]
        at: Option<String>,

        /// Re-evaluate every 60 seconds until interrupted.
        #[arg(long)]
        watch: bool,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the schedule's days.
    Days,

    /// Persist the active day index.
    UseDay {
        /// Day index to make active.
        day: usize,
    },

    /// Manage the favorites list.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Show configuration, cache and store status.
    Status,
}

/// Favorites subcommands.
#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorites grouped by day.
    List {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Toggle a session (and its connected group, if any).
    Toggle {
        /// Session title.
        #[arg(long)]
        title: String,

        /// Session start token, e.g. 10:00.
        #[arg(long)]
        start: String,

        /// Restrict the lookup to one day.
        #[arg(long)]
        day: Option<usize>,
    },

    /// Switch the persisted favorites view on or off.
    View {
        #[arg(value_enum)]
        state: ViewState,
    },
}

/// On/off argument for the favorites view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewState {
    On,
    Off,
}
