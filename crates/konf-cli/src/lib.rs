//! Schedule viewer CLI library.
//!
//! This crate provides the CLI interface for the schedule viewer.

mod cli;
pub mod commands;
mod config;
pub mod render;

pub use cli::{Cli, Commands, FavoritesAction, ViewState};
pub use config::Config;
