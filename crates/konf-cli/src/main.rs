use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use konf_cli::commands::{days, favorites, fetch, next, show, status, use_day};
use konf_cli::{Cli, Commands, Config, FavoritesAction};

/// Load config and open the store, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(konf_store::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = konf_store::Database::open(&config.database_path)
        .context("failed to open favorites database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Fetch { url }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            fetch::run(&mut stdout, &config, url.as_deref())?;
        }
        Some(Commands::Show { day, at, by_room, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let args = show::ShowArgs {
                day: *day,
                at: at.as_deref(),
                by_room: *by_room,
                json: *json,
            };
            show::run(&mut stdout, &config, &db, &args)?;
        }
        Some(Commands::Next { day, at, watch, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let args = next::NextArgs {
                day: *day,
                at: at.as_deref(),
                watch: *watch,
                json: *json,
            };
            next::run(&mut stdout, &config, &db, &args)?;
        }
        Some(Commands::Days) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            days::run(&mut stdout, &config, &db)?;
        }
        Some(Commands::UseDay { day }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            use_day::run(&mut stdout, &config, &db, *day)?;
        }
        Some(Commands::Favorites { action }) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            match action {
                FavoritesAction::List { json } => {
                    favorites::list(&mut stdout, &config, &db, *json)?;
                }
                FavoritesAction::Toggle { title, start, day } => {
                    favorites::toggle(&mut stdout, &config, &mut db, title, start, *day)?;
                }
                FavoritesAction::View { state } => {
                    favorites::view(&mut stdout, &db, *state)?;
                }
            }
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, &config, &db)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
