mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use waktu_solat::config::AppConfig;
use waktu_solat::db::SqliteStore;
use waktu_solat::models::PreferencesPatch;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open the store
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let store = SqliteStore::open(&db_path)?;

    match cli.command.unwrap_or(Commands::Times {
        zone: None,
        refresh: false,
    }) {
        Commands::Times { zone, refresh } => {
            handlers::handle_times(&store, &config, zone.as_deref(), refresh)?;
        }
        Commands::Week { zone } => {
            handlers::handle_week(&store, &config, zone.as_deref())?;
        }
        Commands::Zones { query } => {
            handlers::handle_zones(&store, query.as_deref())?;
        }
        Commands::Zone { code } => {
            handlers::handle_zone(&store, &code)?;
        }
        Commands::Prefs {
            imsak,
            syuruk,
            dhuha,
            notifications,
            early_notification,
        } => {
            let patch = PreferencesPatch {
                notifications,
                early_notification,
                show_imsak: imsak,
                show_syuruk: syuruk,
                show_dhuha: dhuha,
                selected_zone: None,
            };
            handlers::handle_prefs(&store, patch)?;
        }
        Commands::Qibla { zone } => {
            handlers::handle_qibla(&store, &config, zone.as_deref())?;
        }
        Commands::ClearCache => {
            handlers::handle_clear_cache(&store, &config)?;
        }
        Commands::Watch { zone } => {
            handlers::handle_watch(&store, &config, zone.as_deref())?;
        }
    }

    Ok(())
}
