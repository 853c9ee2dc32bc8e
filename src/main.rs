mod cli;
mod config;
mod models;
mod store;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use store::RecordStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    let data_file = config.data_file(cli.data_file.as_deref())?;
    log::debug!("Using data file {:?}", data_file);
    let store = RecordStore::new(data_file).with_policy(config.store.duplicate_policy);

    match cli.command {
        Some(Commands::Status) => handlers::handle_status(&store)?,
        Some(Commands::Record { selections }) => handlers::handle_record(&store, &selections)?,
        Some(Commands::History { limit }) => {
            handlers::handle_history(&store, limit.unwrap_or(config.display.history_limit))?
        }
        Some(Commands::Progress) => handlers::handle_progress(&store, config.display.chart_window)?,
        Some(Commands::Reset { yes }) => handlers::handle_reset(&store, yes)?,
        Some(Commands::Options) => handlers::handle_options()?,

        // No subcommand → launch TUI
        None => tui::app::run(store, config)?,
    }

    Ok(())
}
