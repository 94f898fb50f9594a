//! viewwatch - file-system view discovery for React + Vaadin frontends.

mod actor;
mod cli;
mod config;
mod core;
mod logger;
mod plugin;
mod registry;
mod utils;
mod view;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ProjectConfig::load(cli)?;
    if !config.has_file() {
        debug!("config"; "no config file, using the default layout");
    }

    match &cli.command {
        Commands::Build => cli::build::build_views(&config).map(|_| ()),
        Commands::Watch { .. } => cli::watch::watch_views(cli, config),
        Commands::Routes { args } => cli::routes::run_routes(args, &config),
    }
}
