//! # CLI Behavior
//!
//! This is **one possible host** for jumplist, not the engine itself. The CLI is the
//! only place that knows about terminal I/O, exit codes and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Sources
//!
//! - **Pages**: `--pages` (or `JUMPLIST_PAGES`), a JSON page tree, default `pages.json`
//! - **Rules**: `JUMPLIST_USE_SELECTORS`, else `--config` (or `JUMPLIST_CONFIG`), else
//!   `jumplist.toml` in the user config directory
//!
//! ## Logging
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` picks the filter;
//! `-v` sets the default to `debug` when `RUST_LOG` is unset.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `handlers`: One function per command, acting as the host
//! - `render`: Text and JSON output
//! - `styles`: Terminal styling

mod handlers;
mod render;
pub mod setup;
mod styles;

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use jumplistapp::api::PageListFilter;
use jumplistapp::config::FilterConfig;
use jumplistapp::model::Language;
use jumplistapp::store::fs::load_pages;

use handlers::AppState;
use setup::{Cli, Commands};

const CONFIG_FILE: &str = "jumplist.toml";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(default_config_path);
    let config = FilterConfig::load(config_path.as_deref()).context("failed to load config")?;
    let store = load_pages(&cli.pages)
        .with_context(|| format!("failed to load pages from {}", cli.pages.display()))?;

    tracing::debug!(pages = %cli.pages.display(), config = ?config_path, "host ready");

    let state = AppState {
        api: PageListFilter::new(store, &config),
        language: cli.language.map(Language::new),
        output: cli.output,
    };

    let output = match cli.command {
        Commands::Filters { id } => handlers::filters(&state, id)?,
        Commands::Actions { id } => handlers::actions(&state, id)?,
        Commands::List { id, filter } => handlers::list(&state, id, filter)?,
        Commands::Rules => handlers::rules(&state)?,
    };
    println!("{output}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "jumplist", "jumplist").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
