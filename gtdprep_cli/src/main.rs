mod cli;
mod display;
mod error;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, CleanCommand, RunCommand};
use gtdprep::config::Config;
use log::debug;

use crate::error::{GtdPrepCliError, GtdPrepCliResult};

const DEFAULT_LOGGING_LEVEL: &str = "warn";

fn main() -> Result<()> {
    // Set RUST_LOG to `DEFAULT_LOGGING_LEVEL` if not set
    let _ =
        std::env::var("RUST_LOG").map_err(|_| std::env::set_var("RUST_LOG", DEFAULT_LOGGING_LEVEL));
    pretty_env_logger::init_timed();
    let args = Cli::parse();
    debug!("args: {args:?}");
    let config = match args.config.as_ref() {
        Some(path) => read_config_from_toml(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => default_config_path()
            .map(|path| read_default_config(&path))
            .transpose()?
            .unwrap_or_default(),
    };
    debug!("config: {config:?}");

    // Without a subcommand the full cleaning run is performed with the configured defaults
    match args.command {
        Some(command) => command.run(config)?,
        None => CleanCommand::new(args.quiet).run(config)?,
    }
    Ok(())
}

// Linux: ~/.config/gtdprep/config.toml
// macOS: ~/Library/Application Support/gtdprep/config.toml
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gtdprep").join("config.toml"))
}

/// Reads the config at `file_path`. The file must exist.
fn read_config_from_toml(file_path: &Path) -> GtdPrepCliResult<Config> {
    let contents = std::fs::read_to_string(file_path)?;
    Ok(toml::from_str(&contents)?)
}

/// Reads the config in the user config directory, falling back to the default config if there
/// is no file there.
fn read_default_config(file_path: &Path) -> GtdPrepCliResult<Config> {
    match read_config_from_toml(file_path) {
        Err(GtdPrepCliError::IOError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", file_path.display());
            Ok(Config::default())
        }
        result => result,
    }
}
