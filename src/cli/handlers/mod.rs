mod fit;
mod rows;
pub use fit::cmd_fit;
pub use rows::cmd_rows;

use std::path::{Path, PathBuf};

use crate::cell::EmailCell;
use crate::cell::measure::Font;
use crate::cell::observe::SizeObserver;
use crate::cli::commands::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::rows_io::DEFAULT_ROWS_FILE;
use crate::model::Config;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let file = rows_path(&cli);

    match cli.command {
        None => Err("no subcommand given (try `mailcell --help`)".into()),
        Some(cmd) => match cmd {
            Commands::Fit(args) => cmd_fit(args, config, json),
            Commands::Rows(args) => cmd_rows(args, &file, &config, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the config named by `--config`, else `./mailcell.toml`, else defaults
pub fn load_cli_config(cli: &Cli) -> Result<Config, ConfigError> {
    config_io::load_config(cli.config.as_deref().map(Path::new), Path::new("."))
}

/// Recipients file named by `-f`, else the default
pub fn rows_path(cli: &Cli) -> PathBuf {
    cli.file
        .as_deref()
        .map_or_else(|| PathBuf::from(DEFAULT_ROWS_FILE), PathBuf::from)
}

/// Fit `emails` into `width` once, the way a mounted cell would on its first
/// observation, and return the settled cell.
fn fit_once(emails: Vec<String>, width: u16, config: &Config) -> EmailCell {
    let observer = SizeObserver::new();
    let measurer = config.measure.measurer();
    let mut cell = EmailCell::new(emails, config.cell.reserve_width);
    cell.mount(&observer);
    observer.report(width);
    cell.sync(measurer.as_ref(), &Font::monospace(), config.measure.char_width);
    cell.unmount();
    cell
}
