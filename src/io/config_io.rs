use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = "mailcell.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Load the config from `explicit` if given, else from `mailcell.toml` in
/// `dir` if it exists, else defaults. An explicit path must exist.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(CONFIG_FILE);
            if !candidate.exists() {
                return Ok(Config::default());
            }
            candidate
        }
    };

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config = parse_config(&text).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError { path, source },
        other => other,
    })?;
    Ok(config)
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: PathBuf::new(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if !config.cell.reserve_width.is_finite() || config.cell.reserve_width < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "cell.reserve_width must be a non-negative number, got {}",
            config.cell.reserve_width
        )));
    }
    if !config.measure.char_width.is_finite() || config.measure.char_width <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "measure.char_width must be positive, got {}",
            config.measure.char_width
        )));
    }
    if config.cell.tooltip_width < 8 {
        return Err(ConfigError::Invalid(format!(
            "cell.tooltip_width must be at least 8, got {}",
            config.cell.tooltip_width
        )));
    }
    Ok(())
}
