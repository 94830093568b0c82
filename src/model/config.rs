use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cell::fit::DEFAULT_RESERVE_WIDTH;
use crate::cell::measure::{CellMeasurer, FixedMeasurer, TextMeasurer};

/// Configuration from mailcell.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cell: CellConfig,
    #[serde(default)]
    pub measure: MeasureConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellConfig {
    /// Cells kept free for the `+N` badge while more addresses follow
    #[serde(default = "default_reserve_width")]
    pub reserve_width: f64,
    /// Wrap width of the hover/focus tooltip, in cells
    #[serde(default = "default_tooltip_width")]
    pub tooltip_width: u16,
    /// Width of the label column in the rows view
    #[serde(default = "default_label_width")]
    pub label_width: u16,
}

impl Default for CellConfig {
    fn default() -> Self {
        CellConfig {
            reserve_width: default_reserve_width(),
            tooltip_width: default_tooltip_width(),
            label_width: default_label_width(),
        }
    }
}

fn default_reserve_width() -> f64 {
    DEFAULT_RESERVE_WIDTH
}

fn default_tooltip_width() -> u16 {
    38
}

fn default_label_width() -> u16 {
    16
}

/// How address widths are measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureMode {
    /// Terminal display cells (unicode-aware)
    #[default]
    Cells,
    /// `char_width` per character
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureConfig {
    #[serde(default)]
    pub mode: MeasureMode,
    /// Advance per character for `fixed` mode, and the estimate used when a
    /// width cannot be measured
    #[serde(default = "default_char_width")]
    pub char_width: f64,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        MeasureConfig {
            mode: MeasureMode::Cells,
            char_width: default_char_width(),
        }
    }
}

impl MeasureConfig {
    /// The measurer this config selects
    pub fn measurer(&self) -> Box<dyn TextMeasurer> {
        match self.mode {
            MeasureMode::Cells => Box::new(CellMeasurer),
            MeasureMode::Fixed => Box::new(FixedMeasurer::new(self.char_width)),
        }
    }
}

fn default_char_width() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `badge_bg = "#E0E0E0"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file for the TUI. Without one the TUI does not log.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Default filter when MAILCELL_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: None,
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
