//! Text measurement for the fit pass.
//!
//! The fit calculator only needs a width for each string. Where that width
//! comes from is pluggable: terminal cell widths, a fixed advance per
//! character for headless runs, or any closure. A measurer that cannot
//! measure some text answers `None` and the caller falls back to a
//! length-based estimate instead of failing the render.

use std::fmt;

use ratatui::style::{Modifier, Style};
use tracing::debug;

use crate::util::unicode;

/// The font a cell is drawn with, derived from the rendering surface's style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub weight: u16,
    pub size: String,
    pub family: String,
}

impl Font {
    /// The plain terminal font.
    pub fn monospace() -> Self {
        Font {
            weight: 400,
            size: "1cell".into(),
            family: "monospace".into(),
        }
    }

    /// Derive the font from the style the cell text is rendered with: bold
    /// is 700, anything else 400.
    pub fn from_style(style: Style) -> Self {
        let weight = if style.add_modifier.contains(Modifier::BOLD) {
            700
        } else {
            400
        };
        Font {
            weight,
            ..Font::monospace()
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.weight, self.size, self.family)
    }
}

/// Maps text to a width for a given font. `None` means the width cannot be
/// determined for this text.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &Font) -> Option<f64>;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &Font) -> Option<f64>,
{
    fn measure(&self, text: &str, font: &Font) -> Option<f64> {
        self(text, font)
    }
}

/// Terminal display width in cells. Every weight occupies the same cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl TextMeasurer for CellMeasurer {
    fn measure(&self, text: &str, _font: &Font) -> Option<f64> {
        if !unicode::has_defined_width(text) {
            return None;
        }
        Some(unicode::display_width(text) as f64)
    }
}

/// A fixed advance per character, independent of the font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasurer {
    pub per_char: f64,
}

impl FixedMeasurer {
    pub fn new(per_char: f64) -> Self {
        FixedMeasurer { per_char }
    }
}

impl Default for FixedMeasurer {
    fn default() -> Self {
        FixedMeasurer { per_char: 1.0 }
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _font: &Font) -> Option<f64> {
        Some(estimate(text, self.per_char))
    }
}

/// Length-based width estimate.
pub fn estimate(text: &str, per_char: f64) -> f64 {
    text.chars().count() as f64 * per_char
}

/// Measure `text`, falling back to [`estimate`] when the measurer cannot.
pub fn measure_or_estimate(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &Font,
    fallback_per_char: f64,
) -> f64 {
    match measurer.measure(text, font) {
        Some(width) => width,
        None => {
            debug!(%font, len = text.len(), "text width unavailable, estimating");
            estimate(text, fallback_per_char)
        }
    }
}
