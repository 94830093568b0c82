use ratatui::style::{Color, Modifier, Style};

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub badge_bg: Color,
    pub badge_fg: Color,
    pub badge_focus_bg: Color,
    pub tooltip_bg: Color,
    pub tooltip_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            badge_bg: Color::Rgb(0xE0, 0xE0, 0xE0),
            badge_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            badge_focus_bg: Color::Rgb(0xFB, 0x41, 0x96),
            tooltip_bg: Color::Rgb(0x33, 0x33, 0x33),
            tooltip_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "dim" => theme.dim = color,
                "highlight" => theme.highlight = color,
                "selection_bg" => theme.selection_bg = color,
                "badge_bg" => theme.badge_bg = color,
                "badge_fg" => theme.badge_fg = color,
                "badge_focus_bg" => theme.badge_focus_bg = color,
                "tooltip_bg" => theme.tooltip_bg = color,
                "tooltip_fg" => theme.tooltip_fg = color,
                _ => tracing::warn!(slot = %key, "unknown color slot"),
            }
        }

        theme
    }

    /// Style of the address text; the cell's font is derived from it
    pub fn cell_text_style(&self, bg: Color) -> Style {
        Style::default().fg(self.text_bright).bg(bg)
    }

    /// Style for the `+N` badge
    pub fn badge_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.text_bright)
                .bg(self.badge_focus_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.badge_fg).bg(self.badge_bg)
        }
    }

    pub fn tooltip_style(&self) -> Style {
        Style::default().fg(self.tooltip_fg).bg(self.tooltip_bg)
    }
}
