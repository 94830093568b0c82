use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::theme::Theme;
use crate::util::unicode;

/// Where a tooltip goes: above the badge, right edges aligned, or below it
/// when there is no room above. Clamped into `bounds`.
pub fn tooltip_rect(anchor: Rect, bounds: Rect, text: &str, max_width: u16) -> Rect {
    let popup_w = max_width.min(bounds.width);
    let inner_w = popup_w.saturating_sub(2) as usize;
    let lines = unicode::wrap_words(text, inner_w).len() as u16;
    let popup_h = (lines + 2).min(bounds.height);

    let right = anchor.right().min(bounds.right());
    let x = right.saturating_sub(popup_w).max(bounds.x);

    let room_above = anchor.y.saturating_sub(bounds.y);
    let y = if room_above >= popup_h {
        anchor.y - popup_h
    } else {
        let below = anchor.bottom();
        below.min(bounds.bottom().saturating_sub(popup_h))
    };

    Rect::new(x, y, popup_w, popup_h)
}

/// Render the tooltip listing every address of a cell next to its badge.
pub fn render_tooltip(
    frame: &mut Frame,
    text: &str,
    theme: &Theme,
    anchor: Rect,
    bounds: Rect,
    max_width: u16,
) -> Rect {
    let popup = tooltip_rect(anchor, bounds, text, max_width);
    let inner_w = popup.width.saturating_sub(2) as usize;
    let style = theme.tooltip_style();

    frame.render_widget(Clear, popup);

    let lines: Vec<Line> = unicode::wrap_words(text, inner_w)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .style(style);
    let paragraph = Paragraph::new(lines).block(block).style(style);
    frame.render_widget(paragraph, popup);
    popup
}
