use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::cell::fit::{self, PLACEHOLDER};
use crate::cell::{CellLayout, EmailCell};
use crate::tui::theme::Theme;
use crate::util::unicode;

const BADGE_MARGIN: u16 = fit::BADGE_MARGIN as u16;

/// Where the pieces of a cell land within its row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRow {
    /// Address text as drawn, padded to the text region
    pub text: String,
    /// Badge text (` +N `) and its column offset within the row
    pub badge: Option<(u16, String)>,
}

/// Lay a cell out into a row of `width` cells.
///
/// The badge keeps its full width and sits at the right edge; the text
/// region takes whatever is left. Text that does not fit ends in `…`, so a
/// cut is never mistaken for a complete address.
pub fn layout_row(layout: &CellLayout, width: u16) -> CellRow {
    match layout {
        CellLayout::Placeholder => CellRow {
            text: PLACEHOLDER.to_string(),
            badge: None,
        },
        CellLayout::List { text, badge, .. } => {
            let badge_text = badge.as_ref().map(|b| fit::badge_text(b.hidden));
            let badge_w = badge_text
                .as_deref()
                .map_or(0, |b| unicode::display_width(b) as u16);
            let reserved = if badge_text.is_some() { badge_w + BADGE_MARGIN } else { 0 };
            let text_w = width.saturating_sub(reserved) as usize;

            let shown = unicode::truncate_to_width(text, text_w);

            match badge_text {
                Some(b) => {
                    let pad = text_w.saturating_sub(unicode::display_width(&shown));
                    CellRow {
                        text: format!("{}{}", shown, " ".repeat(pad)),
                        badge: Some((text_w as u16 + BADGE_MARGIN, b)),
                    }
                }
                None => CellRow {
                    text: shown,
                    badge: None,
                },
            }
        }
    }
}

/// Render an email cell into a single row. Returns the badge's area, if a
/// badge was drawn, for hit testing and tooltip placement.
pub fn render_email_cell(
    frame: &mut Frame,
    cell: &EmailCell,
    theme: &Theme,
    area: Rect,
    bg: Color,
) -> Option<Rect> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let area = Rect { height: 1, ..area };
    let layout = cell.layout();
    let row = layout_row(&layout, area.width);

    let text_style = match layout {
        CellLayout::Placeholder => Style::default().fg(theme.dim).bg(bg),
        CellLayout::List { .. } => theme.cell_text_style(bg),
    };

    let mut spans = vec![Span::styled(row.text, text_style)];
    let mut badge_area = None;
    if let Some((offset, badge)) = row.badge {
        spans.push(Span::styled(
            " ".repeat(BADGE_MARGIN as usize),
            Style::default().bg(bg),
        ));
        let badge_w = unicode::display_width(&badge) as u16;
        spans.push(Span::styled(badge, theme.badge_style(cell.is_focused())));

        let x = area.x.saturating_add(offset);
        if x < area.right() {
            badge_area = Some(Rect::new(x, area.y, badge_w.min(area.right() - x), 1));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
    badge_area
}
