use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::email_cell::render_email_cell;

/// Cells between the label column and the address column
const COLUMN_GAP: u16 = 1;

/// Split a row into its label and address regions.
pub fn columns(area: Rect, label_width: u16) -> (Rect, Rect) {
    let label_w = label_width.min(area.width);
    let addr_x = area.x + (label_w + COLUMN_GAP).min(area.width);
    let label = Rect::new(area.x, area.y, label_w, area.height);
    let addresses = Rect::new(addr_x, area.y, area.right() - addr_x, area.height);
    (label, addresses)
}

/// Render the recipients table. Reports the address column width to the
/// app first, so every cell is fitted to this frame's layout.
pub fn render_rows_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let (_, address_column) = columns(area, app.config.cell.label_width);
    app.observe_column(address_column.width);
    app.badge_areas.clear();

    if app.rows.is_empty() {
        let hint = Paragraph::new(Span::styled(
            "no recipients",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
        frame.render_widget(hint, area);
        return;
    }

    // Keep the cursor on screen
    let height = area.height as usize;
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }

    let label_width = app.config.cell.label_width as usize;
    let mut badges = Vec::new();
    for (offset, i) in (app.scroll..app.rows.len()).take(height).enumerate() {
        let row_area = Rect::new(area.x, area.y + offset as u16, area.width, 1);
        let (label_area, cell_area) = columns(row_area, app.config.cell.label_width);
        let is_cursor = i == app.cursor;
        let bg = if is_cursor {
            app.theme.selection_bg
        } else {
            app.theme.background
        };

        // Fill the whole row so the gap picks up the cursor background
        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(bg)),
            row_area,
        );

        let mut label_style = Style::default().fg(app.theme.text).bg(bg);
        if is_cursor {
            label_style = label_style
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD);
        }
        let label = unicode::truncate_to_width(&app.rows[i].label, label_width);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, label_style))),
            label_area,
        );

        if let Some(badge) = render_email_cell(frame, &app.rows[i].cell, &app.theme, cell_area, bg)
        {
            badges.push((i, badge));
        }
    }
    app.badge_areas = badges;
}
