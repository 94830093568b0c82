pub mod email_cell;
pub mod rows_view;
pub mod status_row;
pub mod tooltip;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function: header, rows, tooltip, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (1 row) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // rows
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    // Also the layout pass: reports the address column width
    rows_view::render_rows_view(frame, app, chunks[1]);

    // Tooltip goes on top of the rows
    if let Some(i) = app.tooltip_row()
        && let Some(&(_, anchor)) = app.badge_areas.iter().find(|(row, _)| *row == i)
    {
        let layout = app.rows[i].cell.layout();
        if let Some(badge) = layout.badge() {
            tooltip::render_tooltip(
                frame,
                &badge.tooltip,
                &app.theme,
                anchor,
                chunks[1],
                app.config.cell.tooltip_width,
            );
        }
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = app
        .source
        .as_ref()
        .and_then(|p| p.file_name())
        .map_or_else(|| "mailcell".to_string(), |n| n.to_string_lossy().into_owned());
    let count = app.rows.len();

    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} row{}", count, if count == 1 { "" } else { "s" }),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
