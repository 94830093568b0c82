use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

const HINTS: &str = "j/k move  Tab badge  r reload  q quit";

/// Render the status row (bottom of screen).
///
/// A focused badge announces its accessible label here; otherwise the row
/// shows the last reload error, if any, and the key hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let focused_label = app
        .focus
        .and_then(|i| app.rows[i].cell.layout().badge().map(|b| b.accessible_label.clone()));

    let line = if let Some(label) = focused_label {
        Line::from(Span::styled(
            unicode::truncate_to_width(&label, width),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
    } else {
        let mut spans = Vec::new();
        if let Some(ref message) = app.message {
            spans.push(Span::styled(
                unicode::truncate_to_width(message, width),
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let hint_width = unicode::display_width(HINTS);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(HINTS, Style::default().fg(app.theme.dim).bg(bg)));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
