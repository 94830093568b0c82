use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, Row};
use crate::tui::app::App;

pub const TERM_W: u16 = 52;
pub const TERM_H: u16 = 8;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Three rows: one that overflows, one single address, one empty.
pub fn sample_rows() -> Vec<Row> {
    vec![
        Row::new(
            "Design",
            vec![
                "ana@studio.io".into(),
                "ben@studio.io".into(),
                "cleo@studio.io".into(),
            ],
        ),
        Row::new("Solo", vec!["dan@studio.io".into()]),
        Row::new("Nobody", vec![]),
    ]
}

/// An app over [`sample_rows`] with the default config.
pub fn sample_app() -> App {
    App::new(sample_rows(), Config::default())
}
