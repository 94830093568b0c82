use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};

use crate::cell::EmailCell;
use crate::cell::measure::{Font, TextMeasurer};
use crate::cell::observe::SizeObserver;
use crate::io::rows_io::read_rows;
use crate::io::watcher::RowsWatcher;
use crate::model::{Config, Row};

use super::input;
use super::render;
use super::theme::Theme;

/// One recipients row on screen
pub struct RowView {
    pub label: String,
    pub cell: EmailCell,
}

/// Main application state
pub struct App {
    pub rows: Vec<RowView>,
    /// File the rows were read from, if any
    pub source: Option<PathBuf>,
    pub config: Config,
    pub theme: Theme,
    pub measurer: Box<dyn TextMeasurer>,
    /// Observes the width of the address column
    pub column: SizeObserver,
    pub should_quit: bool,
    /// Cursor row
    pub cursor: usize,
    /// First visible row
    pub scroll: usize,
    /// Row whose badge has keyboard focus
    pub focus: Option<usize>,
    /// Row whose badge is under the mouse
    pub hover: Option<usize>,
    /// Badge areas from the last frame, for mouse hit testing
    pub badge_areas: Vec<(usize, Rect)>,
    /// One-line message for the status row (reload errors etc.)
    pub message: Option<String>,
}

impl App {
    pub fn new(rows: Vec<Row>, config: Config) -> Self {
        let theme = Theme::from_config(&config.ui);
        let measurer = config.measure.measurer();
        let mut app = App {
            rows: Vec::new(),
            source: None,
            config,
            theme,
            measurer,
            column: SizeObserver::new(),
            should_quit: false,
            cursor: 0,
            scroll: 0,
            focus: None,
            hover: None,
            badge_areas: Vec::new(),
            message: None,
        };
        app.set_rows(rows);
        app
    }

    /// Font of the address text, derived from the style it is drawn with
    pub fn cell_font(&self) -> Font {
        Font::from_style(self.theme.cell_text_style(self.theme.background))
    }

    /// Replace the rows, keeping existing cells (and their subscriptions)
    /// where a row still exists. Each surviving cell gets the new list and
    /// recomputes on the next sync.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        let mut incoming = rows.into_iter();
        let mut kept = 0;

        for view in self.rows.iter_mut() {
            let Some(row) = incoming.next() else {
                break;
            };
            view.label = row.label;
            view.cell.set_emails(row.emails);
            if !view.cell.is_mounted() {
                view.cell.mount(&self.column);
            }
            kept += 1;
        }
        // Dropping a RowView unmounts its cell
        self.rows.truncate(kept);

        for row in incoming {
            let mut cell = EmailCell::new(row.emails, self.config.cell.reserve_width);
            cell.mount(&self.column);
            self.rows.push(RowView {
                label: row.label,
                cell,
            });
        }

        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        if self.focus.is_some_and(|i| i >= self.rows.len()) {
            self.focus = None;
        }
        self.hover = None;
        // Areas point at the old rows until the next draw
        self.badge_areas.clear();
        self.sync_cells();
    }

    /// Report the address column's width for this frame and bring every
    /// cell up to date with it.
    pub fn observe_column(&mut self, width: u16) {
        self.column.report(width);
        self.sync_cells();
    }

    fn sync_cells(&mut self) {
        let font = self.cell_font();
        let fallback = self.config.measure.char_width;
        let mut recomputed = 0;
        for view in self.rows.iter_mut() {
            if view.cell.sync(self.measurer.as_ref(), &font, fallback) {
                recomputed += 1;
            }
        }
        if recomputed > 0 {
            debug!(recomputed, width = ?self.column.width(), "cells refitted");
        }
        // A refit can remove the badge that had focus
        if let Some(i) = self.focus
            && !self.rows[i].cell.is_focused()
        {
            self.focus = None;
        }
    }

    /// Re-read the source file
    pub fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };
        match read_rows(&path) {
            Ok(rows) => {
                info!(file = %path.display(), rows = rows.len(), "reloaded recipients");
                self.message = None;
                self.set_rows(rows);
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.message = Some(e.to_string());
            }
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let max = self.rows.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    /// Move keyboard focus to the next (or previous) badge, wrapping around.
    /// Rows without a badge are skipped. Returns false if no row has one.
    pub fn cycle_focus(&mut self, forward: bool) -> bool {
        let n = self.rows.len();
        if n == 0 {
            return false;
        }
        let start = match self.focus {
            Some(i) if forward => i + 1,
            Some(i) => i + n - 1,
            None if forward => 0,
            None => n - 1,
        };
        for step in 0..n {
            let i = if forward {
                (start + step) % n
            } else {
                (start + n - step) % n
            };
            if self.rows[i].cell.has_badge() {
                self.set_focus(Some(i));
                return true;
            }
        }
        false
    }

    pub fn set_focus(&mut self, target: Option<usize>) {
        if let Some(prev) = self.focus.take() {
            self.rows[prev].cell.blur();
        }
        if let Some(i) = target
            && self.rows[i].cell.focus()
        {
            self.focus = Some(i);
            self.cursor = i;
        }
    }

    /// Update hover state from a mouse position
    pub fn hover_at(&mut self, col: u16, row: u16) {
        let pos = Position::new(col, row);
        let hit = self
            .badge_areas
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|(i, _)| *i);
        if hit == self.hover {
            return;
        }
        if let Some(prev) = self.hover.take()
            && let Some(view) = self.rows.get_mut(prev)
        {
            view.cell.hover(false);
        }
        if let Some(i) = hit
            && let Some(view) = self.rows.get_mut(i)
        {
            view.cell.hover(true);
            self.hover = Some(i);
        }
    }

    /// Row whose tooltip is showing: the hovered badge wins over focus
    pub fn tooltip_row(&self) -> Option<usize> {
        self.hover
            .or(self.focus)
            .filter(|&i| self.rows[i].cell.tooltip_visible())
    }

    /// Unmount every cell
    pub fn unmount_all(&mut self) {
        for view in self.rows.iter_mut() {
            view.cell.unmount();
        }
    }
}

/// Run the TUI application on a recipients file
pub fn run(path: &Path, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let rows = read_rows(path)?;
    let mut app = App::new(rows, config);
    app.source = Some(path.to_path_buf());

    // A missing watcher only costs live reload
    let watcher = match RowsWatcher::start(path) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "file watching unavailable");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    app.unmount_all();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&RowsWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                // The next draw reports the new column width
                Event::Resize(..) => {}
                _ => {}
            }
        }

        if watcher.is_some_and(RowsWatcher::poll) {
            app.reload();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, emails: &[&str]) -> Row {
        Row::new(label, emails.iter().map(|s| s.to_string()).collect())
    }

    fn sample_app() -> App {
        App::new(
            vec![
                row("Design", &["ana@studio.io", "ben@studio.io", "cleo@studio.io"]),
                row("Solo", &["dan@studio.io"]),
                row("Ops", &["eve@studio.io", "fay@studio.io", "gus@studio.io"]),
            ],
            Config::default(),
        )
    }

    #[test]
    fn every_cell_is_mounted_on_the_column() {
        let app = sample_app();
        assert_eq!(app.column.subscriber_count(), 3);
    }

    #[test]
    fn column_width_refits_all_cells() {
        let mut app = sample_app();
        app.observe_column(20);
        assert_eq!(app.rows[0].cell.visible_count(), 1);
        assert!(app.rows[0].cell.has_badge());
        assert!(!app.rows[1].cell.has_badge());

        app.observe_column(80);
        assert!(!app.rows[0].cell.has_badge());
    }

    #[test]
    fn tab_skips_rows_without_badge() {
        let mut app = sample_app();
        app.observe_column(20);

        assert!(app.cycle_focus(true));
        assert_eq!(app.focus, Some(0));
        assert!(app.cycle_focus(true));
        assert_eq!(app.focus, Some(2));
        assert!(app.cycle_focus(true));
        assert_eq!(app.focus, Some(0));
        assert!(app.cycle_focus(false));
        assert_eq!(app.focus, Some(2));
        assert!(app.rows[2].cell.is_focused());
        assert!(!app.rows[0].cell.is_focused());
    }

    #[test]
    fn no_focus_when_everything_fits() {
        let mut app = sample_app();
        app.observe_column(120);
        assert!(!app.cycle_focus(true));
        assert_eq!(app.focus, None);
    }

    #[test]
    fn widening_drops_focus_with_the_badge() {
        let mut app = sample_app();
        app.observe_column(20);
        app.cycle_focus(true);
        app.observe_column(120);
        assert_eq!(app.focus, None);
        assert_eq!(app.tooltip_row(), None);
    }

    #[test]
    fn set_rows_reuses_and_releases_cells() {
        let mut app = sample_app();
        app.set_rows(vec![row("Only", &["a@test.com"])]);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.column.subscriber_count(), 1);
        assert_eq!(app.rows[0].cell.emails(), ["a@test.com".to_string()]);
    }

    #[test]
    fn empty_row_becomes_observed_once_filled() {
        let mut app = App::new(vec![row("Nobody", &[])], Config::default());
        assert_eq!(app.column.subscriber_count(), 0);
        app.observe_column(20);
        app.set_rows(vec![row("Nobody", &["a@test.com", "b@test.com", "c@test.com"])]);
        assert_eq!(app.column.subscriber_count(), 1);
        assert!(app.rows[0].cell.has_badge());
    }

    #[test]
    fn hover_follows_badge_areas() {
        let mut app = sample_app();
        app.observe_column(20);
        app.badge_areas = vec![(0, Rect::new(30, 2, 4, 1))];

        app.hover_at(31, 2);
        assert_eq!(app.hover, Some(0));
        assert_eq!(app.tooltip_row(), Some(0));

        app.hover_at(10, 2);
        assert_eq!(app.hover, None);
        assert_eq!(app.tooltip_row(), None);
    }

    #[test]
    fn replacing_rows_forgets_stale_badge_areas() {
        let mut app = sample_app();
        app.observe_column(20);
        app.badge_areas = vec![(0, Rect::new(30, 0, 4, 1)), (2, Rect::new(30, 2, 4, 1))];

        app.set_rows(vec![row("Solo", &["dan@studio.io"])]);
        assert!(app.badge_areas.is_empty());

        // A mouse over where row 2's badge used to be hits nothing
        app.hover_at(31, 2);
        assert_eq!(app.hover, None);
        assert_eq!(app.tooltip_row(), None);
    }

    #[test]
    fn unmount_all_releases_every_subscription() {
        let mut app = sample_app();
        app.unmount_all();
        assert_eq!(app.column.subscriber_count(), 0);
    }
}
