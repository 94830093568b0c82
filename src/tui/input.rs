use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::app::App;

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,

        (_, KeyCode::Char('j') | KeyCode::Down) => {
            app.set_focus(None);
            app.move_cursor(1);
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            app.set_focus(None);
            app.move_cursor(-1);
        }
        (_, KeyCode::Char('g') | KeyCode::Home) => {
            app.set_focus(None);
            app.cursor = 0;
        }
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.set_focus(None);
            app.cursor = app.rows.len().saturating_sub(1);
        }

        // Badge focus
        (_, KeyCode::BackTab) => {
            app.cycle_focus(false);
        }
        (m, KeyCode::Tab) if m.contains(KeyModifiers::SHIFT) => {
            app.cycle_focus(false);
        }
        (_, KeyCode::Tab) => {
            app.cycle_focus(true);
        }
        (_, KeyCode::Enter) => {
            // Focus the badge on the cursor row, if it has one
            let cursor = app.cursor;
            if app.rows.get(cursor).is_some_and(|r| r.cell.has_badge()) {
                app.set_focus(Some(cursor));
            }
        }
        (_, KeyCode::Esc) => app.set_focus(None),

        (_, KeyCode::Char('r')) => app.reload(),
        _ => {}
    }
}

/// Handle a mouse event: hovering a badge shows its tooltip
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => app.hover_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.move_cursor(1),
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        _ => {}
    }
}
