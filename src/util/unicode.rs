use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// True if every grapheme of `s` has a terminal width we can trust.
/// Control characters (newlines, escapes, ...) move the cursor instead of
/// occupying cells, so their width is not defined.
pub fn has_defined_width(s: &str) -> bool {
    !s.chars().any(char::is_control)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Wrap text into rows of at most `width` cells.
///
/// Breaks after whitespace when possible; a token wider than a whole row is
/// broken between graphemes (like CSS `word-break: break-word`). Trailing
/// whitespace at a break is dropped.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut col = 0;

    for token in space_runs(text) {
        let tw = display_width(token);
        let is_space = token.chars().all(char::is_whitespace);

        if col + tw <= width {
            current.push_str(token);
            col += tw;
            continue;
        }
        if is_space {
            // Break here; the space itself is not carried over
            rows.push(current.trim_end().to_string());
            current = String::new();
            col = 0;
            continue;
        }
        if col > 0 {
            rows.push(current.trim_end().to_string());
            current = String::new();
            col = 0;
        }
        for g in token.graphemes(true) {
            let gw = display_width(g);
            if col + gw > width && col > 0 {
                rows.push(std::mem::take(&mut current));
                col = 0;
            }
            current.push_str(g);
            col += gw;
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current.trim_end().to_string());
    }
    rows
}

/// Split into alternating runs of whitespace and non-whitespace.
fn space_runs(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let ws = c.is_whitespace();
        if in_space.is_some_and(|prev| prev != ws) {
            out.push(&s[start..i]);
            start = i;
        }
        in_space = Some(ws);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}
