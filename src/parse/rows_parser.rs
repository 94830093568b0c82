use crate::model::rows::{Row, RowWarning};

/// Parse a recipients file.
///
/// Format: one row per line, `label: a@x.io, b@x.io`. Blank lines and lines
/// starting with `#` are skipped. A line without `:` is a row of addresses
/// labelled by its line number. `label:` with nothing after it is a row
/// with no addresses.
pub fn parse_rows(source: &str) -> (Vec<Row>, Vec<RowWarning>) {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (label, list) = match split_label(trimmed) {
            Some((label, list)) => (label.to_string(), list),
            None => (format!("#{}", line_no), trimmed),
        };

        let emails = parse_emails(list);
        for email in &emails {
            if !email.is_empty() && !email.contains('@') {
                warnings.push(RowWarning {
                    line: line_no,
                    message: format!("'{}' does not look like an email address", email),
                });
            }
        }

        rows.push(Row {
            label,
            emails,
            line: line_no,
        });
    }

    (rows, warnings)
}

/// Split a comma-separated address list. Entries are trimmed; empty entries
/// between commas are kept. An all-blank list has no entries.
pub fn parse_emails(list: &str) -> Vec<String> {
    if list.trim().is_empty() {
        return Vec::new();
    }
    list.split(',').map(|e| e.trim().to_string()).collect()
}

/// Split `label: list` at the first colon that comes before any `@`.
/// A colon after an `@` belongs to an address, not to a label.
fn split_label(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    if line[..colon].contains('@') || line[..colon].contains(',') {
        return None;
    }
    Some((line[..colon].trim(), &line[colon + 1..]))
}
