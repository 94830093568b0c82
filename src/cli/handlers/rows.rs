use std::path::Path;

use crate::cell::EmailCell;
use crate::cli::commands::RowsArgs;
use crate::cli::output::{RowJson, fit_to_json};
use crate::io::rows_io::read_rows;
use crate::model::Config;
use crate::tui::render::email_cell::layout_row;
use crate::util::unicode;

use super::fit_once;

pub fn cmd_rows(
    args: RowsArgs,
    file: &Path,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = read_rows(file)?;
    let label_width = config.cell.label_width as usize;

    if json {
        let out: Vec<RowJson> = rows
            .into_iter()
            .map(|row| {
                let cell = fit_once(row.emails, args.width, config);
                RowJson {
                    label: row.label,
                    fit: fit_to_json(&cell),
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for row in rows {
        let cell = fit_once(row.emails, args.width, config);
        println!("{}", format_row(&row.label, &cell, label_width, args.width));
    }
    Ok(())
}

/// One table line: padded label, a gap, then the fitted cell
fn format_row(label: &str, cell: &EmailCell, label_width: usize, width: u16) -> String {
    let mut line = pad_to_width(unicode::truncate_to_width(label, label_width), label_width);
    line.push(' ');

    let row = layout_row(&cell.layout(), width);
    let start = unicode::display_width(&line);
    line.push_str(&row.text);
    if let Some((offset, badge)) = row.badge {
        line = pad_to_width(line, start + offset as usize);
        line.push_str(&badge);
    }
    line.trim_end().to_string()
}

fn pad_to_width(mut s: String, width: usize) -> String {
    let w = unicode::display_width(&s);
    if w < width {
        s.push_str(&" ".repeat(width - w));
    }
    s
}
