use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::rows::Row;
use crate::parse::parse_rows;

/// Recipients file read when none is given
pub const DEFAULT_ROWS_FILE: &str = "recipients.txt";

/// Error type for reading recipients files
#[derive(Debug, thiserror::Error)]
pub enum RowsError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read and parse a recipients file. Parse warnings are logged, not fatal.
pub fn read_rows(path: &Path) -> Result<Vec<Row>, RowsError> {
    let text = fs::read_to_string(path).map_err(|e| RowsError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (rows, warnings) = parse_rows(&text);
    for w in &warnings {
        warn!(file = %path.display(), line = w.line, "{}", w.message);
    }
    Ok(rows)
}
