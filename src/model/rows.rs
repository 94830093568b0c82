/// One line of a recipients file: a label and its addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    /// Addresses in file order. Duplicates and empty entries are kept.
    pub emails: Vec<String>,
    /// 1-based line number in the source file
    pub line: usize,
}

impl Row {
    pub fn new(label: impl Into<String>, emails: Vec<String>) -> Self {
        Row {
            label: label.into(),
            emails,
            line: 0,
        }
    }
}

/// A problem found while parsing a recipients file. Parsing never fails;
/// suspicious entries are kept and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub line: usize,
    pub message: String,
}
