pub mod rows_parser;

pub use rows_parser::{parse_emails, parse_rows};
