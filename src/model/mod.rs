pub mod config;
pub mod rows;

pub use config::*;
pub use rows::*;
