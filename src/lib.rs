pub mod cell;
pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod parse;
pub mod tui;
pub mod util;
