use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::MeasureMode;

#[derive(Parser)]
#[command(name = "mailcell", about = concat!("mailcell v", env!("CARGO_PKG_VERSION"), " - email lists that fit their row"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./mailcell.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Recipients file (default: ./recipients.txt)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit a list of addresses into a row of the given width
    Fit(FitArgs),
    /// Print every row of the recipients file fitted to a width
    Rows(RowsArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MeasureArg {
    /// Terminal display cells
    Cells,
    /// A fixed width per character (see --char-width)
    Fixed,
}

impl From<MeasureArg> for MeasureMode {
    fn from(arg: MeasureArg) -> Self {
        match arg {
            MeasureArg::Cells => MeasureMode::Cells,
            MeasureArg::Fixed => MeasureMode::Fixed,
        }
    }
}

#[derive(Args)]
pub struct FitArgs {
    /// Available width
    #[arg(long)]
    pub width: u16,
    /// Width kept free for the badge while more addresses follow
    #[arg(long)]
    pub reserve: Option<f64>,
    /// How address widths are measured
    #[arg(long, value_enum)]
    pub measure: Option<MeasureArg>,
    /// Width per character for --measure fixed
    #[arg(long)]
    pub char_width: Option<f64>,
    /// Addresses, in display order
    #[arg(value_name = "EMAIL")]
    pub emails: Vec<String>,
}

#[derive(Args)]
pub struct RowsArgs {
    /// Width of the address column in cells
    #[arg(long)]
    pub width: u16,
}
