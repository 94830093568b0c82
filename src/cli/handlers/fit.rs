use crate::cli::commands::FitArgs;
use crate::cli::output::{fit_to_json, format_fit_summary};
use crate::model::Config;

use super::fit_once;

pub fn cmd_fit(args: FitArgs, mut config: Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(reserve) = args.reserve {
        if reserve < 0.0 {
            return Err("--reserve must not be negative".into());
        }
        config.cell.reserve_width = reserve;
    }
    if let Some(mode) = args.measure {
        config.measure.mode = mode.into();
    }
    if let Some(char_width) = args.char_width {
        if char_width <= 0.0 {
            return Err("--char-width must be positive".into());
        }
        config.measure.char_width = char_width;
    }

    let cell = fit_once(args.emails, args.width, &config);
    let fit = fit_to_json(&cell);

    if json {
        println!("{}", serde_json::to_string_pretty(&fit)?);
        return Ok(());
    }

    println!("{}", cell.layout().plain());
    if !cell.is_placeholder() {
        println!("{}", format_fit_summary(&fit));
    }
    Ok(())
}
