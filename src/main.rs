use clap::Parser;
use mailcell::cli::commands::Cli;
use mailcell::cli::handlers;
use mailcell::logging::{self, Sink};

fn main() {
    let cli = Cli::parse();

    let config = match handlers::load_cli_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let _guard = match logging::init_tracing(&config.log, Sink::File) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            let file = handlers::rows_path(&cli);
            if let Err(e) = mailcell::tui::run(&file, config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            // Logging is best-effort for one-shot commands
            if let Err(e) = logging::init_tracing(&config.log, Sink::Stderr) {
                eprintln!("warning: {}", e);
            }
            if let Err(e) = handlers::dispatch(cli, config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
