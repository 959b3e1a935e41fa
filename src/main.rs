//! Vigil CLI — portable file integrity monitoring.

use clap::Parser;

fn main() {
    let cli = vigil::cli::Cli::parse();
    let _logger = match vigil::cli::logging::init_logging(&cli.log_level) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    if let Err(e) = vigil::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
