use camo_tracker::cli::commands::Cli;
use camo_tracker::cli::handlers;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // No subcommand launches the TUI
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
