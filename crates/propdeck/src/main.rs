mod app;
mod banner;
mod cli;
mod commands;
mod config;
mod engine;
mod loader;
mod proposal;
mod render;
mod theme;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(err) = cli.run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
