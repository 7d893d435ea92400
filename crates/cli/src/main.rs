mod cli;
mod pipeline;

use clap::Parser;
use cli::{Cli, ResolvedCommand};
use owo_colors::OwoColorize;
use pipeline::{dump_file, run_file};
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("EMBER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.resolve_command() {
        ResolvedCommand::DumpIr { input } => dump_file(&input),
        ResolvedCommand::Run {
            input,
            config,
            json,
        } => run_file(&input, config, json),
    };

    if let Err(error) = result {
        if !error.is_reported() {
            eprintln!("{}: {}", format!("{} error", error.stage()).bold().red(), error);
        }
        process::exit(1);
    }
}
