//! Harbour Intel CLI - inspect the flags Intel compilers are driven with

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use harbour_intel::util::diagnostic::{emit, Diagnostic};
use harbour_intel::CompilerError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        if let Some(err) = e.downcast_ref::<CompilerError>() {
            emit(&err.to_diagnostic(), color);
        } else if let Some(diag) = e.downcast_ref::<Diagnostic>() {
            emit(diag, color);
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("harbour_intel=debug")
    } else {
        EnvFilter::new("harbour_intel=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Show => commands::show::execute(&cli.compiler),
        Commands::Flags(args) => commands::flags::execute(&cli.compiler, args),
        Commands::Pch(args) => commands::pch::execute(&cli.compiler, args),
        Commands::Toolset => commands::toolset::execute(&cli.compiler),
    }
}
