//! vue2react: converts Vue options-object components to React class components.

mod cli;
mod config;
mod orchestrator;
mod output;
mod tracing_config;
mod writer;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_config::init_tracing(args.verbose);

    let summary = orchestrator::run(&args).into_diagnostic()?;
    if summary.failed_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
