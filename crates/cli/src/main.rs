// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tp - drive the timepiece timers from the command line

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, simulate};

#[derive(Parser)]
#[command(
    name = "tp",
    version,
    about = "Timepiece - frame timing, schedules and periodic reports"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated frame loop and report its timings
    Simulate(simulate::SimulateArgs),
    /// Print the effective configuration
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Simulate(args) => simulate::simulate(args),
        Commands::Config(args) => config::config(args),
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
