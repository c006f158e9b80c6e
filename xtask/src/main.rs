// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Bare-metal target of the ESP32-P4 HP core.
pub const FIRMWARE_TARGET: &str = "riscv32imafc-unknown-none-elf";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "2D-DMA reset controller development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check host and no_std firmware builds, clippy and formatting
    Check {
        /// Skip the firmware target check (target not installed)
        #[arg(long)]
        host_only: bool,
    },
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { host_only } => check::run(host_only),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
    }
}
