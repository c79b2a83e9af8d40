//! Talent data tools.
//!
//! Run with: `cargo run -p talent-cli -- <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Points, Talents, Validate};

/// Inspect talent catalogues and character builds
#[derive(Parser)]
#[command(name = "talents")]
#[command(about = "Talent catalogue and build tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load and validate a talent catalogue
    Validate(Validate),

    /// Print the level → talent point table
    Points(Points),

    /// Build a character and print its aggregated bonuses
    Inspect(Inspect),

    /// List catalogue entries and the keys they grant
    Talents(Talents),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for TALENT_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate(cmd) => cmd.execute(),
        Command::Points(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
        Command::Talents(cmd) => cmd.execute(),
    }
}
