//! Enroll: in-memory course registration.
//!
//! # Usage
//!
//! ```text
//! enroll                                   # same as `enroll demo`
//! enroll demo
//! enroll courses [--catalog <path>] [--json]
//! enroll run --catalog <path> [--json]
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` to see every registry call.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{courses::CoursesArgs, run::RunArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "enroll",
    version,
    about = "Register students for courses with capacity checks",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the built-in registration walkthrough (default).
    Demo,

    /// List courses and their free seats.
    Courses(CoursesArgs),

    /// Apply the operations of a YAML catalog and report each outcome.
    Run(RunArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => commands::demo::run(),
        Commands::Courses(args) => args.run(),
        Commands::Run(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
