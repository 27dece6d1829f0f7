//! nfuse — Fuse project integration utility for NPM.
//!
//! # Usage
//!
//! ```text
//! nfuse [-f|--force] [FUSE_ARGS...]
//! ```
//!
//! Synchronizes the adjacent `package.json` dependencies into a generated
//! `NPM-Packages/<name>_modules.unoproj` bundle project, then forwards any
//! remaining arguments to the external `fuse` build tool. With no
//! arguments the sync still runs but no build is launched.
//!
//! Exit code: 1 on a missing manifest or any pipeline failure; otherwise
//! `fuse`'s own exit code (0 when `fuse` was not launched).

mod fuse;

use std::env;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use nfuse_sync::{pipeline, PipelineContext, SyncOutcome};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "nfuse",
    version,
    about = "Fuse project integration utility for NPM. Creates a Uno project \
             and Uno source to ease the use of NPM packages in Fuse projects \
             based on an adjacent package.json.",
    long_about = None,
)]
struct Cli {
    /// Force a reconstruction of the package project.
    #[arg(short = 'f', long)]
    force: bool,

    /// Arguments forwarded verbatim to the `fuse` build tool.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    build_args: Vec<String>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("cannot determine working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = match PipelineContext::from_dir(&cwd) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match pipeline::run(&ctx, cli.force) {
        Ok(outcome) => print_outcome(&ctx, &outcome),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }

    // The build tool runs on every non-fatal path, rebuild or not.
    match fuse::run(&cli.build_args) {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(code)) => {
            println!("fuse exited with code {code}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_outcome(ctx: &PipelineContext, outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Skipped => {
            println!(
                "{} '{}' — dependencies unchanged, nothing to do",
                "✓".green(),
                ctx.project_name
            );
        }
        SyncOutcome::Rebuilt {
            dependencies,
            includes,
        } => {
            println!(
                "{} '{}' synced ({} dependencies, {} includes)",
                "✓".green(),
                ctx.project_name,
                dependencies,
                includes
            );
        }
    }
}
