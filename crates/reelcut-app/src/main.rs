//! reelcut - trim, join, fade, split and play videos with FFmpeg
//!
//! Entry point: parse arguments, plan the requested operation, run it.

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use reelcut_core::{Operation, ReelcutError};
use reelcut_media::{Executor, FfprobeDuration, Planner, SystemRunner};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::Cli;
use crate::config::Config;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are reported through clap's error path too.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let operation = cli.command.into_operation();
    match run(&operation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(operation: &Operation) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    init_logging(&config.log_level)?;

    info!(operation = operation.name(), "reelcut starting");

    let tools = config.tool_paths();
    let planner = Planner::new(
        config.planner_options(),
        FfprobeDuration::new(tools.ffprobe.clone()),
    );
    let plan = planner.plan(operation)?;

    let mut executor = Executor::new(SystemRunner::new(tools));
    let report = executor.execute(&plan)?;
    info!(
        steps = report.steps_run,
        outputs = report.outputs.len(),
        "{} finished",
        operation.name()
    );
    Ok(())
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log level '{default_level}'"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// 1 for usage and validation errors, 2 for anything that failed while running.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ReelcutError>()
        .map(ReelcutError::exit_code)
        .unwrap_or(2)
}
