//! Runs an [`InvocationPlan`] one step at a time.
//!
//! Scratch files are acquired before the first step and released when
//! [`Executor::execute`] returns, on success and on failure alike.

use reelcut_core::{ReelcutError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

use crate::plan::{Invocation, InvocationPlan};
use crate::scratch::ScratchGuard;
use crate::tools::ToolPaths;

/// Launches a single external process and waits for it to finish.
pub trait ToolRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// [`ToolRunner`] that spawns the real binaries, inheriting stdio.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    tools: ToolPaths,
}

impl SystemRunner {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }
}

impl ToolRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        let program = self.tools.path(invocation.tool);
        debug!(program = %program.display(), "Spawning {}", invocation);

        let status = Command::new(program)
            .args(&invocation.args)
            .status()
            .map_err(|e| ReelcutError::ExternalToolFailure {
                tool: invocation.tool.to_string(),
                reason: format!("failed to launch {}: {e}", program.display()),
            })?;

        if !status.success() {
            return Err(ReelcutError::ExternalToolFailure {
                tool: invocation.tool.to_string(),
                reason: format!("exited with {status}"),
            });
        }
        Ok(())
    }
}

/// What a completed plan did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Number of steps that ran to completion.
    pub steps_run: usize,
    /// Outputs produced, in creation order.
    pub outputs: Vec<PathBuf>,
}

/// Executes plans through a [`ToolRunner`].
pub struct Executor<R> {
    runner: R,
}

impl<R: ToolRunner> Executor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Run every step in order, stopping at the first failure.
    pub fn execute(&mut self, plan: &InvocationPlan) -> Result<ExecutionReport> {
        // Held until return; dropping them deletes the scratch files.
        let _scratch = plan
            .scratch()
            .iter()
            .map(ScratchGuard::acquire)
            .collect::<Result<Vec<_>>>()?;

        let total = plan.len();
        let mut report = ExecutionReport::default();

        for (index, step) in plan.steps().iter().enumerate() {
            let number = index + 1;
            info!(step = number, total, tool = %step.invocation.tool, "Running step");

            self.runner
                .run(&step.invocation)
                .map_err(|e| annotate_step(e, number, total))?;

            report.steps_run = number;
            if let Some(output) = &step.produces {
                info!("Created {}", output.display());
                report.outputs.push(output.clone());
            }
        }

        Ok(report)
    }
}

fn annotate_step(err: ReelcutError, number: usize, total: usize) -> ReelcutError {
    match err {
        ReelcutError::ExternalToolFailure { tool, reason } => ReelcutError::ExternalToolFailure {
            tool,
            reason: format!("step {number}/{total}: {reason}"),
        },
        other => other,
    }
}
