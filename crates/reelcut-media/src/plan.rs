//! Invocation plans: what to run, in which order, and which scratch files
//! must exist while it runs.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::tools::Tool;

/// One external process: a tool and its argument vector.
///
/// Arguments are passed to the process directly, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Start an invocation of `tool` with no arguments.
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Arguments as UTF-8 strings, replacing invalid sequences.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Whether any argument equals `path`.
    pub fn references(&self, path: &Path) -> bool {
        self.args.iter().any(|a| Path::new(a) == path)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool)?;
        for arg in &self.args {
            write!(f, " {:?}", arg)?;
        }
        Ok(())
    }
}

/// A planned step and the user-visible file it produces, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub invocation: Invocation,
    pub produces: Option<PathBuf>,
}

/// A temporary file that lives exactly as long as a plan's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScratchArtifact {
    /// Written before the first step runs.
    FileList { path: PathBuf, contents: String },
    /// Produced by one step and consumed by a later one.
    Intermediate { path: PathBuf },
}

impl ScratchArtifact {
    pub fn path(&self) -> &Path {
        match self {
            Self::FileList { path, .. } | Self::Intermediate { path } => path,
        }
    }
}

/// Ordered external invocations plus the scratch files they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationPlan {
    steps: Vec<Step>,
    scratch: Vec<ScratchArtifact>,
}

impl InvocationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step that produces no reported output.
    pub fn push(&mut self, invocation: Invocation) {
        self.steps.push(Step {
            invocation,
            produces: None,
        });
    }

    /// Append a step whose output is reported once it succeeds.
    pub fn push_producing(&mut self, invocation: Invocation, output: impl Into<PathBuf>) {
        self.steps.push(Step {
            invocation,
            produces: Some(output.into()),
        });
    }

    pub fn add_scratch(&mut self, artifact: ScratchArtifact) {
        self.scratch.push(artifact);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn scratch(&self) -> &[ScratchArtifact] {
        &self.scratch
    }

    /// Invocations in execution order.
    pub fn invocations(&self) -> impl Iterator<Item = &Invocation> {
        self.steps.iter().map(|s| &s.invocation)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
