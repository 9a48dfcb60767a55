//! Reelcut Media - FFmpeg orchestration for reelcut
//!
//! This crate handles:
//! - Locating the ffmpeg, ffprobe and ffplay binaries
//! - Planning argument vectors for each edit operation
//! - Scratch file lists and intermediate clips
//! - Running a plan step by step with guaranteed scratch cleanup

pub mod executor;
pub mod plan;
pub mod planner;
pub mod probe;
pub mod scratch;
pub mod tools;

pub use executor::{ExecutionReport, Executor, SystemRunner, ToolRunner};
pub use plan::{Invocation, InvocationPlan, ScratchArtifact, Step};
pub use planner::{Planner, PlannerOptions};
pub use probe::{DurationProbe, FfprobeDuration};
pub use scratch::{concat_list, ScratchGuard};
pub use tools::{Tool, ToolPaths};
