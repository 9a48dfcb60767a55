//! Reelcut Core - Foundation types for the reelcut editing tool
//!
//! This crate provides the types shared by the planner and the CLI:
//! - Time-code parsing and canonical formatting (Duration)
//! - The edit operations a run can request (Operation)
//! - The error taxonomy and exit-code policy (ReelcutError)

pub mod error;
pub mod operation;
pub mod time;

pub use error::{ReelcutError, Result};
pub use operation::Operation;
pub use time::{format_duration, parse_duration, Duration};

/// Extensions recognized as media when scanning a folder.
pub const MEDIA_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov"];
