//! The edit operations a single reelcut run can perform.
//!
//! Durations are carried as the text the user typed; the planner parses
//! them so that malformed input surfaces as a planning error.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One requested edit. Each run performs exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Cut `[start, end)` out of `input` with stream copy.
    Trim {
        input: PathBuf,
        start: String,
        end: String,
        output: PathBuf,
    },
    /// Join `inputs` in order.
    Concatenate {
        inputs: Vec<PathBuf>,
        output: PathBuf,
    },
    /// Join every media file found in `folder`.
    ConcatenateFolder { folder: PathBuf, output: PathBuf },
    /// Replace the audio of `video` with `audio`.
    AddAudio {
        video: PathBuf,
        audio: PathBuf,
        output: PathBuf,
    },
    /// Fade `first` out and `second` in, then join them.
    Fade {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
        seconds: i64,
    },
    /// Cut `input` into consecutive chunks of `chunk` length.
    Split { input: PathBuf, chunk: String },
    Play { input: PathBuf },
    PlayFolder { folder: PathBuf },
}

impl Operation {
    /// Canonical command name, as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trim { .. } => "trim",
            Self::Concatenate { .. } => "concat",
            Self::ConcatenateFolder { .. } => "concat_folder",
            Self::AddAudio { .. } => "add_audio",
            Self::Fade { .. } => "fade",
            Self::Split { .. } => "split",
            Self::Play { .. } => "play",
            Self::PlayFolder { .. } => "play_all",
        }
    }

}
