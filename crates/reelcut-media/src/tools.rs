//! Locating the external FFmpeg binaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An external program a plan can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Transcoding, cutting and muxing.
    Ffmpeg,
    /// Media inspection (duration queries).
    Ffprobe,
    /// Playback on the local display.
    Ffplay,
}

impl Tool {
    /// Binary name without platform suffix.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ffmpeg => "ffmpeg",
            Self::Ffprobe => "ffprobe",
            Self::Ffplay => "ffplay",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved paths of the three FFmpeg programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub ffplay: PathBuf,
}

impl ToolPaths {
    /// Find the binaries on this system.
    ///
    /// ffmpeg comes from ffmpeg-sidecar's lookup (its download directory,
    /// else `PATH`). ffprobe and ffplay are searched on `PATH` and fall back
    /// to siblings of the ffmpeg binary.
    pub fn discover() -> Self {
        let ffmpeg = ffmpeg_sidecar::paths::ffmpeg_path();
        let ffprobe = locate(Tool::Ffprobe, &ffmpeg);
        let ffplay = locate(Tool::Ffplay, &ffmpeg);
        debug!(
            ffmpeg = %ffmpeg.display(),
            ffprobe = %ffprobe.display(),
            ffplay = %ffplay.display(),
            "Resolved FFmpeg tools"
        );
        Self {
            ffmpeg,
            ffprobe,
            ffplay,
        }
    }

    /// Plain binary names, resolved by the OS at spawn time.
    pub fn bare() -> Self {
        Self {
            ffmpeg: PathBuf::from(Tool::Ffmpeg.name()),
            ffprobe: PathBuf::from(Tool::Ffprobe.name()),
            ffplay: PathBuf::from(Tool::Ffplay.name()),
        }
    }

    /// Path of the given tool.
    pub fn path(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Ffmpeg => &self.ffmpeg,
            Tool::Ffprobe => &self.ffprobe,
            Tool::Ffplay => &self.ffplay,
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self::discover()
    }
}

fn locate(tool: Tool, ffmpeg: &Path) -> PathBuf {
    if let Ok(path) = which::which(tool.name()) {
        return path;
    }
    let file = if cfg!(windows) {
        format!("{}.exe", tool.name())
    } else {
        tool.name().to_string()
    };
    ffmpeg.with_file_name(file)
}
