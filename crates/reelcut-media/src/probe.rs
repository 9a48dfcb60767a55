//! Media duration queries via ffprobe.

use reelcut_core::{ReelcutError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::tools::Tool;

/// Reports the total duration of a media file in seconds.
pub trait DurationProbe {
    fn duration_seconds(&self, path: &Path) -> Result<f64>;
}

impl<T: DurationProbe + ?Sized> DurationProbe for &T {
    fn duration_seconds(&self, path: &Path) -> Result<f64> {
        (**self).duration_seconds(path)
    }
}

/// [`DurationProbe`] backed by the ffprobe binary.
#[derive(Debug, Clone)]
pub struct FfprobeDuration {
    ffprobe: PathBuf,
}

impl FfprobeDuration {
    pub fn new(ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe: ffprobe.into(),
        }
    }
}

impl DurationProbe for FfprobeDuration {
    fn duration_seconds(&self, path: &Path) -> Result<f64> {
        debug!(path = %path.display(), "Probing duration");

        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ReelcutError::ExternalToolFailure {
                tool: Tool::Ffprobe.to_string(),
                reason: format!("failed to run {}: {e}", self.ffprobe.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(stderr = %stderr, "ffprobe failed");
            return Err(ReelcutError::ExternalToolFailure {
                tool: Tool::Ffprobe.to_string(),
                reason: format!(
                    "exited with {}: {}",
                    output.status,
                    stderr.trim().chars().take(500).collect::<String>()
                ),
            });
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    // ffprobe reports durations as decimal strings.
    duration: Option<String>,
}

/// Extract `format.duration` from ffprobe's JSON output.
pub fn parse_probe_output(json: &str) -> Result<f64> {
    let failure = |reason: String| ReelcutError::ExternalToolFailure {
        tool: Tool::Ffprobe.to_string(),
        reason,
    };

    let parsed: ProbeOutput = serde_json::from_str(json)
        .map_err(|e| failure(format!("unreadable output: {e}")))?;

    let raw = parsed
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| failure("no duration reported".to_string()))?;

    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| failure(format!("invalid duration '{raw}'")))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(failure(format!("invalid duration '{raw}'")));
    }
    Ok(seconds)
}
