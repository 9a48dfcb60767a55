//! User configuration: tool locations, overwrite policy and logging.
//!
//! Read from a JSON file, then overridden by `REELCUT_*` environment
//! variables. A missing file means defaults.

use reelcut_core::{ReelcutError, Result};
use reelcut_media::{PlannerOptions, ToolPaths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REELCUT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit ffmpeg binary; discovered when unset.
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub ffplay: Option<PathBuf>,
    /// Replace existing outputs instead of failing the step.
    pub overwrite: bool,
    /// Where file lists and intermediate clips are written.
    pub scratch_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ffmpeg: None,
            ffprobe: None,
            ffplay: None,
            overwrite: false,
            scratch_dir: PathBuf::from("."),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reelcut")
            .join("config.json")
    }

    /// Load from `$REELCUT_CONFIG` or the default path, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_path);

        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ReelcutError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            ReelcutError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Apply `REELCUT_FFMPEG`, `REELCUT_FFPROBE`, `REELCUT_FFPLAY` and
    /// `REELCUT_OVERWRITE` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup("REELCUT_FFMPEG") {
            self.ffmpeg = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("REELCUT_FFPROBE") {
            self.ffprobe = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("REELCUT_FFPLAY") {
            self.ffplay = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup("REELCUT_OVERWRITE") {
            self.overwrite = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ReelcutError::Config(format!(
                        "REELCUT_OVERWRITE must be true or false, got '{other}'"
                    )))
                }
            };
        }
        Ok(())
    }

    /// Tool paths with configured overrides applied over discovery.
    pub fn tool_paths(&self) -> ToolPaths {
        let mut tools = ToolPaths::discover();
        if let Some(path) = &self.ffmpeg {
            tools.ffmpeg = path.clone();
        }
        if let Some(path) = &self.ffprobe {
            tools.ffprobe = path.clone();
        }
        if let Some(path) = &self.ffplay {
            tools.ffplay = path.clone();
        }
        tools
    }

    pub fn planner_options(&self) -> PlannerOptions {
        PlannerOptions {
            scratch_dir: self.scratch_dir.clone(),
            overwrite: self.overwrite,
            ..PlannerOptions::default()
        }
    }
}
