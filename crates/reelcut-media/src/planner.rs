//! Turns a validated [`Operation`] into an [`InvocationPlan`].
//!
//! Every precondition (file existence, time-code syntax, ranges) is checked
//! before the first invocation is composed, so a failed plan has no side
//! effects. The only external call made while planning is the duration probe
//! used by Split.

use reelcut_core::{parse_duration, Duration, Operation, ReelcutError, Result, MEDIA_EXTENSIONS};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::plan::{Invocation, InvocationPlan, ScratchArtifact};
use crate::probe::DurationProbe;
use crate::scratch::{concat_list, scratch_path};
use crate::tools::Tool;

/// Planner settings.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Directory for file lists and intermediate clips, relative to the
    /// working directory unless absolute.
    pub scratch_dir: PathBuf,
    /// Overwrite existing outputs (`-y`) instead of failing (`-n`).
    pub overwrite: bool,
    /// File-name suffixes treated as media when scanning folders.
    pub media_extensions: Vec<String>,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from("."),
            overwrite: false,
            media_extensions: MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Builds invocation plans for edit operations.
pub struct Planner<P> {
    options: PlannerOptions,
    probe: P,
}

impl<P: DurationProbe> Planner<P> {
    pub fn new(options: PlannerOptions, probe: P) -> Self {
        Self { options, probe }
    }

    /// Plan `operation`, checking all of its preconditions first.
    pub fn plan(&self, operation: &Operation) -> Result<InvocationPlan> {
        let plan = match operation {
            Operation::Trim {
                input,
                start,
                end,
                output,
            } => self.plan_trim(input, start, end, output)?,
            Operation::Concatenate { inputs, output } => self.plan_concat(inputs, output)?,
            Operation::ConcatenateFolder { folder, output } => {
                self.plan_concat_folder(folder, output)?
            }
            Operation::AddAudio {
                video,
                audio,
                output,
            } => self.plan_add_audio(video, audio, output)?,
            Operation::Fade {
                first,
                second,
                output,
                seconds,
            } => self.plan_fade(first, second, output, *seconds)?,
            Operation::Split { input, chunk } => self.plan_split(input, chunk)?,
            Operation::Play { input } => self.plan_play(input)?,
            Operation::PlayFolder { folder } => self.plan_play_folder(folder)?,
        };

        debug!(
            operation = operation.name(),
            steps = plan.len(),
            scratch = plan.scratch().len(),
            "Planned operation"
        );
        Ok(plan)
    }

    fn plan_trim(&self, input: &Path, start: &str, end: &str, output: &Path) -> Result<InvocationPlan> {
        require_file(input)?;
        let start = parse_duration(start)?;
        let end = parse_duration(end)?;
        if end <= start {
            return Err(ReelcutError::InvalidTimeRange { start, end });
        }

        let mut plan = InvocationPlan::new();
        plan.push_producing(self.trim(input, start, end, output), output);
        Ok(plan)
    }

    fn plan_concat(&self, inputs: &[PathBuf], output: &Path) -> Result<InvocationPlan> {
        if inputs.len() < 2 {
            return Err(ReelcutError::InvalidParameter(format!(
                "concat needs at least two inputs, got {}",
                inputs.len()
            )));
        }
        for input in inputs {
            require_file(input)?;
        }

        let mut plan = InvocationPlan::new();
        self.push_concat(&mut plan, inputs, output)?;
        Ok(plan)
    }

    fn plan_concat_folder(&self, folder: &Path, output: &Path) -> Result<InvocationPlan> {
        let inputs = self.list_media(folder)?;

        let mut plan = InvocationPlan::new();
        self.push_concat(&mut plan, &inputs, output)?;
        Ok(plan)
    }

    fn plan_add_audio(&self, video: &Path, audio: &Path, output: &Path) -> Result<InvocationPlan> {
        require_file(video)?;
        require_file(audio)?;

        let invocation = self
            .ffmpeg()
            .arg("-i")
            .arg(video)
            .arg("-i")
            .arg(audio)
            .args(["-map", "0:v:0", "-map", "1:a:0"])
            .args(["-c:v", "copy", "-c:a", "aac", "-shortest"])
            .arg(output);

        let mut plan = InvocationPlan::new();
        plan.push_producing(invocation, output);
        Ok(plan)
    }

    fn plan_fade(&self, first: &Path, second: &Path, output: &Path, seconds: i64) -> Result<InvocationPlan> {
        require_file(first)?;
        require_file(second)?;
        if seconds < 0 {
            return Err(ReelcutError::InvalidParameter(format!(
                "fade duration must not be negative, got {seconds}"
            )));
        }

        let extension = output
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("mp4");
        let faded_out = self.scratch_file("fade-out", extension)?;
        let faded_in = self.scratch_file("fade-in", extension)?;

        let mut plan = InvocationPlan::new();
        plan.add_scratch(ScratchArtifact::Intermediate {
            path: faded_out.clone(),
        });
        plan.add_scratch(ScratchArtifact::Intermediate {
            path: faded_in.clone(),
        });

        plan.push(self.fade(first, "out", seconds, &faded_out));
        plan.push(self.fade(second, "in", seconds, &faded_in));
        self.push_concat(&mut plan, &[faded_out, faded_in], output)?;
        Ok(plan)
    }

    /// Chunks cover the probed duration rounded up to whole seconds, so the
    /// last end time can pass the probed value by less than one second.
    fn plan_split(&self, input: &Path, chunk: &str) -> Result<InvocationPlan> {
        require_file(input)?;
        let chunk = parse_duration(chunk)?;
        if chunk.is_zero() {
            return Err(ReelcutError::InvalidParameter(
                "split chunk duration must be greater than zero".to_string(),
            ));
        }

        let reported = self.probe.duration_seconds(input)?;
        let total = Duration::from_seconds_ceil(reported).ok_or_else(|| {
            ReelcutError::ExternalToolFailure {
                tool: Tool::Ffprobe.to_string(),
                reason: format!("invalid duration {reported}"),
            }
        })?;
        if total.is_zero() {
            return Err(ReelcutError::InvalidParameter(format!(
                "{} has zero duration",
                input.display()
            )));
        }
        debug!(total = %total, chunk = %chunk, "Splitting");

        let mut plan = InvocationPlan::new();
        let mut start = Duration::ZERO;
        let mut part = 1;
        while start < total {
            let end = start.saturating_add(chunk).min(total);
            let output = part_path(input, part);
            plan.push_producing(self.trim(input, start, end, &output), output);
            start = end;
            part += 1;
        }
        Ok(plan)
    }

    fn plan_play(&self, input: &Path) -> Result<InvocationPlan> {
        require_file(input)?;

        let mut plan = InvocationPlan::new();
        plan.push(play(input));
        Ok(plan)
    }

    fn plan_play_folder(&self, folder: &Path) -> Result<InvocationPlan> {
        let inputs = self.list_media(folder)?;

        let mut plan = InvocationPlan::new();
        for input in &inputs {
            plan.push(play(input));
        }
        Ok(plan)
    }

    // ── Invocation builders ─────────────────────────────────────

    fn ffmpeg(&self) -> Invocation {
        Invocation::new(Tool::Ffmpeg).arg(if self.options.overwrite { "-y" } else { "-n" })
    }

    fn trim(&self, input: &Path, start: Duration, end: Duration, output: &Path) -> Invocation {
        self.ffmpeg()
            .arg("-i")
            .arg(input)
            .arg("-ss")
            .arg(start.to_string())
            .arg("-to")
            .arg(end.to_string())
            .args(["-c", "copy"])
            .arg(output)
    }

    fn fade(&self, input: &Path, direction: &str, seconds: i64, output: &Path) -> Invocation {
        self.ffmpeg()
            .arg("-i")
            .arg(input)
            .arg("-vf")
            .arg(format!("fade=t={direction}:st=0:d={seconds}"))
            .arg(output)
    }

    /// A fresh scratch path under the absolute scratch directory.
    fn scratch_file(&self, label: &str, extension: &str) -> Result<PathBuf> {
        Ok(scratch_path(&absolute(&self.options.scratch_dir)?, label, extension))
    }

    fn push_concat(&self, plan: &mut InvocationPlan, inputs: &[PathBuf], output: &Path) -> Result<()> {
        // The concat demuxer resolves relative entries against the list's own
        // directory, not ours.
        let entries = inputs
            .iter()
            .map(|input| absolute(input))
            .collect::<Result<Vec<_>>>()?;
        let list = self.scratch_file("concat", "txt")?;
        let invocation = self
            .ffmpeg()
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(&list)
            .args(["-c", "copy"])
            .arg(output);

        plan.add_scratch(ScratchArtifact::FileList {
            path: list,
            contents: concat_list(&entries),
        });
        plan.push_producing(invocation, output);
        Ok(())
    }

    /// Media files directly inside `folder`, sorted by name.
    fn list_media(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(ReelcutError::MissingFile(folder.to_path_buf()));
        }

        let mut media = Vec::new();
        for entry in std::fs::read_dir(folder)? {
            let path = entry?.path();
            if path.is_file() && self.is_media(&path) {
                media.push(path);
            }
        }
        if media.is_empty() {
            return Err(ReelcutError::NoMediaFound(folder.to_path_buf()));
        }

        media.sort();
        Ok(media)
    }

    fn is_media(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.options
            .media_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }
}

fn play(input: &Path) -> Invocation {
    Invocation::new(Tool::Ffplay).arg("-autoexit").arg(input)
}

/// `path` joined onto the working directory unless already absolute, with
/// `.` components dropped.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let mut resolved = std::env::current_dir()?;
    for component in path.components() {
        if component != Component::CurDir {
            resolved.push(component);
        }
    }
    Ok(resolved)
}

fn require_file(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ReelcutError::MissingFile(path.to_path_buf()))
    }
}

/// `<input without extension>_part<N>.mp4`
fn part_path(input: &Path, part: usize) -> PathBuf {
    let mut name = input.with_extension("").into_os_string();
    name.push(format!("_part{part}.mp4"));
    PathBuf::from(name)
}
