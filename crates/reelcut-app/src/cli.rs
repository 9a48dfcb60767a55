//! Command-line definition.
//!
//! Every command takes positional arguments only. The parsed command is
//! turned into an [`Operation`] here; validation of paths and times is left
//! to the planner.

use clap::{Parser, Subcommand};
use reelcut_core::Operation;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "reelcut",
    version,
    about = "Trim, join, fade, split and play videos with FFmpeg",
    after_help = "Times are MM:SS or HH:MM:SS. Folder commands use .mp4, .avi and .mov files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cut the section between two times without re-encoding
    Trim {
        file: PathBuf,
        start: String,
        end: String,
        output: PathBuf,
    },

    /// Join two or more files; the last argument is the output
    #[command(visible_alias = "cat")]
    Concat {
        #[arg(value_name = "FILE", num_args = 3.., required = true)]
        files: Vec<PathBuf>,
    },

    /// Join every media file in a folder, in name order
    #[command(name = "concat_folder", visible_alias = "concat-folder")]
    ConcatFolder { folder: PathBuf, output: PathBuf },

    /// Replace a video's audio track
    #[command(name = "add_audio", visible_alias = "add-audio")]
    AddAudio {
        video: PathBuf,
        audio: PathBuf,
        output: PathBuf,
    },

    /// Fade the first file out and the second in, then join them
    Fade {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
        /// Fade length in whole seconds
        #[arg(allow_negative_numbers = true)]
        duration: i64,
    },

    /// Cut a file into consecutive parts of the given length
    Split {
        file: PathBuf,
        chunk_duration: String,
    },

    /// Play a file
    Play { file: PathBuf },

    /// Play every media file in a folder, in name order
    #[command(name = "play_all", visible_alias = "play-all")]
    PlayAll { folder: PathBuf },
}

impl Commands {
    pub fn into_operation(self) -> Operation {
        match self {
            Commands::Trim {
                file,
                start,
                end,
                output,
            } => Operation::Trim {
                input: file,
                start,
                end,
                output,
            },
            Commands::Concat { mut files } => {
                // clap guarantees at least three values.
                let output = files.pop().unwrap_or_default();
                Operation::Concatenate {
                    inputs: files,
                    output,
                }
            }
            Commands::ConcatFolder { folder, output } => {
                Operation::ConcatenateFolder { folder, output }
            }
            Commands::AddAudio {
                video,
                audio,
                output,
            } => Operation::AddAudio {
                video,
                audio,
                output,
            },
            Commands::Fade {
                first,
                second,
                output,
                duration,
            } => Operation::Fade {
                first,
                second,
                output,
                seconds: duration,
            },
            Commands::Split {
                file,
                chunk_duration,
            } => Operation::Split {
                input: file,
                chunk: chunk_duration,
            },
            Commands::Play { file } => Operation::Play { input: file },
            Commands::PlayAll { folder } => Operation::PlayFolder { folder },
        }
    }
}
