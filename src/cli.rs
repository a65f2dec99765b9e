use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediagrab")]
#[command(author, version, about = "Ranged media downloader and lossless container tool")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a resource with parallel byte-range requests
    Fetch {
        /// URL to download
        #[arg(required = true)]
        url: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Expected size in bytes, cross-checked after the download
        #[arg(long)]
        expect_size: Option<u64>,

        /// MIME type of the resource, cross-checked against the output
        /// extension
        #[arg(long)]
        mime: Option<String>,
    },

    /// Copy a file into another container format without re-encoding
    Remux {
        /// Input media file
        #[arg(required = true)]
        input: PathBuf,

        /// Output file; the container format follows its extension
        #[arg(required = true)]
        output: PathBuf,
    },

    /// Extract a time window into a standalone file
    Clip {
        /// Input media file
        #[arg(required = true)]
        input: PathBuf,

        /// Output file; the container format follows its extension
        #[arg(required = true)]
        output: PathBuf,

        /// Window start, in seconds
        #[arg(long, default_value = "0")]
        start: f64,

        /// Window end, in seconds (omit to run to the end of the file)
        #[arg(long)]
        end: Option<f64>,
    },

    /// Cut a file into consecutive same-length clips
    Split {
        /// Input media file
        #[arg(required = true)]
        input: PathBuf,

        /// Total duration of the input, in seconds
        #[arg(long)]
        duration: u64,

        /// Length of each clip, in seconds
        #[arg(long)]
        clip_len: u64,

        /// Seconds to ignore from the start
        #[arg(long, default_value = "0")]
        skip_start: u64,

        /// Seconds to ignore from the end
        #[arg(long, default_value = "0")]
        skip_end: u64,
    },

    /// Combine a video-only and an audio-only file into one
    Mux {
        /// Input carrying the video stream
        #[arg(required = true)]
        video: PathBuf,

        /// Input carrying the audio stream
        #[arg(required = true)]
        audio: PathBuf,

        /// Output file; the container format follows its extension
        #[arg(required = true)]
        output: PathBuf,
    },

    /// Download a video-only and an audio-only URL and mux them
    FetchMux {
        /// URL of the video-only resource
        #[arg(long)]
        video_url: String,

        /// MIME type of the video resource, used to name its temp file
        #[arg(long)]
        video_mime: Option<String>,

        /// URL of the audio-only resource
        #[arg(long)]
        audio_url: String,

        /// MIME type of the audio resource, used to name its temp file
        #[arg(long)]
        audio_mime: Option<String>,

        /// Output file; the container format follows its extension
        #[arg(short, long)]
        output: PathBuf,

        /// Stem used to name the temporary downloads
        #[arg(long, default_value = "mediagrab")]
        stem: String,
    },
}
