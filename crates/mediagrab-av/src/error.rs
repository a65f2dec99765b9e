//! Error types for mediagrab-av.

use ffmpeg_the_third as ffmpeg;
use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a container copy operation.
///
/// Every variant names the step that failed; the underlying FFmpeg error is
/// attached as the source. Partially written output files are left in place
/// for inspection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested time range is malformed (negative bound, or end
    /// before start).
    #[error("invalid time range")]
    InvalidTimeRange,

    /// A container could not be opened for reading or writing.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: ffmpeg::Error,
    },

    /// An output stream could not be created.
    #[error("failed to create output stream: {0}")]
    StreamCreation(#[source] ffmpeg::Error),

    /// Seeking the input to the window start failed.
    #[error("seek failed: {0}")]
    Seek(#[source] ffmpeg::Error),

    /// Writing the header, a packet, or the trailer failed.
    #[error("write failed: {0}")]
    Write(#[source] ffmpeg::Error),

    /// The first input of a mux carries no video stream.
    #[error("no video stream found in {}", path.display())]
    NoVideoStream { path: PathBuf },

    /// The second input of a mux carries no audio stream.
    #[error("no audio stream found in {}", path.display())]
    NoAudioStream { path: PathBuf },

    /// Any other FFmpeg library failure, e.g. while reading packets.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an open error for `path`.
    pub fn open(path: impl Into<PathBuf>, source: ffmpeg::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}
