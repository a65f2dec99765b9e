//! Error types for mediagrab-fetch.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while probing or downloading a resource.
///
/// Nothing here retries; retry policy, if any, belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The metadata probe request failed at the transport level.
    #[error("probe failed: {source}")]
    Probe {
        #[source]
        source: reqwest::Error,
    },

    /// A response carried a status other than 200 or 206.
    #[error("unexpected response code: {status}{}", part_suffix(*part))]
    UnexpectedStatus { status: u16, part: Option<usize> },

    /// The transport failed while a request or body read was in flight.
    #[error("transport error{}: {source}", part_suffix(*part))]
    Transport {
        part: Option<usize>,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The download was canceled by an explicit cancel request.
    #[error("download canceled")]
    Canceled,
}

impl Error {
    /// Create an unexpected-status error, optionally naming the part.
    pub fn unexpected_status(status: u16, part: Option<usize>) -> Self {
        Self::UnexpectedStatus { status, part }
    }

    /// Create a transport error, optionally naming the part.
    pub fn transport(part: Option<usize>, source: reqwest::Error) -> Self {
        Self::Transport { part, source }
    }
}

fn part_suffix(part: Option<usize>) -> String {
    match part {
        Some(index) => format!(" (part {index})"),
        None => String::new(),
    }
}
