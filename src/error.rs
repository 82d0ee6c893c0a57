use thiserror::Error;

use crate::api::MediaKind;

/// Everything that can go wrong between clicking "Generate" and getting a path back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The service answered with its own `error` text.
    #[error("{0}")]
    Server(String),

    #[error("network error calling the generator: {0}")]
    Network(String),

    #[error("generator responded with HTTP {0}")]
    Status(u16),

    #[error("failed to parse JSON from the generator: {0}")]
    Decode(String),

    #[error("response carried neither {} nor error", .0.path_field())]
    MissingArtifact(MediaKind),
}

/// Why the "Copy Link" button could not put the path on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("no browser window to reach the clipboard from")]
    NoWindow,

    #[error("could not copy the link (clipboard needs HTTPS and a click)")]
    Rejected,
}
