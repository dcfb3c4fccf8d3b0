//! Error types for the switchboard

use thiserror::Error;

/// Errors that can occur while operating a switchboard
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// A claim named a source that was never registered
    #[error("unknown source: {0}")]
    UnknownSource(String),

    /// Two sources were registered under the same name
    #[error("duplicate source name: {0}")]
    DuplicateSource(String),

    /// A pull task failed for a reason other than exhaustion
    #[error("pull for source `{name}` failed")]
    PullFailed {
        /// Name the source was registered under
        name: String,
        /// The underlying task failure (panic or abort)
        #[source]
        cause: tokio::task::JoinError,
    },
}
