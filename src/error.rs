//! Crate-level error type used by the request loop and the binary. Rejected requests and
//! unreachable goals are reported and skipped by the loop, so only stream and setup failures
//! appear here.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error on the request or answer streams
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Signal handler registration failed
    #[error("failed to register signal handler: {0}")]
    Signal(std::io::Error),
}
