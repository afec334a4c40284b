//! Runner error types.

use thiserror::Error;

/// Errors surfaced by the runner's serve and client entry points.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Transport or listener I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Device configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Protocol-level failure while building script frames.
    #[error("protocol error: {0}")]
    Protocol(#[from] thermoreg_protocol::ProtocolError),

    /// The device closed the connection while a reply was expected.
    #[error("device closed the connection mid-script")]
    UnexpectedHangup,

    /// Command line arguments failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience result type for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;
