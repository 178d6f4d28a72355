//! Error types surfaced by the logger.

use std::io;

use thiserror::Error;

/// Errors returned by [`LeLogger`](crate::LeLogger) operations.
#[derive(Debug, Error)]
pub enum LeError {
    /// Invalid user supplied configuration.
    #[error("invalid logger configuration: {0}")]
    InvalidConfig(String),
    /// Dialling or handshaking with the collector failed.
    #[error("failed to connect to log collector: {0}")]
    Connect(#[source] io::Error),
    /// Transmitting a frame failed.
    #[error("failed to write log frame: {0}")]
    Write(#[source] io::Error),
    /// Closing the transport failed. The transport is released regardless.
    #[error("failed to close log collector connection: {0}")]
    Close(#[source] io::Error),
}

impl LeError {
    /// Underlying I/O error, when there is one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            LeError::InvalidConfig(_) => None,
            LeError::Connect(err) | LeError::Write(err) | LeError::Close(err) => Some(err),
        }
    }
}

impl From<LeError> for io::Error {
    fn from(err: LeError) -> Self {
        match err {
            LeError::InvalidConfig(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            LeError::Connect(err) | LeError::Write(err) | LeError::Close(err) => err,
        }
    }
}
