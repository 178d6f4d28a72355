//! Streaming client for token-based log collectors.
//!
//! [`LeLogger`] holds one persistent TCP or TLS connection to a collector and
//! sends every log call as a single frame: `<token> <prefix> <payload>`. The
//! connection is reopened transparently after a failure, either by retrying
//! a failed write once or by probing the socket before each write (see
//! [`ReconnectStrategy`]).
//!
//! ```rust,no_run
//! use logentries::LeLogger;
//!
//! # fn main() -> Result<(), logentries::LeError> {
//! let logger = LeLogger::connect("2bfbea1e-10c3-4419-bdad-7e6435882e1f")?;
//! logger.set_prefix("worker-3");
//! logger.println("job finished")?;
//! logger.close()?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
mod error;
pub mod frame;
#[cfg(feature = "log-compat")]
pub mod log_compat;
mod logger;
pub mod logging_macros;
pub mod rate_limited_warner;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use connection::{
    ActiveConnection, ConnectionManager, Dialer, Endpoint, EndpointDialer, Liveness,
    ReconnectStrategy, TlsOptions, Transport,
};
pub use error::LeError;
pub use frame::FrameMode;
pub use logger::{Fatal, LeLogger, LeLoggerBuilder};
