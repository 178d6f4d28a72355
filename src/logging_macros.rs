//! `format!`-style macros over the [`LeLogger`](crate::LeLogger) entry points.
//!
//! Each macro takes the logger first, followed by the usual format string
//! and arguments.
//!
//! # Examples
//!
//! ```rust,ignore
//! use logentries::{LeLogger, le_print, le_fatal};
//!
//! let logger = LeLogger::connect("2bfbea1e-10c3-4419-bdad-7e6435882e1f")?;
//! le_print!(logger, "server started on port {}", 8080)?;
//! le_fatal!(logger, "config file {} missing", path);
//! ```

/// Log a formatted message. Evaluates to `Result<(), LeError>`.
#[macro_export]
macro_rules! le_print {
    ($logger:expr, $($arg:tt)+) => {
        $logger.printf(::core::format_args!($($arg)+))
    };
}

/// Log a formatted message followed by a line break. Evaluates to
/// `Result<(), LeError>`.
#[macro_export]
macro_rules! le_println {
    ($logger:expr) => {
        $logger.println("")
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.println(::core::format_args!($($arg)+))
    };
}

/// Log a formatted message, then terminate the process with status 1.
#[macro_export]
macro_rules! le_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::core::format_args!($($arg)+)).exit()
    };
}

/// Log a formatted message, then panic with it.
#[macro_export]
macro_rules! le_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(::core::format_args!($($arg)+))
    };
}
