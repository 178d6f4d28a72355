//! Compatibility bridge for the Rust `log` crate.
//!
//! `LeLogger` implements `log::Log`, so an application can route its `log`
//! macros straight to the collector. Records emitted by this crate itself
//! (reconnect warnings, dropped-frame notices) are refused: forwarding them
//! would re-enter the write lock that is already held while they are logged.

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::{connection::Dialer, frame::FrameMode, logger::LeLogger};

const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn is_enabled_by_global_max(level: log::Level) -> bool {
    log::max_level() >= level.to_level_filter()
}

/// Render a `log` record as the payload of one frame.
pub(crate) fn render_record(record: &Record<'_>, frame_mode: FrameMode) -> String {
    let mut line = format!("{} {} {}", record.level(), record.target(), record.args());
    if frame_mode == FrameMode::Raw {
        line.push('\n');
    }
    line
}

impl<D: Dialer> log::Log for LeLogger<D> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        is_enabled_by_global_max(metadata.level()) && !is_own_target(metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let payload = render_record(record, self.frame_mode());
        // Errors cannot be reported through the logger that failed.
        let _ = self.output(&payload);
    }

    fn flush(&self) {}
}

/// Install `logger` as the global `log` backend and set the maximum level.
///
/// Fails when another global logger is already registered.
pub fn install<D: Dialer>(
    logger: &'static LeLogger<D>,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
