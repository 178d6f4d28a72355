//! Deferred process termination for fatal log entries.

use crate::error::LeError;

/// Result of a fatal log call.
///
/// The message has already been sent (or the attempt has failed) by the time
/// this value exists. Terminating the process is left to the caller through
/// [`Fatal::exit`], which keeps the logging path itself free of side effects
/// that cannot be observed in tests.
#[must_use = "a fatal log entry only terminates the process once `exit` is called"]
#[derive(Debug)]
pub struct Fatal {
    message: String,
    delivery: Result<(), LeError>,
}

impl Fatal {
    /// Status code passed to [`std::process::exit`].
    pub const EXIT_CODE: i32 = 1;

    pub(crate) fn new(message: String, delivery: Result<(), LeError>) -> Self {
        Self { message, delivery }
    }

    /// The message that was logged.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the message reached the transport.
    pub fn is_delivered(&self) -> bool {
        self.delivery.is_ok()
    }

    /// Error raised while sending the message, if any.
    pub fn delivery_error(&self) -> Option<&LeError> {
        self.delivery.as_ref().err()
    }

    pub fn into_parts(self) -> (String, Result<(), LeError>) {
        (self.message, self.delivery)
    }

    /// Terminate the process with [`Fatal::EXIT_CODE`], whatever the delivery
    /// outcome.
    pub fn exit(self) -> ! {
        std::process::exit(Self::EXIT_CODE)
    }
}
