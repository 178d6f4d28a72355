//! Logger facade streaming text to the collector.
//!
//! [`LeLogger`] mirrors a conventional text logger: `print`, `printf` and
//! `println` variants, `fatal*` variants that hand back a [`Fatal`] effect,
//! and `panic*` variants that log before unwinding. Every entry point reduces
//! its arguments to one string and funnels it through a single write path
//! that frames the payload and transmits it under one lock.

mod builder;
mod fatal;


use std::{
    fmt, io,
    sync::atomic::{AtomicI64, Ordering},
};

use log::{debug, warn};
// parking_lot avoids poisoning and matches crate-wide locking strategy
use parking_lot::Mutex;

use crate::{
    connection::{ConnectionManager, Dialer, EndpointDialer, ReconnectStrategy},
    error::LeError,
    frame::FrameMode,
    rate_limited_warner::RateLimitedWarner,
};

pub use builder::LeLoggerBuilder;
pub use fatal::Fatal;

/// State touched by every write. Guarded by a single mutex so one frame is
/// encoded and transmitted before the next begins.
struct WriteState<D: Dialer> {
    connection: ConnectionManager<D>,
    prefix: String,
    frame_mode: FrameMode,
    scratch: Vec<u8>,
}

/// Handle streaming log lines to a remote collector.
///
/// All operations are blocking and thread safe. Concurrent writers are
/// serialised, so frames never interleave on the wire.
pub struct LeLogger<D: Dialer = EndpointDialer> {
    token: String,
    flags: AtomicI64,
    state: Mutex<WriteState<D>>,
    drop_warner: RateLimitedWarner,
}

impl LeLogger {
    /// Connect to the hosted collector over TLS using the default strategy.
    pub fn connect(token: impl Into<String>) -> Result<Self, LeError> {
        LeLoggerBuilder::new(token).connect()
    }

    /// Start configuring a logger for `token`.
    pub fn builder(token: impl Into<String>) -> LeLoggerBuilder {
        LeLoggerBuilder::new(token)
    }
}

impl<D: Dialer> LeLogger<D> {
    pub(crate) fn from_parts(
        token: String,
        prefix: String,
        flags: i64,
        frame_mode: FrameMode,
        connection: ConnectionManager<D>,
        drop_warner: RateLimitedWarner,
    ) -> Self {
        Self {
            token,
            flags: AtomicI64::new(flags),
            state: Mutex::new(WriteState {
                connection,
                prefix,
                frame_mode,
                scratch: Vec::new(),
            }),
            drop_warner,
        }
    }

    /// Account token prefixed to every frame.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn prefix(&self) -> String {
        self.state.lock().prefix.clone()
    }

    /// Replace the prefix used by subsequent frames.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.state.lock().prefix = prefix.into();
    }

    pub fn flags(&self) -> i64 {
        self.flags.load(Ordering::Acquire)
    }

    /// Store caller-defined flags. They do not affect output.
    pub fn set_flags(&self, flags: i64) {
        self.flags.store(flags, Ordering::Release);
    }

    pub fn frame_mode(&self) -> FrameMode {
        self.state.lock().frame_mode
    }

    pub fn strategy(&self) -> ReconnectStrategy {
        self.state.lock().connection.strategy()
    }

    /// Whether a transport is currently held. This does not probe it.
    pub fn is_connected(&self) -> bool {
        self.state.lock().connection.is_connected()
    }

    /// Close the transport. Closing twice, or after a failed reconnect, is a
    /// successful no-op.
    pub fn close(&self) -> Result<(), LeError> {
        self.state.lock().connection.close()
    }

    /// Frame `payload` and send it, returning the number of bytes put on the
    /// wire.
    pub fn write(&self, payload: &[u8]) -> Result<usize, LeError> {
        self.write_frame(payload)
    }

    /// Send an already formatted message.
    pub fn output(&self, message: &str) -> Result<(), LeError> {
        self.write_frame(message.as_bytes()).map(|_| ())
    }

    pub fn print(&self, message: impl fmt::Display) -> Result<(), LeError> {
        self.output(&message.to_string())
    }

    /// Log `format_args!` output, e.g. `logger.printf(format_args!("{n} items"))`.
    pub fn printf(&self, args: fmt::Arguments<'_>) -> Result<(), LeError> {
        self.output(&fmt::format(args))
    }

    /// Log `message` followed by a line break.
    pub fn println(&self, message: impl fmt::Display) -> Result<(), LeError> {
        self.output(&format!("{message}\n"))
    }

    /// Log `message` and return the effect that terminates the process.
    pub fn fatal(&self, message: impl fmt::Display) -> Fatal {
        self.log_fatal(message.to_string())
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> Fatal {
        self.log_fatal(fmt::format(args))
    }

    pub fn fatalln(&self, message: impl fmt::Display) -> Fatal {
        self.log_fatal(format!("{message}\n"))
    }

    /// Log `message`, then panic with it even if the write failed.
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        self.log_then_panic(message.to_string())
    }

    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log_then_panic(fmt::format(args))
    }

    pub fn panicln(&self, message: impl fmt::Display) -> ! {
        self.log_then_panic(format!("{message}\n"))
    }

    fn log_fatal(&self, message: String) -> Fatal {
        let delivery = self.output(&message);
        Fatal::new(message, delivery)
    }

    fn log_then_panic(&self, message: String) -> ! {
        let _ = self.output(&message);
        panic!("{message}")
    }

    fn write_frame(&self, payload: &[u8]) -> Result<usize, LeError> {
        let result = {
            let mut guard = self.state.lock();
            let WriteState {
                connection,
                prefix,
                frame_mode,
                scratch,
            } = &mut *guard;
            frame_mode.encode_into(scratch, &self.token, prefix, payload);
            connection.transmit(scratch).map(|()| scratch.len())
        };
        if let Err(err) = &result {
            self.drop_warner.record_drop();
            self.drop_warner.warn_if_due(|count| {
                warn!("LeLogger dropped {count} frames; last error: {err}");
            });
        }
        result
    }
}

impl<D: Dialer> io::Write for &LeLogger<D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_frame(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    // One frame per `write!` call rather than one per formatted fragment.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.write_frame(fmt::format(args).as_bytes())?;
        Ok(())
    }
}

impl<D: Dialer> io::Write for LeLogger<D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        io::Write::write_fmt(&mut &*self, args)
    }
}

impl<D: Dialer> Drop for LeLogger<D> {
    fn drop(&mut self) {
        self.drop_warner.flush(|count| {
            warn!("LeLogger dropped {count} frames before shutdown");
        });
        if let Err(err) = self.state.get_mut().connection.close() {
            debug!("LeLogger: error closing connection on drop: {err}");
        }
    }
}

impl<D: Dialer> fmt::Debug for LeLogger<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LeLogger")
            .field("prefix", &state.prefix)
            .field("flags", &self.flags())
            .field("frame_mode", &state.frame_mode)
            .field("connection", &state.connection)
            .finish()
    }
}
