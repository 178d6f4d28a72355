//! Connection lifecycle: open, probe, reopen and transmit.

use log::{debug, warn};

use crate::error::LeError;

use super::{
    config::ReconnectStrategy,
    transport::{Dialer, Transport},
};

/// Owns the single transport of a logger and keeps it usable.
///
/// The manager is not internally synchronised; the owning
/// [`LeLogger`](crate::LeLogger) serialises every call behind its write lock.
pub struct ConnectionManager<D: Dialer> {
    dialer: D,
    strategy: ReconnectStrategy,
    conn: Option<D::Conn>,
}

impl<D: Dialer> ConnectionManager<D> {
    /// Create the manager and perform the first dial.
    pub fn open(dialer: D, strategy: ReconnectStrategy) -> Result<Self, LeError> {
        let mut manager = Self {
            dialer,
            strategy,
            conn: None,
        };
        manager.open_connection()?;
        Ok(manager)
    }

    pub fn strategy(&self) -> ReconnectStrategy {
        self.strategy
    }

    pub fn dialer(&self) -> &D {
        &self.dialer
    }

    /// Whether a transport handle is currently held.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the transport. Closing without a transport is a no-op.
    ///
    /// The handle is cleared even when the underlying close fails.
    pub fn close(&mut self) -> Result<(), LeError> {
        match self.conn.take() {
            Some(conn) => conn.close().map_err(LeError::Close),
            None => Ok(()),
        }
    }

    fn open_connection(&mut self) -> Result<(), LeError> {
        let conn = self.dialer.dial().map_err(LeError::Connect)?;
        self.conn = Some(conn);
        Ok(())
    }

    /// Drop the current transport and dial a replacement.
    pub fn reopen(&mut self) -> Result<(), LeError> {
        if let Err(err) = self.close() {
            debug!("ignoring error while discarding stale connection: {err}");
        }
        self.open_connection()
    }

    /// Non-blocking liveness check. A dead transport is closed and released.
    pub fn is_usable(&mut self) -> bool {
        let Some(conn) = self.conn.as_mut() else {
            return false;
        };
        let liveness = conn.probe();
        if liveness.is_alive() {
            return true;
        }
        debug!("connection failed liveness probe: {liveness:?}");
        if let Err(err) = self.close() {
            debug!("ignoring error while closing dead connection: {err}");
        }
        false
    }

    /// Reopen the transport unless the probe says it is alive.
    pub fn ensure_usable(&mut self) -> Result<(), LeError> {
        if self.is_usable() {
            return Ok(());
        }
        self.reopen()
    }

    /// Send one encoded frame according to the configured strategy.
    pub fn transmit(&mut self, frame: &[u8]) -> Result<(), LeError> {
        match self.strategy {
            ReconnectStrategy::RetryOnce => self.transmit_retry_once(frame),
            ReconnectStrategy::ProbeBeforeWrite => {
                self.ensure_usable()?;
                self.send(frame).map_err(LeError::Write)
            }
        }
    }

    fn transmit_retry_once(&mut self, frame: &[u8]) -> Result<(), LeError> {
        match self.send(frame) {
            Ok(()) => return Ok(()),
            Err(err) => warn!("log collector write failed: {err}; reconnecting"),
        }
        // A second failure is returned; retrying further would need a queue.
        self.reopen()?;
        self.send(frame).map_err(LeError::Write)
    }

    fn send(&mut self, frame: &[u8]) -> std::io::Result<()> {
        let Some(conn) = self.conn.as_mut() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "no active connection",
            ));
        };
        conn.write_all(frame)?;
        conn.flush()
    }
}

impl<D: Dialer> std::fmt::Debug for ConnectionManager<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("strategy", &self.strategy)
            .field("connected", &self.conn.is_some())
            .finish()
    }
}
