//! A dialer whose transports follow a pre-recorded script.
//!
//! Each dial pops the next [`DialScript`]. Once the script runs out every
//! further dial yields a healthy transport. All observations (dials, frames,
//! closes, probes) are shared between clones so a test can keep a handle
//! after moving the dialer into a logger.

use std::{collections::VecDeque, io, sync::Arc};

use parking_lot::Mutex;

use crate::connection::{Dialer, Liveness, Transport};

/// Verdict a scripted transport reports when probed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProbeScript {
    #[default]
    Alive,
    Closed,
    Readable,
    Error,
}

/// Behaviour of one scripted transport.
#[derive(Clone, Debug, Default)]
pub struct TransportScript {
    /// Number of leading writes that fail with `BrokenPipe`.
    pub failing_writes: usize,
    /// Result of every probe.
    pub probe: ProbeScript,
    /// Whether `close` reports an error.
    pub fail_close: bool,
}

impl TransportScript {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn failing_writes(count: usize) -> Self {
        Self {
            failing_writes: count,
            ..Self::default()
        }
    }

    pub fn probing(probe: ProbeScript) -> Self {
        Self {
            probe,
            ..Self::default()
        }
    }
}

/// Outcome of one dial.
#[derive(Clone, Debug)]
pub enum DialScript {
    Connect(TransportScript),
    Refuse,
}

#[derive(Default)]
struct Observations {
    script: VecDeque<DialScript>,
    dials: usize,
    refused: usize,
    write_attempts: usize,
    probes: usize,
    closes: usize,
    frames: Vec<(usize, Vec<u8>)>,
}

/// Dialer producing [`ScriptedTransport`]s.
#[derive(Clone, Default)]
pub struct ScriptedDialer {
    shared: Arc<Mutex<Observations>>,
}

impl ScriptedDialer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful dial with the given transport behaviour.
    pub fn then_connect(self, script: TransportScript) -> Self {
        self.shared.lock().script.push_back(DialScript::Connect(script));
        self
    }

    /// Queue a refused dial.
    pub fn then_refuse(self) -> Self {
        self.shared.lock().script.push_back(DialScript::Refuse);
        self
    }

    /// Total dial attempts, refused ones included.
    pub fn dials(&self) -> usize {
        self.shared.lock().dials
    }

    pub fn refused(&self) -> usize {
        self.shared.lock().refused
    }

    pub fn write_attempts(&self) -> usize {
        self.shared.lock().write_attempts
    }

    pub fn probes(&self) -> usize {
        self.shared.lock().probes
    }

    pub fn closes(&self) -> usize {
        self.shared.lock().closes
    }

    /// Frames successfully written, in order.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.shared
            .lock()
            .frames
            .iter()
            .map(|(_, frame)| frame.clone())
            .collect()
    }

    /// Frames successfully written with the 1-based dial number that carried them.
    pub fn frames_by_connection(&self) -> Vec<(usize, Vec<u8>)> {
        self.shared.lock().frames.clone()
    }
}

impl Dialer for ScriptedDialer {
    type Conn = ScriptedTransport;

    fn dial(&self) -> io::Result<ScriptedTransport> {
        let mut shared = self.shared.lock();
        shared.dials += 1;
        let id = shared.dials;
        match shared.script.pop_front() {
            Some(DialScript::Refuse) => {
                shared.refused += 1;
                Err(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "scripted dial refused",
                ))
            }
            Some(DialScript::Connect(script)) => Ok(ScriptedTransport::new(id, script, self)),
            None => Ok(ScriptedTransport::new(id, TransportScript::healthy(), self)),
        }
    }
}

/// Transport created by [`ScriptedDialer`].
pub struct ScriptedTransport {
    id: usize,
    remaining_failures: usize,
    probe: ProbeScript,
    fail_close: bool,
    shared: Arc<Mutex<Observations>>,
}

impl ScriptedTransport {
    fn new(id: usize, script: TransportScript, dialer: &ScriptedDialer) -> Self {
        Self {
            id,
            remaining_failures: script.failing_writes,
            probe: script.probe,
            fail_close: script.fail_close,
            shared: Arc::clone(&dialer.shared),
        }
    }

    /// 1-based dial number that produced this transport.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Transport for ScriptedTransport {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut shared = self.shared.lock();
        shared.write_attempts += 1;
        if self.remaining_failures > 0 {
            self.remaining_failures -= 1;
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "scripted write failure",
            ));
        }
        shared.frames.push((self.id, buf.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn probe(&mut self) -> Liveness {
        self.shared.lock().probes += 1;
        match self.probe {
            ProbeScript::Alive => Liveness::Alive,
            ProbeScript::Closed => Liveness::Closed,
            ProbeScript::Readable => Liveness::Readable,
            ProbeScript::Error => Liveness::Failed(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "scripted probe failure",
            )),
        }
    }

    fn close(self) -> io::Result<()> {
        self.shared.lock().closes += 1;
        if self.fail_close {
            Err(io::Error::other("scripted close failure"))
        } else {
            Ok(())
        }
    }
}
