//! Transport primitives for the connection manager.

use std::{
    io::{self, Write},
    net::{Shutdown, TcpStream},
};

use log::debug;
use native_tls::TlsStream;

use super::config::Endpoint;

/// Outcome of a non-blocking liveness probe.
#[derive(Debug)]
pub enum Liveness {
    /// Nothing to read and no error: the peer is still there.
    Alive,
    /// The peer closed its side of the connection.
    Closed,
    /// The peer sent data we never asked for.
    Readable,
    /// The probe itself failed.
    Failed(io::Error),
}

impl Liveness {
    /// Whether the transport may be reused.
    pub fn is_alive(&self) -> bool {
        matches!(self, Liveness::Alive)
    }
}

/// A byte stream towards the collector.
pub trait Transport: Send {
    /// Write a full buffer.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Flush buffered bytes to the socket.
    fn flush(&mut self) -> io::Result<()>;

    /// Check, without blocking, whether the stream is still usable.
    ///
    /// Implementations must leave the stream in blocking mode when the
    /// verdict is [`Liveness::Alive`].
    fn probe(&mut self) -> Liveness;

    /// Shut the stream down and release it.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Factory for fresh transports to a fixed endpoint.
pub trait Dialer: Send {
    /// Transport produced by each successful dial.
    type Conn: Transport;

    /// Establish a new transport.
    fn dial(&self) -> io::Result<Self::Conn>;
}

/// Active socket connection state.
pub enum ActiveConnection {
    PlainTcp(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl ActiveConnection {
    fn tcp(&self) -> &TcpStream {
        match self {
            ActiveConnection::PlainTcp(stream) => stream,
            ActiveConnection::Tls(stream) => stream.get_ref(),
        }
    }
}

impl Transport for ActiveConnection {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            ActiveConnection::PlainTcp(stream) => stream.write_all(buf),
            ActiveConnection::Tls(stream) => stream.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ActiveConnection::PlainTcp(stream) => stream.flush(),
            ActiveConnection::Tls(stream) => stream.flush(),
        }
    }

    fn probe(&mut self) -> Liveness {
        // Pending TLS records (e.g. session tickets) show up as readable bytes.
        probe_tcp(self.tcp())
    }

    fn close(self) -> io::Result<()> {
        match self {
            ActiveConnection::PlainTcp(stream) => stream.shutdown(Shutdown::Both),
            ActiveConnection::Tls(mut stream) => stream.shutdown(),
        }
    }
}

impl std::fmt::Debug for ActiveConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ActiveConnection::PlainTcp(_) => "PlainTcp",
            ActiveConnection::Tls(_) => "Tls",
        };
        f.debug_tuple(kind).field(&self.tcp().peer_addr().ok()).finish()
    }
}

/// Peek one byte in non-blocking mode; only `WouldBlock` means alive.
pub(crate) fn probe_tcp(stream: &TcpStream) -> Liveness {
    if let Err(err) = stream.set_nonblocking(true) {
        return Liveness::Failed(err);
    }
    let mut byte = [0u8; 1];
    let verdict = match stream.peek(&mut byte) {
        Ok(0) => Liveness::Closed,
        Ok(_) => Liveness::Readable,
        Err(err) if err.kind() == io::ErrorKind::WouldBlock => Liveness::Alive,
        Err(err) => Liveness::Failed(err),
    };
    if verdict.is_alive()
        && let Err(err) = stream.set_nonblocking(false)
    {
        return Liveness::Failed(err);
    }
    verdict
}

/// Dials [`ActiveConnection`]s to a configured [`Endpoint`].
#[derive(Clone, Debug)]
pub struct EndpointDialer {
    endpoint: Endpoint,
}

impl EndpointDialer {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl Dialer for EndpointDialer {
    type Conn = ActiveConnection;

    fn dial(&self) -> io::Result<ActiveConnection> {
        let stream = connect_tcp(&self.endpoint)?;
        let conn = match &self.endpoint.tls {
            Some(tls) => {
                let connector = tls.connector()?;
                let stream = connector
                    .connect(&tls.domain, stream)
                    .map_err(io::Error::other)?;
                ActiveConnection::Tls(Box::new(stream))
            }
            None => ActiveConnection::PlainTcp(stream),
        };
        debug!("connected to log collector at {}", self.endpoint);
        Ok(conn)
    }
}

fn connect_tcp(endpoint: &Endpoint) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in endpoint.socket_addrs()? {
        match TcpStream::connect(addr) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no addresses resolved for {}:{}", endpoint.host, endpoint.port),
        )
    }))
}
