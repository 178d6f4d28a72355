//! Endpoint and strategy configuration consumed by the connection manager.
//!
//! [`LeLoggerBuilder`](crate::LeLoggerBuilder) resolves these values before
//! the first dial.

use std::{
    fmt, io,
    net::{SocketAddr, ToSocketAddrs},
};

use native_tls::TlsConnector;

use crate::frame::FrameMode;

/// Hostname of the collector.
pub const DEFAULT_HOST: &str = "data.logentries.com";
/// Collector port for TLS token ingestion.
pub const DEFAULT_TLS_PORT: u16 = 443;
/// Collector port for plaintext token ingestion.
pub const DEFAULT_PLAIN_PORT: u16 = 80;

/// Remote collector address, optionally wrapped in TLS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Hostname or IP address to connect to.
    pub host: String,
    /// TCP port number.
    pub port: u16,
    /// TLS configuration; `None` selects plaintext TCP.
    pub tls: Option<TlsOptions>,
}

impl Endpoint {
    /// TLS endpoint of the hosted collector.
    pub fn secure_default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_TLS_PORT,
            tls: Some(TlsOptions::for_domain(DEFAULT_HOST)),
        }
    }

    /// Plaintext endpoint of the hosted collector.
    pub fn plain_default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PLAIN_PORT,
            tls: None,
        }
    }

    pub(crate) fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map(|iter| iter.collect())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.tls.is_some() { "tls" } else { "tcp" };
        write!(f, "{scheme}://{}:{}", self.host, self.port)
    }
}

/// TLS connection options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlsOptions {
    /// Domain name presented during the TLS handshake.
    pub domain: String,
    /// Skip certificate validation when true (intended for tests).
    pub insecure_skip_verify: bool,
}

impl TlsOptions {
    /// Verified TLS towards `domain`.
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            insecure_skip_verify: false,
        }
    }

    pub(crate) fn connector(&self) -> io::Result<TlsConnector> {
        let mut builder = TlsConnector::builder();
        if self.insecure_skip_verify {
            builder.danger_accept_invalid_certs(true);
            builder.danger_accept_invalid_hostnames(true);
        }
        builder.build().map_err(io::Error::other)
    }
}

/// How the manager keeps its transport usable across writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReconnectStrategy {
    /// Write optimistically; on failure reopen once and retry the write once.
    #[default]
    RetryOnce,
    /// Probe the transport before every write and reopen it when dead.
    /// Write failures are returned without a retry.
    ProbeBeforeWrite,
}

impl ReconnectStrategy {
    /// Endpoint used when the caller does not configure one.
    pub fn default_endpoint(self) -> Endpoint {
        match self {
            ReconnectStrategy::RetryOnce => Endpoint::secure_default(),
            ReconnectStrategy::ProbeBeforeWrite => Endpoint::plain_default(),
        }
    }

    /// Framing used when the caller does not configure one.
    pub fn default_frame_mode(self) -> FrameMode {
        match self {
            ReconnectStrategy::RetryOnce => FrameMode::LineSeparated,
            ReconnectStrategy::ProbeBeforeWrite => FrameMode::Raw,
        }
    }
}
