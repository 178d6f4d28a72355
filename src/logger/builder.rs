//! Builder for [`LeLogger`].
//!
//! Exposes endpoint selection, TLS configuration, reconnect strategy and
//! framing. Anything left unset falls back to the strategy defaults: the TLS
//! collector with line-separated frames for [`ReconnectStrategy::RetryOnce`],
//! the plaintext collector with raw frames for
//! [`ReconnectStrategy::ProbeBeforeWrite`].

use std::time::Duration;

use crate::{
    connection::{
        ConnectionManager, Dialer, Endpoint, EndpointDialer, ReconnectStrategy, TlsOptions,
    },
    error::LeError,
    frame::FrameMode,
    rate_limited_warner::{DEFAULT_WARN_INTERVAL, RateLimitedWarner},
};

use super::LeLogger;

#[derive(Clone, Debug)]
struct TcpConfig {
    host: String,
    port: u16,
}

#[derive(Clone, Debug)]
enum TlsChoice {
    StrategyDefault,
    Enabled {
        domain: Option<String>,
        insecure: bool,
    },
    Disabled,
}

/// Builder for [`LeLogger`].
#[derive(Clone, Debug)]
pub struct LeLoggerBuilder {
    token: String,
    tcp: Option<TcpConfig>,
    tls: TlsChoice,
    strategy: ReconnectStrategy,
    frame_mode: Option<FrameMode>,
    prefix: String,
    flags: i64,
    warn_interval: Duration,
}

impl LeLoggerBuilder {
    /// Create a builder for `token` with every option at its default.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tcp: None,
            tls: TlsChoice::StrategyDefault,
            strategy: ReconnectStrategy::default(),
            frame_mode: None,
            prefix: String::new(),
            flags: 0,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }

    /// Target a specific collector host and port.
    pub fn with_tcp(mut self, host: impl Into<String>, port: u16) -> Self {
        self.tcp = Some(TcpConfig {
            host: host.into(),
            port,
        });
        self
    }

    /// Wrap the connection in TLS. `domain` defaults to the host.
    pub fn with_tls(mut self, domain: Option<String>, insecure: bool) -> Self {
        self.tls = TlsChoice::Enabled { domain, insecure };
        self
    }

    /// Use plaintext TCP regardless of the strategy default.
    pub fn without_tls(mut self) -> Self {
        self.tls = TlsChoice::Disabled;
        self
    }

    pub fn with_strategy(mut self, strategy: ReconnectStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the framing implied by the strategy.
    pub fn with_frame_mode(mut self, frame_mode: FrameMode) -> Self {
        self.frame_mode = Some(frame_mode);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_flags(mut self, flags: i64) -> Self {
        self.flags = flags;
        self
    }

    /// Minimum delay between warnings about dropped frames.
    pub fn with_warn_interval(mut self, interval: Duration) -> Self {
        self.warn_interval = interval;
        self
    }

    /// Resolve the endpoint this builder would dial.
    pub fn endpoint(&self) -> Result<Endpoint, LeError> {
        let defaults = self.strategy.default_endpoint();
        let (host, port) = match &self.tcp {
            Some(tcp) => (tcp.host.clone(), tcp.port),
            None => (defaults.host, defaults.port),
        };
        if host.trim().is_empty() {
            return Err(LeError::InvalidConfig("tcp host must not be empty".into()));
        }
        if port == 0 {
            return Err(LeError::InvalidConfig(
                "tcp port must be greater than zero".into(),
            ));
        }
        let tls = match &self.tls {
            TlsChoice::StrategyDefault => defaults.tls.map(|_| TlsOptions::for_domain(&host)),
            TlsChoice::Enabled { domain, insecure } => {
                let domain = domain
                    .clone()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| host.clone());
                Some(TlsOptions {
                    domain,
                    insecure_skip_verify: *insecure,
                })
            }
            TlsChoice::Disabled => None,
        };
        Ok(Endpoint { host, port, tls })
    }

    /// Dial the configured endpoint and return the logger.
    pub fn connect(self) -> Result<LeLogger, LeError> {
        let endpoint = self.endpoint()?;
        self.connect_with(EndpointDialer::new(endpoint))
    }

    /// Build the logger on top of a caller-supplied dialer. Endpoint and TLS
    /// settings are ignored.
    pub fn connect_with<D: Dialer>(self, dialer: D) -> Result<LeLogger<D>, LeError> {
        let frame_mode = self
            .frame_mode
            .unwrap_or_else(|| self.strategy.default_frame_mode());
        let connection = ConnectionManager::open(dialer, self.strategy)?;
        Ok(LeLogger::from_parts(
            self.token,
            self.prefix,
            self.flags,
            frame_mode,
            connection,
            RateLimitedWarner::new(self.warn_interval),
        ))
    }
}
