//! Connection management for the collector socket.
//!
//! [`ConnectionManager`] owns the single transport of a logger. It dials the
//! configured [`Endpoint`], checks liveness, and reopens the transport after
//! failures according to a [`ReconnectStrategy`]. The transport itself sits
//! behind the [`Transport`] and [`Dialer`] traits so the lifecycle logic can
//! be exercised without a network.

mod config;
mod manager;
mod transport;


pub use config::{
    DEFAULT_HOST, DEFAULT_PLAIN_PORT, DEFAULT_TLS_PORT, Endpoint, ReconnectStrategy, TlsOptions,
};
pub use manager::ConnectionManager;
pub use transport::{ActiveConnection, Dialer, EndpointDialer, Liveness, Transport};
