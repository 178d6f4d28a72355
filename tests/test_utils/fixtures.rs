//! Fixtures shared by the integration tests.

use std::net::TcpListener;

use rstest::fixture;

/// Listener bound to an ephemeral loopback port.
#[fixture]
pub fn tcp_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

/// Token used by every integration test.
pub const TOKEN: &str = "2bfbea1e-10c3-4419-bdad-7e6435882e1f";
