//! Test doubles shared by unit and integration tests.
//!
//! Compiled for unit tests and behind the `test-util` feature so the
//! integration tests under `tests/` can drive the connection manager without
//! a network.

pub mod scripted_transport;

pub use scripted_transport::{
    DialScript, ProbeScript, ScriptedDialer, ScriptedTransport, TransportScript,
};
