//! In-process stand-in for the remote collector.
//!
//! Accepts a fixed number of TCP connections one after another and reports
//! every newline-terminated frame it reads, tagged with the 1-based index of
//! the connection that carried it.

use std::{
    io::{BufRead, BufReader},
    net::{SocketAddr, TcpListener},
    sync::mpsc,
    thread,
    time::Duration,
};

/// Observation reported by the collector thread.
#[derive(Debug, PartialEq, Eq)]
pub enum CollectorEvent {
    Frame { connection: usize, bytes: Vec<u8> },
    Disconnected { connection: usize },
}

pub struct LineCollector {
    addr: SocketAddr,
    events: mpsc::Receiver<CollectorEvent>,
}

impl LineCollector {
    /// Serve `connections` connections, reading at most `frames_per_connection`
    /// frames from each before hanging up.
    pub fn spawn(listener: TcpListener, connections: usize, frames_per_connection: usize) -> Self {
        let addr = listener.local_addr().expect("listener has address");
        let (tx, events) = mpsc::channel();
        thread::spawn(move || {
            for connection in 1..=connections {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream);
                for _ in 0..frames_per_connection {
                    let mut bytes = Vec::new();
                    match reader.read_until(b'\n', &mut bytes) {
                        Ok(0) | Err(_) => break,
                        Ok(_) => {
                            if tx.send(CollectorEvent::Frame { connection, bytes }).is_err() {
                                return;
                            }
                        }
                    }
                }
                drop(reader);
                if tx.send(CollectorEvent::Disconnected { connection }).is_err() {
                    return;
                }
            }
        });
        Self { addr, events }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the next event.
    pub fn next_event(&self) -> CollectorEvent {
        self.events
            .recv_timeout(Duration::from_secs(2))
            .expect("collector event within timeout")
    }

    /// Wait for the next frame, skipping disconnect notices.
    pub fn next_frame(&self) -> (usize, Vec<u8>) {
        loop {
            if let CollectorEvent::Frame { connection, bytes } = self.next_event() {
                return (connection, bytes);
            }
        }
    }
}
