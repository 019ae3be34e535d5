//! Shared fixtures for the integration tests.
//!
//! [`ScriptedTransport`] stands in for the UDP socket: it records every
//! datagram with the (tokio) time it was handed over and can be told to
//! refuse specific sends.

use std::collections::HashSet;
use std::io;
use std::sync::Mutex;

use slp_harness::Transport;
use tokio::time::Instant;

/// One datagram the transport accepted.
#[derive(Clone, Debug)]
pub struct Delivery {
    pub datagram: Vec<u8>,
    pub at: Instant,
}

/// In-memory transport that fails the sends whose zero-based position is
/// listed in `fail_at`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    fail_at: HashSet<usize>,
    attempts: Mutex<usize>,
    delivered: Mutex<Vec<Delivery>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_at: positions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sends attempted so far, refused ones included.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub fn delivered(&self) -> Vec<Delivery> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, datagram: &[u8]) -> io::Result<usize> {
        let position = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts - 1
        };
        if self.fail_at.contains(&position) {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("scripted failure at send {position}"),
            ));
        }
        self.delivered.lock().unwrap().push(Delivery {
            datagram: datagram.to_vec(),
            at: Instant::now(),
        });
        Ok(datagram.len())
    }
}
