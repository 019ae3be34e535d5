use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::UdpSocket;

use crate::error::HarnessError;

/// Fire-and-forget datagram sink.
///
/// The sequencer only needs to hand bytes over; nothing is ever read
/// back. Tests substitute recording or failing implementations.
pub trait Transport {
    /// Send `datagram` as one datagram, returning the number of bytes the
    /// OS accepted.
    fn send(&self, datagram: &[u8]) -> impl Future<Output = io::Result<usize>> + Send;
}

/// UDP transport bound to an ephemeral local port and aimed at one target.
///
/// The socket lives exactly as long as this value and is closed when it is
/// dropped, on every exit path of a run.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Bind a local socket of the same address family as `target`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Bind`] if the socket cannot be opened.
    pub async fn open(target: SocketAddr) -> Result<Self, HarnessError> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await.map_err(HarnessError::Bind)?;
        tracing::debug!(local = ?socket.local_addr().ok(), %target, "datagram socket opened");
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Transport for UdpTransport {
    async fn send(&self, datagram: &[u8]) -> io::Result<usize> {
        self.socket.send_to(datagram, self.target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_one_datagram_per_send() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = UdpTransport::open(receiver.local_addr().unwrap())
            .await
            .unwrap();

        let sent = transport.send(b"\x02\x09probe").await.unwrap();
        assert_eq!(sent, 7);

        let mut buf = [0u8; 64];
        let (n, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"\x02\x09probe");
    }

    #[tokio::test]
    async fn target_is_kept() {
        let target: SocketAddr = "127.0.0.1:427".parse().unwrap();
        let transport = UdpTransport::open(target).await.unwrap();
        assert_eq!(transport.target(), target);
    }
}
