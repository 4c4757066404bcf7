//! Network infrastructure for the client application: the inbound UDP channel.
//!
//! `UdpKeyReceiver` owns the listening socket and feeds every datagram to the
//! [`ReplayInputUseCase`]. A datagram that cannot be decoded or injected is
//! dropped and the loop keeps receiving; only socket failures end it.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::application::replay_input::ReplayInputUseCase;

/// Receive buffer size. One encoded key event is well under this.
pub const BUFFER_SIZE: usize = 128;

/// `WSAEMSGSIZE`: Windows reports an oversized datagram as an error after
/// filling the buffer with its prefix.
#[cfg(target_os = "windows")]
const WSAEMSGSIZE: i32 = 10040;

/// Errors that can occur in the client network layer.
#[derive(Debug, Error)]
pub enum ReceiveError {
    /// The listening socket could not be bound.
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// Receiving from the socket failed.
    #[error("failed to receive datagram: {0}")]
    Receive(#[source] io::Error),
}

/// Listens for key event datagrams from the server.
#[derive(Debug)]
pub struct UdpKeyReceiver {
    socket: UdpSocket,
}

impl UdpKeyReceiver {
    /// Binds the listening socket on `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveError::Bind`] if the address is unavailable.
    pub async fn bind(addr: SocketAddr) -> Result<Self, ReceiveError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| ReceiveError::Bind { addr, source })?;
        Ok(Self { socket })
    }

    /// The address the socket is actually bound to.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveError::Receive`] if the OS cannot report it.
    pub fn local_addr(&self) -> Result<SocketAddr, ReceiveError> {
        self.socket.local_addr().map_err(ReceiveError::Receive)
    }

    /// Receives datagrams forever, replaying each one through `use_case`.
    ///
    /// Returns only on a socket error. Undecodable or uninjectable datagrams
    /// are logged by the use case and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveError::Receive`] when the socket fails.
    pub async fn run(&self, use_case: &mut ReplayInputUseCase) -> Result<(), ReceiveError> {
        if let Ok(addr) = self.socket.local_addr() {
            info!(%addr, "listening for key events");
        }

        let mut buf = [0u8; BUFFER_SIZE];
        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) if is_oversized(&e) => {
                    warn!("discarding datagram larger than {BUFFER_SIZE} bytes");
                    continue;
                }
                Err(e) => return Err(ReceiveError::Receive(e)),
            };
            debug!(%peer, bytes = len, "received datagram");

            // Failures are already logged at the appropriate level.
            let _ = use_case.handle_datagram(&buf[..len]);
        }
    }
}

fn is_oversized(error: &io::Error) -> bool {
    #[cfg(target_os = "windows")]
    {
        error.raw_os_error() == Some(WSAEMSGSIZE)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = error;
        false
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
