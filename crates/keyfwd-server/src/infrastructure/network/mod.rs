//! Network infrastructure for the server: the outbound UDP channel.
//!
//! Every forwarded [`KeyEvent`] becomes exactly one datagram sent to the
//! fixed client address. Delivery is fire-and-forget: no acknowledgement,
//! retry, or ordering.

use std::io;
use std::net::{SocketAddr, UdpSocket};

use keyfwd_core::{encode_key_event, EncodeError, KeyEvent};
use thiserror::Error;
use tracing::debug;

use crate::application::redirect_input::KeyTransmitter;

/// Error type for sending key events.
#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("failed to encode key event: {0}")]
    Encode(#[from] EncodeError),

    #[error("failed to bind UDP socket: {0}")]
    Bind(#[source] io::Error),

    #[error("failed to send datagram to {destination}: {source}")]
    Send {
        destination: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Sends encoded key events to one client over UDP.
#[derive(Debug)]
pub struct UdpTransmitter {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpTransmitter {
    /// Binds an ephemeral local socket for sending to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError::Bind`] if the local socket cannot be created.
    pub fn bind(destination: SocketAddr) -> Result<Self, TransmitError> {
        let local: SocketAddr = if destination.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(local).map_err(TransmitError::Bind)?;
        Ok(Self {
            socket,
            destination,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }
}

impl KeyTransmitter for UdpTransmitter {
    fn send(&self, event: &KeyEvent) -> Result<(), TransmitError> {
        let bytes = encode_key_event(event)?;
        self.socket
            .send_to(&bytes, self.destination)
            .map_err(|source| TransmitError::Send {
                destination: self.destination,
                source,
            })?;
        debug!(
            action = ?event.action,
            key = %event.key,
            bytes = bytes.len(),
            "sent key event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyfwd_core::{decode_key_event, Key};
    use std::time::Duration;

    #[test]
    fn test_udp_transmitter_sends_one_datagram_per_event() {
        // Arrange
        let receiver = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set timeout");
        let transmitter =
            UdpTransmitter::bind(receiver.local_addr().unwrap()).expect("bind transmitter");
        let event = KeyEvent::press(Key::Printable('x'));

        // Act
        transmitter.send(&event).expect("send should succeed");

        // Assert
        let mut buf = [0u8; 128];
        let (len, _) = receiver.recv_from(&mut buf).expect("datagram should arrive");
        assert_eq!(decode_key_event(&buf[..len]).unwrap(), event);
    }

    #[test]
    fn test_udp_transmitter_reports_destination() {
        let destination: SocketAddr = "127.0.0.1:40404".parse().unwrap();

        let transmitter = UdpTransmitter::bind(destination).unwrap();

        assert_eq!(transmitter.destination(), destination);
    }
}
