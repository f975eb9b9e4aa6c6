//! Producer-side button event listener.
//!
//! The board sends 1-byte event packets to whatever address last sent
//! it pixels. A background task reads the event socket and feeds a
//! bounded channel; the render loop drains it with `try_recv` each
//! tick and never blocks when no events are pending.

use std::net::SocketAddr;

use crossbeam_channel::{bounded, Receiver};
use tokio::net::UdpSocket;

use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::error::NetworkError;
use crate::network::udp::create_socket;
use crate::protocol::ButtonEvent;

/// Listens for board button events on the event port
pub struct EventListener {
    socket: UdpSocket,
}

impl EventListener {
    /// Bind the event port. Must be called inside a tokio runtime.
    pub fn bind(port: u16) -> Result<Self, NetworkError> {
        let bind: SocketAddr = ([0, 0, 0, 0], port).into();
        let socket = create_socket(bind)?;
        let socket =
            UdpSocket::from_std(socket).map_err(|e| NetworkError::BindFailed(e.to_string()))?;
        Ok(Self { socket })
    }

    /// Port the listener is bound to (useful when bound ephemeral)
    pub fn local_port(&self) -> Result<u16, NetworkError> {
        self.socket
            .local_addr()
            .map(|addr| addr.port())
            .map_err(|e| NetworkError::BindFailed(e.to_string()))
    }

    /// Spawn the receive task and hand back the event channel.
    ///
    /// Unknown event codes are dropped without comment, as is anything
    /// that arrives while the channel is full.
    pub fn start(self) -> Receiver<ButtonEvent> {
        let (tx, rx) = bounded(EVENT_CHANNEL_CAPACITY);
        tokio::spawn(async move {
            let mut buf = [0u8; 16];
            loop {
                match self.socket.recv_from(&mut buf).await {
                    Ok((n, from)) => {
                        if n < 1 {
                            continue;
                        }
                        if let Some(event) = ButtonEvent::from_code(buf[0]) {
                            tracing::debug!("button event {:?} from {}", event, from);
                            if tx.try_send(event).is_err() {
                                tracing::trace!("event channel full, dropping {:?}", event);
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("event socket receive error: {}", e);
                        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                    }
                }
            }
        });
        rx
    }
}
