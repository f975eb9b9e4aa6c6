//! UDP socket setup.
//!
//! All sockets in the system are non-blocking datagram sockets with an
//! enlarged receive buffer; the receiver drains them from a single
//! loop and must never block on the network.

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};

use crate::constants::RECV_BUFFER_SIZE;
use crate::error::NetworkError;

/// Create a configured, non-blocking UDP socket bound to `bind`.
///
/// The result is a plain std socket; callers hand it to tokio with
/// `UdpSocket::from_std` when they need async I/O.
pub fn create_socket(bind: SocketAddr) -> Result<std::net::UdpSocket, NetworkError> {
    let socket = Socket::new(Domain::for_address(bind), Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;
    socket
        .set_reuse_address(true)
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;
    socket
        .set_recv_buffer_size(RECV_BUFFER_SIZE)
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;
    socket
        .set_nonblocking(true)
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;
    socket
        .bind(&bind.into())
        .map_err(|e| NetworkError::BindFailed(format!("{}: {}", bind, e)))?;
    Ok(socket.into())
}
