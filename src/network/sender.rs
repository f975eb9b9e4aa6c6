//! Burst-paced frame transmission.
//!
//! The board's inbound mailbox holds only a handful of datagrams and
//! drains only as fast as its main loop spins. Blasting all 65 packets
//! of a frame at once overflows it and silently truncates the frame,
//! so the sender emits fixed-size bursts with a short sleep between
//! them. No acknowledgment, no retransmission: a dropped packet is a
//! one-frame cosmetic artifact, repaired by the next frame.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;

use crate::codec::FrameEncoder;
use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::grid::PixelGrid;
use crate::network::udp::create_socket;

/// Transmission counters
#[derive(Debug, Clone, Copy, Default)]
pub struct SenderStats {
    pub frames_sent: u64,
    pub packets_sent: u64,
    pub bytes_sent: u64,
    pub send_errors: u64,
}

/// Streams encoded frames to the board, paced into bursts.
///
/// With no target configured the sender is a permanent no-op: no
/// packets are ever constructed and local rendering carries on
/// unaffected.
pub struct FrameSender {
    socket: UdpSocket,
    target: Option<SocketAddr>,
    burst_size: usize,
    burst_delay: Duration,
    stats: SenderStats,
}

impl FrameSender {
    /// Create a sender from network config. Must be called inside a
    /// tokio runtime.
    pub fn new(config: &NetworkConfig) -> Result<Self, NetworkError> {
        let target = match &config.target {
            Some(host) => {
                let ip: IpAddr = host
                    .parse()
                    .map_err(|_| NetworkError::InvalidAddress(host.clone()))?;
                Some(SocketAddr::new(ip, config.frame_port))
            }
            None => {
                tracing::warn!(
                    "no target address configured, streaming disabled (set MATRIX_IP to enable)"
                );
                None
            }
        };

        let socket = create_socket("0.0.0.0:0".parse().expect("valid bind address"))?;
        let socket = UdpSocket::from_std(socket)
            .map_err(|e| NetworkError::BindFailed(e.to_string()))?;

        Ok(Self {
            socket,
            target,
            burst_size: config.burst_size.max(1),
            burst_delay: config.burst_delay(),
            stats: SenderStats::default(),
        })
    }

    /// Whether a target is configured and frames actually go out
    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    /// Encode and transmit one complete frame: rows 0..H-1 in order,
    /// then `FrameDone`, pausing after each burst. The cumulative
    /// pacing delay must stay below the frame period; at the default
    /// 64 rows, bursts of 4 and 4 ms that is ~16 ms of a 33 ms tick.
    pub async fn send_frame(&mut self, grid: &PixelGrid) -> Result<(), NetworkError> {
        let Some(target) = self.target else {
            return Ok(());
        };

        let mut in_burst = 0;
        for packet in FrameEncoder::new(grid) {
            if in_burst == self.burst_size {
                tokio::time::sleep(self.burst_delay).await;
                in_burst = 0;
            }
            let buf = packet.encode();
            match self.socket.send_to(&buf, target).await {
                Ok(n) => {
                    self.stats.packets_sent += 1;
                    self.stats.bytes_sent += n as u64;
                }
                Err(e) => {
                    // Abandon the rest of this frame; the next one
                    // repaints everything anyway.
                    self.stats.send_errors += 1;
                    return Err(NetworkError::SendFailed(e.to_string()));
                }
            }
            in_burst += 1;
        }
        self.stats.frames_sent += 1;
        Ok(())
    }

    pub fn stats(&self) -> SenderStats {
        self.stats
    }
}
