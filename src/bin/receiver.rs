//! Matrix Receiver Application
//!
//! Reference receiver: binds the frame port, assembles incoming rows
//! into a framebuffer and logs achieved FPS. On the real board the
//! same loop runs against the HUB75 panel and GPIO buttons; here the
//! display is a no-op and no buttons are attached, which makes this
//! binary useful for soak-testing a sender without hardware.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::net::UdpSocket;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use led_matrix_streamer::{
    assembler::{Assembler, NullDisplay},
    config::AppConfig,
    input::{ButtonInput, Debouncer, NoButtons},
    network::create_socket,
    protocol::ButtonEvent,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LED Matrix Receiver");

    let config = AppConfig::load()?;
    let width = config.matrix.width;
    let height = config.matrix.height;

    let bind: SocketAddr = ([0, 0, 0, 0], config.network.frame_port).into();
    let frame_socket = UdpSocket::from_std(create_socket(bind)?)?;
    tracing::info!("Listening for pixel data on UDP port {}", config.network.frame_port);

    // Events go out from an ephemeral port to the last frame sender
    let event_socket = UdpSocket::from_std(create_socket(([0, 0, 0, 0], 0).into())?)?;

    let mut assembler = Assembler::new(width, height, NullDisplay);
    let mut buttons = NoButtons;
    let mut debounce = Debouncer::new(config.network.debounce());

    let mut buf = vec![0u8; 2 + width * 2 + 64];
    let mut last_log = Instant::now();
    let mut frames_at_last_log: u64 = 0;

    loop {
        // Drain everything currently queued, then move on; the loop
        // must never park on the socket while inputs want polling.
        loop {
            match frame_socket.try_recv_from(&mut buf) {
                Ok((n, from)) => assembler.handle_datagram(&buf[..n], from),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    tracing::warn!("frame socket receive error: {}", e);
                    break;
                }
            }
        }

        // One input poll per iteration; a send failure must never
        // take the loop down.
        let now = Instant::now();
        for button in ButtonEvent::ALL {
            let pressed = buttons.is_pressed(button);
            if debounce.update(button, pressed, now) {
                if let Some(peer) = assembler.last_sender() {
                    let dest = SocketAddr::new(peer.ip(), config.network.event_port);
                    if let Err(e) = event_socket.try_send_to(&[button.code()], dest) {
                        tracing::debug!("event send to {} failed: {}", dest, e);
                    }
                }
            }
        }

        if last_log.elapsed() >= Duration::from_secs(5) {
            let stats = assembler.stats();
            let fps = (stats.frames_completed - frames_at_last_log) as f64
                / last_log.elapsed().as_secs_f64();
            tracing::info!(
                "FPS: {:.1} ({} frames, {} rows, {} dropped)",
                fps,
                stats.frames_completed,
                stats.rows_applied,
                stats.packets_dropped
            );
            frames_at_last_log = stats.frames_completed;
            last_log = Instant::now();
        }

        tokio::time::sleep(Duration::from_micros(500)).await;
    }
}
