//! Matrix Sender Application
//!
//! Renders a demo pattern at the target frame rate and streams it to
//! the board. Button events coming back from the board are logged.
//! Set `MATRIX_IP=<board ip>` to enable streaming.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use led_matrix_streamer::{
    config::AppConfig,
    network::{EventListener, FrameSender},
    runner,
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

    tracing::info!("Starting LED Matrix Sender");

    let config = AppConfig::load()?;
    tracing::info!(
        "Matrix {}x{} @ {} fps",
        config.matrix.width,
        config.matrix.height,
        config.matrix.fps
    );
    match &config.network.target {
        Some(target) => tracing::info!("Streaming to {}:{}", target, config.network.frame_port),
        None => tracing::info!("Running without a board (local only)"),
    }

    let events = EventListener::bind(config.network.event_port)?.start();
    tracing::info!("Listening for button events on port {}", config.network.event_port);

    let sender = FrameSender::new(&config.network)?;

    let width = config.matrix.width;
    let height = config.matrix.height;

    // Demo pattern: a scrolling diagonal color ramp. Real applications
    // plug their own render callback in here.
    runner::run(&config, sender, move |grid, t, _frame| {
        while let Ok(event) = events.try_recv() {
            tracing::info!("Button event: {:?}", event);
        }

        let shift = (t * 30.0) as usize;
        for y in 0..height {
            for x in 0..width {
                let r = (((x + shift) % width) * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                let b = 64;
                grid.set(x, y, (r, g, b));
            }
        }
    })
    .await?;

    Ok(())
}
