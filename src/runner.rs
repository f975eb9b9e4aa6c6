//! Producer run loop.
//!
//! Ties a render callback to the paced sender at a fixed target rate.
//! The callback draws into the grid each tick; the grid is not cleared
//! between frames, so unchanged pixels simply persist.

use std::time::Instant;

use tokio::time::MissedTickBehavior;

use crate::config::AppConfig;
use crate::grid::PixelGrid;
use crate::network::FrameSender;
use crate::Result;

/// Frames between periodic stats log lines (~10 s at 30 fps)
const STATS_INTERVAL_FRAMES: u64 = 300;

/// Run the render-and-transmit loop forever.
///
/// `render` is called once per tick with the grid, the elapsed time in
/// seconds and the frame number. Encoding and paced transmission run
/// synchronously inside the tick; with default settings the pacing
/// sleeps total ~16 ms of the 33 ms frame period.
pub async fn run<F>(config: &AppConfig, mut sender: FrameSender, mut render: F) -> Result<()>
where
    F: FnMut(&mut PixelGrid, f32, u64),
{
    let mut grid = PixelGrid::new(config.matrix.width, config.matrix.height);
    let period = std::time::Duration::from_secs_f64(1.0 / f64::from(config.matrix.fps.max(1)));

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let start = Instant::now();
    let mut frame: u64 = 0;

    loop {
        interval.tick().await;
        render(&mut grid, start.elapsed().as_secs_f32(), frame);

        if let Err(e) = sender.send_frame(&grid).await {
            // Transport trouble is non-fatal; keep rendering locally
            tracing::warn!("failed to send frame {}: {}", frame, e);
        }

        frame += 1;
        if sender.is_enabled() && frame % STATS_INTERVAL_FRAMES == 0 {
            let stats = sender.stats();
            tracing::info!(
                "sent {} frames, {} packets, {:.1} KB, {} send errors",
                stats.frames_sent,
                stats.packets_sent,
                stats.bytes_sent as f64 / 1024.0,
                stats.send_errors
            );
        }
    }
}
