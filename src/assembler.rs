//! Receiver-side frame assembly.
//!
//! The board owns one RGB565 framebuffer and one loop. Row packets are
//! copied straight into the framebuffer as they arrive; the display
//! only becomes visible on `FrameDone`, so a partially-assembled frame
//! never tears on screen. Malformed or out-of-range packets are
//! counted and dropped, never surfaced: availability beats strictness
//! on this link.

use std::net::SocketAddr;

use crate::protocol::Packet;

/// Display hardware behind the framebuffer.
///
/// Implementations must only make the framebuffer contents visible
/// inside `refresh`; intermediate row writes happen between refreshes
/// and must not show.
pub trait DisplayDevice {
    /// Atomically present the current framebuffer contents
    fn refresh(&mut self, framebuffer: &Framebuffer);
}

/// Display with no panel attached; refreshes go nowhere.
///
/// Used by the reference receiver binary and in soak tests, where
/// frame accounting matters but nothing is rendered.
#[derive(Default)]
pub struct NullDisplay;

impl DisplayDevice for NullDisplay {
    fn refresh(&mut self, _framebuffer: &Framebuffer) {}
}

/// W×H RGB565 buffer, exclusively owned by the receiver loop
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> u16 {
        self.pixels[y * self.width + x]
    }

    /// All pixels, row-major
    pub fn as_slice(&self) -> &[u16] {
        &self.pixels
    }

    /// Bulk-copy one scanline. Caller has already validated the row.
    fn apply_row(&mut self, row: usize, pixels: &[u16]) {
        debug_assert!(row < self.height);
        debug_assert_eq!(pixels.len(), self.width);
        let start = row * self.width;
        self.pixels[start..start + self.width].copy_from_slice(pixels);
    }
}

/// Packet and refresh counters for the receiver loop
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblerStats {
    pub rows_applied: u64,
    pub frames_completed: u64,
    pub packets_dropped: u64,
}

/// Applies incoming frame-channel datagrams to the framebuffer and
/// drives the display.
///
/// Also tracks the address of whoever last sent a valid packet; the
/// event channel replies there, so no registration handshake exists.
pub struct Assembler<D: DisplayDevice> {
    framebuffer: Framebuffer,
    display: D,
    last_sender: Option<SocketAddr>,
    stats: AssemblerStats,
}

impl<D: DisplayDevice> Assembler<D> {
    pub fn new(width: usize, height: usize, display: D) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            display,
            last_sender: None,
            stats: AssemblerStats::default(),
        }
    }

    /// Process one inbound datagram from `from`.
    ///
    /// Valid rows are copied into the framebuffer, `FrameDone` triggers
    /// exactly one refresh, anything else is dropped silently.
    pub fn handle_datagram(&mut self, data: &[u8], from: SocketAddr) {
        match Packet::decode(data, self.framebuffer.width) {
            Ok(Packet::Row { index, pixels }) => {
                if (index as usize) >= self.framebuffer.height {
                    self.stats.packets_dropped += 1;
                    return;
                }
                self.framebuffer.apply_row(index as usize, &pixels);
                self.stats.rows_applied += 1;
                self.last_sender = Some(from);
            }
            Ok(Packet::FrameDone) => {
                self.display.refresh(&self.framebuffer);
                self.stats.frames_completed += 1;
                self.last_sender = Some(from);
            }
            Err(e) => {
                self.stats.packets_dropped += 1;
                tracing::trace!("dropping bad packet from {}: {}", from, e);
            }
        }
    }

    /// Address of the most recent valid packet's sender, the
    /// destination for outbound button events
    pub fn last_sender(&self) -> Option<SocketAddr> {
        self.last_sender
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn stats(&self) -> AssemblerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{pack_rgb565, FrameEncoder};
    use crate::grid::PixelGrid;
    use crate::protocol::Packet;

    /// Test display that snapshots the framebuffer on every refresh
    struct CountingDisplay {
        refreshes: usize,
        visible: Vec<u16>,
    }

    impl CountingDisplay {
        fn new() -> Self {
            Self {
                refreshes: 0,
                visible: Vec::new(),
            }
        }
    }

    impl DisplayDevice for CountingDisplay {
        fn refresh(&mut self, framebuffer: &Framebuffer) {
            self.refreshes += 1;
            self.visible = framebuffer.as_slice().to_vec();
        }
    }

    fn peer() -> SocketAddr {
        "10.0.0.2:50000".parse().unwrap()
    }

    fn feed_frame(assembler: &mut Assembler<CountingDisplay>, grid: &PixelGrid) {
        for packet in FrameEncoder::new(grid) {
            assembler.handle_datagram(&packet.encode(), peer());
        }
    }

    #[test]
    fn test_full_frame_roundtrip_modulo_quantization() {
        let mut grid = PixelGrid::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                grid.set(x, y, ((x * 31) as u8, (y * 31) as u8, ((x + y) * 16) as u8));
            }
        }

        let mut assembler = Assembler::new(8, 8, CountingDisplay::new());
        feed_frame(&mut assembler, &grid);

        assert_eq!(assembler.display_mut().refreshes, 1);
        for y in 0..8 {
            for x in 0..8 {
                let (r, g, b) = grid.get(x, y);
                assert_eq!(assembler.framebuffer().pixel(x, y), pack_rgb565(r, g, b));
            }
        }
        let stats = assembler.stats();
        assert_eq!(stats.rows_applied, 8);
        assert_eq!(stats.frames_completed, 1);
        assert_eq!(stats.packets_dropped, 0);
    }

    #[test]
    fn test_refresh_shows_completed_frame_only() {
        let mut grid = PixelGrid::new(4, 4);
        grid.fill((255, 255, 255));

        let mut assembler = Assembler::new(4, 4, CountingDisplay::new());
        let packets: Vec<Packet> = FrameEncoder::new(&grid).collect();

        // Rows alone mutate the framebuffer but never refresh
        for packet in &packets[..4] {
            assembler.handle_datagram(&packet.encode(), peer());
        }
        assert_eq!(assembler.display_mut().refreshes, 0);

        assembler.handle_datagram(&packets[4].encode(), peer());
        assert_eq!(assembler.display_mut().refreshes, 1);
        assert!(assembler.display_mut().visible.iter().all(|&px| px == 0xFFFF));
    }

    #[test]
    fn test_out_of_range_row_dropped_silently() {
        let mut assembler = Assembler::new(4, 4, CountingDisplay::new());
        let packet = Packet::Row {
            index: 4,
            pixels: vec![0xFFFF; 4],
        };
        assembler.handle_datagram(&packet.encode(), peer());

        assert!(assembler.framebuffer().as_slice().iter().all(|&px| px == 0));
        assert_eq!(assembler.stats().packets_dropped, 1);
        assert_eq!(assembler.stats().rows_applied, 0);
        // Rejected packets do not become the reply target
        assert_eq!(assembler.last_sender(), None);
    }

    #[test]
    fn test_short_payload_dropped_silently() {
        let mut assembler = Assembler::new(4, 4, CountingDisplay::new());
        assembler.handle_datagram(&[0x00, 0x01, 0xAA, 0xBB], peer());
        assembler.handle_datagram(&[0x00], peer());

        assert!(assembler.framebuffer().as_slice().iter().all(|&px| px == 0));
        assert_eq!(assembler.stats().packets_dropped, 2);
    }

    #[test]
    fn test_missing_rows_leave_rest_intact() {
        let mut grid = PixelGrid::new(4, 8);
        grid.fill((0, 255, 0));

        let mut assembler = Assembler::new(4, 8, CountingDisplay::new());
        let packets: Vec<Packet> = FrameEncoder::new(&grid).collect();

        // Drop rows 2, 3 and 6 from the sequence
        for (i, packet) in packets.iter().enumerate() {
            if matches!(i, 2 | 3 | 6) {
                continue;
            }
            assembler.handle_datagram(&packet.encode(), peer());
        }

        assert_eq!(assembler.display_mut().refreshes, 1);
        let green = pack_rgb565(0, 255, 0);
        for y in 0..8 {
            let expected = if matches!(y, 2 | 3 | 6) { 0 } else { green };
            for x in 0..4 {
                assert_eq!(assembler.framebuffer().pixel(x, y), expected);
            }
        }
        assert_eq!(assembler.stats().rows_applied, 5);
    }

    #[test]
    fn test_last_sender_tracks_most_recent_valid_packet() {
        let mut assembler = Assembler::new(2, 2, CountingDisplay::new());
        let row = Packet::Row {
            index: 0,
            pixels: vec![0, 0],
        };

        let first: SocketAddr = "10.0.0.2:50000".parse().unwrap();
        let second: SocketAddr = "10.0.0.3:50001".parse().unwrap();

        assembler.handle_datagram(&row.encode(), first);
        assert_eq!(assembler.last_sender(), Some(first));

        assembler.handle_datagram(&Packet::FrameDone.encode(), second);
        assert_eq!(assembler.last_sender(), Some(second));

        // A bad packet from elsewhere must not steal the reply target
        assembler.handle_datagram(&[0x00], "10.0.0.4:50002".parse().unwrap());
        assert_eq!(assembler.last_sender(), Some(second));
    }

    #[test]
    fn test_next_frame_overwrites_previous() {
        let mut grid = PixelGrid::new(2, 2);
        grid.fill((255, 0, 0));

        let mut assembler = Assembler::new(2, 2, CountingDisplay::new());
        feed_frame(&mut assembler, &grid);

        grid.fill((0, 0, 255));
        feed_frame(&mut assembler, &grid);

        let blue = pack_rgb565(0, 0, 255);
        assert!(assembler.framebuffer().as_slice().iter().all(|&px| px == blue));
        assert_eq!(assembler.display_mut().refreshes, 2);
    }
}
