//! Frame encoder
//!
//! Walks a pixel grid row by row, quantizing each scanline to RGB565
//! and yielding the packet sequence for one full frame transmission.

use crate::codec::color::pack_rgb565;
use crate::grid::PixelGrid;
use crate::protocol::Packet;

/// Lazy packet sequence for one frame.
///
/// Yields exactly `height` [`Packet::Row`]s with strictly ascending
/// indices, then one [`Packet::FrameDone`]. Every row is always sent,
/// changed or not: re-sending unchanged rows costs a little bandwidth
/// but makes every frame self-healing after packet loss.
pub struct FrameEncoder<'a> {
    grid: &'a PixelGrid,
    next_row: usize,
    finished: bool,
}

impl<'a> FrameEncoder<'a> {
    pub fn new(grid: &'a PixelGrid) -> Self {
        Self {
            grid,
            next_row: 0,
            finished: false,
        }
    }

    /// Total packets a full frame produces (rows + FrameDone)
    pub fn packet_count(grid: &PixelGrid) -> usize {
        grid.height() + 1
    }

    fn encode_row(&self, y: usize) -> Vec<u16> {
        self.grid
            .row(y)
            .chunks_exact(3)
            .map(|px| pack_rgb565(px[0], px[1], px[2]))
            .collect()
    }
}

impl Iterator for FrameEncoder<'_> {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        if self.finished {
            return None;
        }
        if self.next_row < self.grid.height() {
            let packet = Packet::Row {
                index: self.next_row as u16,
                pixels: self.encode_row(self.next_row),
            };
            self.next_row += 1;
            Some(packet)
        } else {
            self.finished = true;
            Some(Packet::FrameDone)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished {
            0
        } else {
            self.grid.height() - self.next_row + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameEncoder<'_> {}
