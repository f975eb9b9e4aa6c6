//! # LED Matrix Streamer
//!
//! Low-latency streaming of a W×H pixel grid to a remote LED matrix
//! board over UDP, with a debounced button-event back-channel.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────── SENDER ────────────────────────┐
//! │  render callback ──► PixelGrid (RGB888)                │
//! │                          │                             │
//! │                          ▼                             │
//! │  FrameEncoder: H row packets (RGB565) + FrameDone      │
//! │                          │                             │
//! │                          ▼                             │
//! │  FrameSender: burst-paced UDP emission                 │
//! └──────────────────────────┼─────────────────────────────┘
//!                            │ UDP (fire-and-forget)
//! ┌──────────────────────────▼───────────────── RECEIVER ──┐
//! │  Assembler: row packets ──► Framebuffer (RGB565)       │
//! │             FrameDone   ──► DisplayDevice::refresh     │
//! │  ButtonInput ──► Debouncer ──► 1-byte event packet     │
//! └──────────────────────────┬─────────────────────────────┘
//!                            │ UDP (event channel)
//!              EventListener ◄┘ (sender side, non-blocking)
//! ```
//!
//! The frame channel carries no acknowledgments, no retransmission and
//! no frame identity: a lost packet shows up as a one-frame visual
//! artifact that the next full frame repairs.

pub mod assembler;
pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod network;
pub mod protocol;
pub mod runner;

pub use error::{Error, Result};

/// Application-wide constants
pub mod constants {
    /// Default matrix width in pixels
    pub const DEFAULT_WIDTH: usize = 64;

    /// Default matrix height in pixels
    pub const DEFAULT_HEIGHT: usize = 64;

    /// Default target frame rate
    pub const DEFAULT_FPS: u32 = 30;

    /// Default UDP port for pixel data (sender → board)
    pub const DEFAULT_FRAME_PORT: u16 = 7777;

    /// Default UDP port for button events (board → sender)
    pub const DEFAULT_EVENT_PORT: u16 = 7778;

    /// Packets per burst before the pacing delay kicks in
    pub const DEFAULT_BURST_SIZE: usize = 4;

    /// Delay between packet bursts in milliseconds
    pub const DEFAULT_BURST_DELAY_MS: u64 = 4;

    /// Minimum time between two accepted presses of the same button
    pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

    /// Capacity of the bounded button-event channel
    pub const EVENT_CHANNEL_CAPACITY: usize = 256;

    /// Socket receive buffer size in bytes
    pub const RECV_BUFFER_SIZE: usize = 256 * 1024;
}
