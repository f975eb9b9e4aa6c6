//! Frame transport codec
//!
//! Converts a complete RGB888 pixel grid into the ordered packet
//! sequence the board consumes: H row packets of RGB565 pixels,
//! then one `FrameDone`.

pub mod color;
pub mod encoder;

pub use color::{pack_rgb565, unpack_rgb565};
pub use encoder::FrameEncoder;
