//! Wire format for the frame and event channels.
//!
//! Frame channel (sender → board), one datagram per packet:
//!
//! ```text
//! RowData:   [u16 row index, big-endian][W × u16 RGB565, little-endian]
//! FrameDone: [0xFF 0xFF]  (no payload)
//! ```
//!
//! A full frame is exactly H `RowData` packets (rows 0..H-1 in order)
//! followed by one `FrameDone`. There is no sequence number or frame
//! identity: a delayed packet from a stale frame may land in the frame
//! currently assembling. That transient glitch is repaired by the next
//! full frame and is an accepted trade-off of the format.
//!
//! Event channel (board → sender): a single byte per datagram, see
//! [`ButtonEvent`].

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::CodecError;

/// Row index value that marks the end of a frame
pub const FRAME_DONE: u16 = 0xFFFF;

/// One frame-channel packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// One scanline of pre-quantized RGB565 pixels
    Row { index: u16, pixels: Vec<u16> },
    /// End of frame, triggers exactly one display refresh
    FrameDone,
}

impl Packet {
    /// Serialize into a single datagram payload
    pub fn encode(&self) -> Bytes {
        match self {
            Packet::Row { index, pixels } => {
                let mut buf = BytesMut::with_capacity(2 + pixels.len() * 2);
                buf.put_u16(*index);
                for px in pixels {
                    buf.put_u16_le(*px);
                }
                buf.freeze()
            }
            Packet::FrameDone => Bytes::from_static(&[0xFF, 0xFF]),
        }
    }

    /// Parse a datagram for a matrix `width` pixels wide.
    ///
    /// The header is checked before the payload, so a bare `FrameDone`
    /// parses regardless of trailing bytes. Extra bytes after a full
    /// row payload are ignored.
    pub fn decode(data: &[u8], width: usize) -> Result<Packet, CodecError> {
        if data.len() < 2 {
            return Err(CodecError::Truncated(data.len()));
        }
        let index = u16::from_be_bytes([data[0], data[1]]);
        if index == FRAME_DONE {
            return Ok(Packet::FrameDone);
        }
        let payload = &data[2..];
        if payload.len() < width * 2 {
            return Err(CodecError::ShortRow {
                row: index,
                got: payload.len(),
            });
        }
        let pixels = payload[..width * 2]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        Ok(Packet::Row { index, pixels })
    }
}

/// Board button event, one byte on the wire.
///
/// The set is closed but forward-compatible: unknown codes decode to
/// `None` and the listener drops them without complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    /// Up / primary button (code 0x01)
    Primary,
    /// Down / secondary button (code 0x02)
    Secondary,
}

impl ButtonEvent {
    pub const ALL: [ButtonEvent; 2] = [ButtonEvent::Primary, ButtonEvent::Secondary];

    /// Wire code for this event
    pub fn code(self) -> u8 {
        match self {
            ButtonEvent::Primary => 0x01,
            ButtonEvent::Secondary => 0x02,
        }
    }

    /// Decode a wire byte; undefined values are a no-op
    pub fn from_code(code: u8) -> Option<ButtonEvent> {
        match code {
            0x01 => Some(ButtonEvent::Primary),
            0x02 => Some(ButtonEvent::Secondary),
            _ => None,
        }
    }

    pub(crate) fn idx(self) -> usize {
        match self {
            ButtonEvent::Primary => 0,
            ButtonEvent::Secondary => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_encode_layout() {
        let packet = Packet::Row {
            index: 3,
            pixels: vec![0xF800, 0x07E0],
        };
        let bytes = packet.encode();
        // Header big-endian, pixels little-endian
        assert_eq!(&bytes[..], &[0x00, 0x03, 0x00, 0xF8, 0xE0, 0x07]);
    }

    #[test]
    fn test_frame_done_encode() {
        assert_eq!(&Packet::FrameDone.encode()[..], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_decode_roundtrip() {
        let packet = Packet::Row {
            index: 42,
            pixels: vec![0x1234, 0xABCD, 0x0000, 0xFFFF],
        };
        let decoded = Packet::decode(&packet.encode(), 4).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_decode_frame_done_ignores_trailing_bytes() {
        let decoded = Packet::decode(&[0xFF, 0xFF, 0x01, 0x02], 64).unwrap();
        assert_eq!(decoded, Packet::FrameDone);
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(
            Packet::decode(&[0x00], 64),
            Err(CodecError::Truncated(1))
        ));
        assert!(matches!(
            Packet::decode(&[], 64),
            Err(CodecError::Truncated(0))
        ));
    }

    #[test]
    fn test_decode_short_row() {
        // Row 5 with only 3 pixels' worth of payload for an 8-wide matrix
        let mut data = vec![0x00, 0x05];
        data.extend_from_slice(&[0u8; 6]);
        assert!(matches!(
            Packet::decode(&data, 8),
            Err(CodecError::ShortRow { row: 5, got: 6 })
        ));
    }

    #[test]
    fn test_decode_ignores_extra_payload() {
        let mut data = vec![0x00, 0x00];
        data.extend_from_slice(&[0xAA; 8]); // 2 pixels + 4 junk bytes
        let decoded = Packet::decode(&data, 2).unwrap();
        assert_eq!(
            decoded,
            Packet::Row {
                index: 0,
                pixels: vec![0xAAAA, 0xAAAA],
            }
        );
    }

    #[test]
    fn test_button_event_codes() {
        assert_eq!(ButtonEvent::Primary.code(), 0x01);
        assert_eq!(ButtonEvent::Secondary.code(), 0x02);
        assert_eq!(ButtonEvent::from_code(0x01), Some(ButtonEvent::Primary));
        assert_eq!(ButtonEvent::from_code(0x02), Some(ButtonEvent::Secondary));
    }

    #[test]
    fn test_button_event_unknown_codes_ignored() {
        assert_eq!(ButtonEvent::from_code(0x00), None);
        assert_eq!(ButtonEvent::from_code(0x03), None);
        assert_eq!(ButtonEvent::from_code(0xFF), None);
    }
}
