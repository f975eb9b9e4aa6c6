//! RGB888 ↔ RGB565 color quantization.
//!
//! Packing keeps the top 5 bits of red, 6 of green and 5 of blue.
//! It is deterministic and many-to-one; unpacking reconstructs an
//! approximation with the discarded low bits zeroed, so the error is
//! at most 7 for red/blue and 3 for green.

/// Quantize an 8-bit RGB triple to a 16-bit RGB565 value
#[inline]
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Expand an RGB565 value back to 8-bit channels (approximate)
#[inline]
pub fn unpack_rgb565(value: u16) -> (u8, u8, u8) {
    let r = ((value >> 11) as u8) << 3;
    let g = (((value >> 5) & 0x3F) as u8) << 2;
    let b = ((value & 0x1F) as u8) << 3;
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_eq!(pack_rgb565(0, 0, 0), 0x0000);
        assert_eq!(pack_rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(pack_rgb565(255, 0, 0), 0xF800);
        assert_eq!(pack_rgb565(0, 255, 0), 0x07E0);
        assert_eq!(pack_rgb565(0, 0, 255), 0x001F);
    }

    #[test]
    fn test_unpack_known_values() {
        assert_eq!(unpack_rgb565(0xF800), (0xF8, 0, 0));
        assert_eq!(unpack_rgb565(0x07E0), (0, 0xFC, 0));
        assert_eq!(unpack_rgb565(0x001F), (0, 0, 0xF8));
    }

    proptest! {
        #[test]
        fn prop_pack_is_deterministic(r: u8, g: u8, b: u8) {
            prop_assert_eq!(pack_rgb565(r, g, b), pack_rgb565(r, g, b));
        }

        #[test]
        fn prop_quantization_error_bound(r: u8, g: u8, b: u8) {
            let (r2, g2, b2) = unpack_rgb565(pack_rgb565(r, g, b));
            // Truncation only drops low bits, never rounds up
            prop_assert!(r2 <= r && r - r2 <= 7);
            prop_assert!(g2 <= g && g - g2 <= 3);
            prop_assert!(b2 <= b && b - b2 <= 7);
        }

        #[test]
        fn prop_pack_unpack_pack_is_stable(r: u8, g: u8, b: u8) {
            let packed = pack_rgb565(r, g, b);
            let (r2, g2, b2) = unpack_rgb565(packed);
            prop_assert_eq!(pack_rgb565(r2, g2, b2), packed);
        }
    }
}
