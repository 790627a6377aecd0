//! Streamed frame format
//!
//! A frame is exactly `size³` bytes, one per voxel, in strip order. Each byte
//! packs a color as 3-3-2 bits:
//!
//! ```text
//!  7 6 5 | 4 3 2 | 1 0
//!   red  | green | blue
//! ```
//!
//! Decoding places the bits so that red and green top out at 56 and blue at
//! 48, keeping streamed frames within a safe current budget without any
//! further scaling.
//!
//! # Example
//!
//! ```
//! use ledcube::{io::frame::decode_332, Color, Cube};
//!
//! let mut cube = Cube::new(2, 50);
//! assert!(cube.apply_frame(&[0xff; 8]));
//! assert_eq!(cube.get_voxel_index(0), decode_332(0xff));
//! assert_eq!(decode_332(0xff), Color::new(56, 56, 48));
//!
//! // Frames of the wrong size are ignored
//! assert!(!cube.apply_frame(&[0x00; 7]));
//! ```

use crate::color::Color;
use crate::core::Cube;
use crate::device::strip::LedStrip;

/// Decode one 3-3-2 packed byte.
pub const fn decode_332(byte: u8) -> Color {
    Color::new((byte & 0xE0) >> 2, (byte & 0x1C) << 1, (byte & 0x03) << 4)
}

/// Pack a color into one 3-3-2 byte.
///
/// The inverse of [`decode_332`]: channels above the largest decodable value
/// (56 for red and green, 48 for blue) saturate.
pub const fn encode_332(color: Color) -> u8 {
    const fn bits(channel: u8, shift: u32, max: u8) -> u8 {
        let v = channel >> shift;
        if v > max {
            max
        } else {
            v
        }
    }
    (bits(color.red, 3, 7) << 5) | (bits(color.green, 3, 7) << 2) | bits(color.blue, 4, 3)
}

impl<S: LedStrip> Cube<S> {
    /// Decode a streamed frame into the framebuffer and flush.
    ///
    /// Returns `false` and leaves the cube untouched (no flush) when `data` is
    /// not exactly `size³` bytes long.
    pub fn apply_frame(&mut self, data: &[u8]) -> bool {
        let size = self.size() as usize;
        if data.len() != self.leds.len() {
            return false;
        }

        // Strip layout written out in full: z*size² + x*size + y.
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    let index = z * size * size + x * size + y;
                    self.leds[index] = decode_332(data[index]);
                }
            }
        }

        self.show();
        true
    }

    /// Pack the framebuffer into a streamable frame.
    pub fn encode_frame(&self) -> Vec<u8> {
        self.leds.iter().map(|&c| encode_332(c)).collect()
    }
}
