//! RGB colors and the interpolation helpers used by the drawing API
//!
//! Channels are plain 8-bit values with no alpha. Interpolation uses integer
//! arithmetic with truncating division, so gradients step rather than blend;
//! streamed animations rely on these exact values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Virtual range `color_map` normalizes its input into.
const RAMP_RANGE: f32 = 1024.0;

/// An RGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            red: ((rgb >> 16) & 0xff) as u8,
            green: ((rgb >> 8) & 0xff) as u8,
            blue: (rgb & 0xff) as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    pub const fn to_hex(self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    /// True when every channel is zero.
    pub const fn is_black(self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }

    /// Scale every channel by a global brightness (FastLED `scale8`).
    pub const fn scale(self, brightness: u8) -> Self {
        const fn scale8(channel: u8, scale: u8) -> u8 {
            ((channel as u16 * (1 + scale as u16)) >> 8) as u8
        }
        Self {
            red: scale8(self.red, brightness),
            green: scale8(self.green, brightness),
            blue: scale8(self.blue, brightness),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Errors produced when parsing a [`Color`] from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("invalid hex color '{0}', expected #rrggbb")]
    InvalidHex(String),
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#rrggbb` or any name known to [`crate::palette::named`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(ColorParseError::InvalidHex(s.to_string()));
            }
            return u32::from_str_radix(hex, 16)
                .map(Color::from_hex)
                .map_err(|_| ColorParseError::InvalidHex(s.to_string()));
        }
        crate::palette::named(s).ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Linear interpolation between colors `a` and `b`.
///
/// Returns `a` when `val == min` and `b` when `val == max`. Each channel is
/// computed as `a + (b - a) * (val - min) / (max - min)` with truncating
/// integer division and narrowed to 8 bits by wrapping. Values outside
/// `[min, max]` extrapolate with 32-bit wrapping arithmetic.
///
/// # Panics
/// Panics when `max == min` (division by zero).
pub fn lerp_color(a: Color, b: Color, val: i32, min: i32, max: i32) -> Color {
    let channel = |from: u8, to: u8| {
        let from = from as i32;
        let to = to as i32;
        let span = (to - from).wrapping_mul(val.wrapping_sub(min));
        from.wrapping_add(span.wrapping_div(max.wrapping_sub(min))) as u8
    };
    Color::new(
        channel(a.red, b.red),
        channel(a.green, b.green),
        channel(a.blue, b.blue),
    )
}

/// The six anchors of the color ramp at a given brightness:
/// blue, cyan, green, yellow, red, magenta.
pub fn ramp_anchors(max_brightness: u8) -> [Color; 6] {
    let m = max_brightness;
    [
        Color::new(0, 0, m),
        Color::new(0, m, m),
        Color::new(0, m, 0),
        Color::new(m, m, 0),
        Color::new(m, 0, 0),
        Color::new(m, 0, m),
    ]
}

/// Map a value into a color on a cyclic ramp.
///
/// `val` is normalized into a virtual range of 1024 units and split into six
/// segments that run blue → cyan → green → yellow → red → magenta → blue, so
/// `min` and values just under `max` both land near blue. The value and the
/// segment bounds are truncated to integers before interpolating.
///
/// `max == min` is not guarded; callers must pass distinct bounds.
pub fn color_map(val: f32, min: f32, max: f32, max_brightness: u8) -> Color {
    let val = RAMP_RANGE * (val - min) / (max - min);
    let colors = ramp_anchors(max_brightness);
    let bound = |k: usize| k as f32 * RAMP_RANGE / 6.0;

    let segment = (1..6)
        .find(|&k| val <= bound(k))
        .map(|k| k - 1)
        .unwrap_or(5);

    let lo = bound(segment);
    let hi = bound(segment + 1);
    lerp_color(
        colors[segment],
        colors[(segment + 1) % 6],
        val as i32,
        lo as i32,
        hi as i32,
    )
}
