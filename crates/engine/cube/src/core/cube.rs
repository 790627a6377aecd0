//! The cube framebuffer
//!
//! `Cube` owns one color per LED and the strip those colors are flushed to.
//! Drawing only mutates memory; nothing reaches the LEDs until [`Cube::show`]
//! runs, which the caller decides except for [`Cube::fade`] and
//! `Cube::apply_frame`, which flush on their own.

use super::coord::CubeLayout;
use crate::color::{self, Color};
use crate::device::strip::{LedStrip, NullStrip};
use crate::palette::BLACK;
use glam::{IVec3, Vec3};

/// Default coefficient for [`Cube::fade`].
pub const DEFAULT_FADE: f32 = 0.0625;

/// An N×N×N LED cube.
#[derive(Debug, Clone)]
pub struct Cube<S = NullStrip> {
    layout: CubeLayout,
    max_brightness: u8,
    brightness: u8,
    center: Vec3,
    pub(crate) leds: Vec<Color>,
    strip: S,
}

impl Cube<NullStrip> {
    /// Create a cube that is not connected to any LEDs.
    ///
    /// `max_brightness` caps every brightness request; it exists to keep the
    /// strip from drawing enough current to distort colors.
    pub fn new(size: u32, max_brightness: u8) -> Self {
        Self::with_strip(size, max_brightness, NullStrip)
    }
}

impl<S: LedStrip> Cube<S> {
    /// Create a cube that flushes to `strip`. Every voxel starts black and the
    /// brightness starts at `max_brightness`.
    ///
    /// # Panics
    /// Panics if `size` exceeds [`CubeLayout::MAX_SIZE`].
    pub fn with_strip(size: u32, max_brightness: u8, strip: S) -> Self {
        let layout = CubeLayout::new(size);
        Self {
            layout,
            max_brightness,
            brightness: max_brightness,
            center: layout.center(),
            leds: vec![BLACK; layout.voxel_count()],
            strip,
        }
    }

    pub fn size(&self) -> u32 {
        self.layout.size()
    }

    pub fn layout(&self) -> CubeLayout {
        self.layout
    }

    pub fn max_brightness(&self) -> u8 {
        self.max_brightness
    }

    /// Geometric center, computed once at construction.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    /// Framebuffer in strip order.
    pub fn as_slice(&self) -> &[Color] {
        &self.leds
    }

    /// Set the voxel at `pos`. Coordinates outside the cube are ignored.
    pub fn set_voxel(&mut self, pos: IVec3, color: Color) {
        if self.layout.contains(pos) {
            let index = self.layout.index_of(pos) as usize;
            self.leds[index] = color;
        }
    }

    /// Set a voxel by strip index.
    ///
    /// # Panics
    /// Panics if `index >= size³`.
    pub fn set_voxel_index(&mut self, index: usize, color: Color) {
        self.leds[index] = color;
    }

    /// Set the voxel containing `p`; each coordinate is truncated toward zero.
    pub fn set_voxel_point(&mut self, p: Vec3, color: Color) {
        self.set_voxel(p.as_ivec3(), color);
    }

    /// Get a voxel by strip index.
    ///
    /// # Panics
    /// Panics if `index >= size³`.
    pub fn get_voxel_index(&self, index: usize) -> Color {
        self.leds[index]
    }

    /// Get the voxel at `pos`.
    ///
    /// Unlike [`Cube::set_voxel`] this does not check the coordinate against
    /// the cube: the raw strip index is used as is, so an out-of-range axis
    /// reads a neighbouring voxel.
    ///
    /// # Panics
    /// Panics if the raw index falls outside the framebuffer.
    pub fn get_voxel(&self, pos: IVec3) -> Color {
        let index = self.layout.index_of(pos);
        self.leds[index as usize]
    }

    /// Get the voxel containing `p`; each coordinate is truncated toward zero.
    pub fn get_voxel_point(&self, p: Vec3) -> Color {
        self.get_voxel(p.as_ivec3())
    }

    /// Set the entire cube to one color.
    pub fn background(&mut self, color: Color) {
        self.leds.fill(color);
    }

    /// Set the entire cube to black.
    pub fn clear(&mut self) {
        self.background(BLACK);
    }

    /// Dim every voxel toward black, then flush.
    ///
    /// Each nonzero channel becomes `channel - channel * coefficient`,
    /// evaluated in floating point and truncated back to 8 bits. A coefficient
    /// of `1.0` clears the cube in one pass.
    pub fn fade(&mut self, coefficient: f32) {
        let dim = |channel: u8| {
            if channel > 0 {
                let c = channel as f32;
                (c - c * coefficient) as u8
            } else {
                channel
            }
        };
        for led in &mut self.leds {
            *led = Color::new(dim(led.red), dim(led.green), dim(led.blue));
        }
        self.show();
    }

    /// Push the framebuffer to the strip.
    pub fn show(&mut self) {
        self.strip.show(&self.leds, self.brightness);
    }

    /// Set the global brightness, constrained to `[1, max_brightness]`.
    pub fn set_brightness(&mut self, value: i32) {
        let max = self.max_brightness as i32;
        let value = if value < 1 {
            1
        } else if value > max {
            max
        } else {
            value
        };
        self.brightness = value as u8;
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Map a value onto the color ramp at this cube's brightness cap.
    /// See [`color::color_map`].
    pub fn color_map(&self, val: f32, min: f32, max: f32) -> Color {
        color::color_map(val, min, max, self.max_brightness)
    }

    /// Interpolate between two colors. See [`color::lerp_color`].
    pub fn lerp_color(&self, a: Color, b: Color, val: i32, min: i32, max: i32) -> Color {
        color::lerp_color(a, b, val, min, max)
    }
}
