use crate::color::Color;

/// Output side of the cube: something that can push a frame to LEDs.
///
/// Implement this for the board's pixel driver. The cube calls `show` with
/// its whole framebuffer in strip order and the current global brightness;
/// applying the brightness is up to the driver.
pub trait LedStrip {
    fn show(&mut self, frame: &[Color], brightness: u8);
}

impl<S: LedStrip + ?Sized> LedStrip for &mut S {
    fn show(&mut self, frame: &[Color], brightness: u8) {
        (**self).show(frame, brightness)
    }
}

impl<S: LedStrip + ?Sized> LedStrip for Box<S> {
    fn show(&mut self, frame: &[Color], brightness: u8) {
        (**self).show(frame, brightness)
    }
}

/// A strip that drops every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStrip;

impl LedStrip for NullStrip {
    fn show(&mut self, _frame: &[Color], _brightness: u8) {}
}

/// A strip that keeps the last frame it was shown.
#[derive(Debug, Clone, Default)]
pub struct MemoryStrip {
    frame: Vec<Color>,
    brightness: u8,
    shows: u64,
}

impl MemoryStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last frame pushed, in strip order.
    pub fn frame(&self) -> &[Color] {
        &self.frame
    }

    /// Last frame with the brightness applied the way the LEDs would show it.
    pub fn scaled_frame(&self) -> Vec<Color> {
        self.frame.iter().map(|c| c.scale(self.brightness)).collect()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Number of times `show` has been called.
    pub fn show_count(&self) -> u64 {
        self.shows
    }
}

impl LedStrip for MemoryStrip {
    fn show(&mut self, frame: &[Color], brightness: u8) {
        self.frame.clear();
        self.frame.extend_from_slice(frame);
        self.brightness = brightness;
        self.shows += 1;
    }
}
