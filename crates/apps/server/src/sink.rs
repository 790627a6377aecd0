//! Host stand-in for the LED driver

use ledcube::{Color, LedStrip};

/// An [`LedStrip`] that logs a summary of each flush instead of driving LEDs.
#[derive(Debug, Default)]
pub struct LogStrip {
    shows: u64,
    last_lit: usize,
}

impl LogStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_count(&self) -> u64 {
        self.shows
    }

    /// Voxels that were not black in the last flush.
    pub fn last_lit(&self) -> usize {
        self.last_lit
    }
}

impl LedStrip for LogStrip {
    fn show(&mut self, frame: &[Color], brightness: u8) {
        self.shows += 1;
        self.last_lit = frame.iter().filter(|c| !c.scale(brightness).is_black()).count();
        tracing::debug!(
            flush = self.shows,
            lit = self.last_lit,
            brightness,
            "strip flushed"
        );
    }
}
