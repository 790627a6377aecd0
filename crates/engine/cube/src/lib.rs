//! Voxel core for addressable-LED cubes.
//!
//! A [`Cube`] holds one [`Color`] per LED, laid out along the strip as
//! `z*size² + x*size + y`. Drawing primitives write into that buffer and
//! [`Cube::show`] hands it to an [`LedStrip`]. Streamed frames use the
//! 3-3-2 packed format in [`io::frame`].
//!
//! ```
//! use ledcube::{palette, Cube};
//! use glam::IVec3;
//!
//! let mut cube = Cube::new(8, 50);
//! cube.line(IVec3::ZERO, IVec3::new(7, 7, 7), palette::RED);
//! cube.sphere(IVec3::splat(3), 2, palette::BLUE);
//! assert_eq!(cube.get_voxel(IVec3::new(7, 7, 7)), palette::RED);
//! ```

pub mod color;
pub mod core;
pub mod device;
pub mod draw;
pub mod io;
pub mod palette;

pub use color::{color_map, lerp_color, Color, ColorParseError};
pub use crate::core::{Cube, CubeLayout, DEFAULT_FADE};
pub use device::{
    format_mac, parse_port, CloudLink, LedStrip, MemoryStrip, ModeSwitches, NetworkInfo,
    NullStrip, Tilt, DEFAULT_MAX_BRIGHTNESS, DEFAULT_SIZE, NETWORK_REFRESH_SECS, STREAMING_PORT,
};
pub use draw::{bresenham, DEFAULT_SHELL_THICKNESS};
pub use io::frame::{decode_332, encode_332};

/// Shape centres with sub-voxel precision.
pub type Point = glam::Vec3;

// Re-export glam for convenience
pub use glam;
