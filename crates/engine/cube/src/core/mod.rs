// Core framebuffer and coordinate types

pub mod coord;
pub mod cube;

// Re-export main types
pub use coord::CubeLayout;
pub use cube::{Cube, DEFAULT_FADE};
