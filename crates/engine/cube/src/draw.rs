//! Drawing primitives: lines, solid spheres and shells
//!
//! Every primitive plots through [`Cube::set_voxel`], so shapes that extend
//! past the cube are clipped one voxel at a time.

use crate::color::Color;
use crate::core::Cube;
use crate::device::strip::LedStrip;
use glam::{IVec3, Vec3};

/// Band tolerance used by [`Cube::shell`].
pub const DEFAULT_SHELL_THICKNESS: f32 = 0.1;

/// Rasterize a 3D line with the driving-axis form of Bresenham's algorithm.
///
/// The axis with the largest delta is stepped every iteration; ties prefer
/// x, then y, then z. The result holds `driving_delta + 1` points and always
/// starts at `from` and ends at `to`.
pub fn bresenham(from: IVec3, to: IVec3) -> Vec<IVec3> {
    let delta = to - from;
    let step = IVec3::new(
        if delta.x < 0 { -1 } else { 1 },
        if delta.y < 0 { -1 } else { 1 },
        if delta.z < 0 { -1 } else { 1 },
    );
    let mag = delta.abs();
    let twice = mag * 2;

    // Driving axis first, then the two secondaries.
    let (drive, a, b) = if mag.x >= mag.y && mag.x >= mag.z {
        (0, 1, 2)
    } else if mag.y >= mag.x && mag.y >= mag.z {
        (1, 0, 2)
    } else {
        (2, 1, 0)
    };

    let mut err_a = twice[a] - mag[drive];
    let mut err_b = twice[b] - mag[drive];
    let mut current = from;
    let mut points = Vec::with_capacity(mag[drive] as usize + 1);

    for _ in 0..mag[drive] {
        points.push(current);

        if err_a > 0 {
            current[a] += step[a];
            err_a -= twice[drive];
        }
        if err_b > 0 {
            current[b] += step[b];
            err_b -= twice[drive];
        }

        err_a += twice[a];
        err_b += twice[b];
        current[drive] += step[drive];
    }

    points.push(current);
    points
}

impl<S: LedStrip> Cube<S> {
    /// Draw a line between two voxels, endpoints included.
    pub fn line(&mut self, from: IVec3, to: IVec3, color: Color) {
        for pos in bresenham(from, to) {
            self.set_voxel(pos, color);
        }
    }

    /// Draw a line between two points, truncating each coordinate first.
    pub fn line_points(&mut self, from: Vec3, to: Vec3, color: Color) {
        self.line(from.as_ivec3(), to.as_ivec3(), color);
    }

    /// Draw a filled sphere centred on a voxel.
    ///
    /// Scans the `[-r, r]³` box around `center` and plots every offset whose
    /// length is at most `radius`.
    pub fn sphere(&mut self, center: IVec3, radius: i32, color: Color) {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    let dist = ((dx * dx + dy * dy + dz * dz) as f64).sqrt();
                    if dist <= radius as f64 {
                        self.set_voxel(center + IVec3::new(dx, dy, dz), color);
                    }
                }
            }
        }
    }

    /// Draw a filled sphere, truncating the center to a voxel first.
    pub fn sphere_point(&mut self, center: Vec3, radius: i32, color: Color) {
        self.sphere(center.as_ivec3(), radius, color);
    }

    /// Draw a hollow sphere with the default band tolerance.
    pub fn shell(&mut self, center: Vec3, radius: f32, color: Color) {
        self.shell_with_thickness(center, radius, DEFAULT_SHELL_THICKNESS, color);
    }

    /// Draw a hollow sphere.
    ///
    /// Every voxel of the cube is tested, and plotted when its distance from
    /// `center` is within `thickness` of `radius`. The center and radius
    /// keep sub-voxel precision. Thickness is a tolerance on distance, so
    /// large values fill the sphere in.
    pub fn shell_with_thickness(&mut self, center: Vec3, radius: f32, thickness: f32, color: Color) {
        let center = center.as_dvec3();
        let radius = radius as f64;
        let thickness = thickness as f64;
        let size = self.size() as i32;

        for i in 0..size {
            for j in 0..size {
                for k in 0..size {
                    let voxel = IVec3::new(i, j, k);
                    let dist = voxel.as_dvec3().distance(center);
                    if (dist - radius).abs() < thickness {
                        self.set_voxel(voxel, color);
                    }
                }
            }
        }
    }
}
