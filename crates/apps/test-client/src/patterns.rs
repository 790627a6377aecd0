//! Animations rendered frame by frame into a cube

use clap::ValueEnum;
use glam::{IVec3, Vec3};
use ledcube::{Color, Cube, LedStrip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest red or green level a 3-3-2 frame can carry.
pub const STREAM_MAX_BRIGHTNESS: u8 = 56;

const PULSE_STEP: f32 = 0.5;
const PULSE_THICKNESS: f32 = 0.35;
const SPIN_RADIANS_PER_FRAME: f32 = 0.15;
const SPIN_FADE: f32 = 0.35;
const RAIN_FADE: f32 = 0.3;
const RAIN_SPAWN_CHANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    /// Shell expanding from the center, colored by radius
    Pulse,
    /// Vertical plane sweeping around the z axis
    Spin,
    /// Drops falling from the top layer
    Rain,
}

#[derive(Debug, Clone, Copy)]
struct Raindrop {
    x: i32,
    y: i32,
    z: f32,
    speed: f32,
    color: Color,
}

/// Renders one [`Pattern`] into a cube, one frame per [`Animator::step`].
pub struct Animator {
    pattern: Pattern,
    frame: u64,
    drops: Vec<Raindrop>,
    rng: StdRng,
}

impl Animator {
    pub fn new(pattern: Pattern, seed: u64) -> Self {
        Self {
            pattern,
            frame: 0,
            drops: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Draw the next frame.
    pub fn step<S: LedStrip>(&mut self, cube: &mut Cube<S>) {
        match self.pattern {
            Pattern::Pulse => self.pulse(cube),
            Pattern::Spin => self.spin(cube),
            Pattern::Rain => self.rain(cube),
        }
        self.frame += 1;
    }

    fn pulse<S: LedStrip>(&mut self, cube: &mut Cube<S>) {
        // Roughly the corner distance from the center
        let max_radius = cube.size() as f32 * 0.9;
        let steps = ((max_radius / PULSE_STEP) as u64).max(1);
        let radius = (self.frame % steps) as f32 * PULSE_STEP;

        cube.clear();
        let color = cube.color_map(radius, 0.0, max_radius);
        cube.shell_with_thickness(cube.center(), radius, PULSE_THICKNESS, color);
    }

    fn spin<S: LedStrip>(&mut self, cube: &mut Cube<S>) {
        let angle = self.frame as f32 * SPIN_RADIANS_PER_FRAME;
        let center = cube.center();
        let arm = Vec3::new(angle.cos(), angle.sin(), 0.0) * (cube.size() as f32 / 2.0);
        let color = cube.color_map((self.frame % 64) as f32, 0.0, 64.0);

        cube.fade(SPIN_FADE);
        for z in 0..cube.size() {
            let z = z as f32;
            let from = Vec3::new(center.x + arm.x, center.y + arm.y, z);
            let to = Vec3::new(center.x - arm.x, center.y - arm.y, z);
            cube.line_points(from, to, color);
        }
    }

    fn rain<S: LedStrip>(&mut self, cube: &mut Cube<S>) {
        let size = cube.size() as i32;
        cube.fade(RAIN_FADE);

        for _ in 0..(size / 4).max(1) {
            if self.rng.random_bool(RAIN_SPAWN_CHANCE) {
                let hue: f32 = self.rng.random_range(0.0..1.0);
                self.drops.push(Raindrop {
                    x: self.rng.random_range(0..size),
                    y: self.rng.random_range(0..size),
                    z: (size - 1) as f32,
                    speed: self.rng.random_range(0.3..1.0),
                    color: cube.color_map(hue, 0.0, 1.0),
                });
            }
        }

        for drop in &mut self.drops {
            cube.set_voxel(IVec3::new(drop.x, drop.y, drop.z as i32), drop.color);
            drop.z -= drop.speed;
        }
        self.drops.retain(|drop| drop.z >= 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(cube: &Cube) -> usize {
        cube.as_slice().iter().filter(|c| !c.is_black()).count()
    }

    #[test]
    fn test_pulse_starts_at_center() {
        let mut cube = Cube::new(8, STREAM_MAX_BRIGHTNESS);
        let mut animator = Animator::new(Pattern::Pulse, 0);
        animator.step(&mut cube);

        assert_eq!(animator.frame(), 1);
        assert_eq!(lit(&cube), 1);
        assert_eq!(cube.get_voxel(IVec3::splat(3)), Color::new(0, 0, STREAM_MAX_BRIGHTNESS));
    }

    #[test]
    fn test_pulse_clears_between_frames() {
        let mut cube = Cube::new(8, STREAM_MAX_BRIGHTNESS);
        let mut animator = Animator::new(Pattern::Pulse, 0);
        animator.step(&mut cube);
        animator.step(&mut cube);
        animator.step(&mut cube);

        // radius 1.0: the six face neighbours of the center
        assert_eq!(lit(&cube), 6);
        assert!(cube.get_voxel(IVec3::splat(3)).is_black());
        assert!(!cube.get_voxel(IVec3::new(4, 3, 3)).is_black());
    }

    #[test]
    fn test_spin_first_frame_is_plane_along_x() {
        let mut cube = Cube::new(8, STREAM_MAX_BRIGHTNESS);
        let mut animator = Animator::new(Pattern::Spin, 0);
        animator.step(&mut cube);

        for z in 0..8 {
            for x in 0..8 {
                assert!(!cube.get_voxel(IVec3::new(x, 3, z)).is_black());
            }
        }
        assert_eq!(lit(&cube), 64);
    }

    #[test]
    fn test_spin_trail_fades() {
        let mut cube = Cube::new(8, STREAM_MAX_BRIGHTNESS);
        let mut animator = Animator::new(Pattern::Spin, 0);
        animator.step(&mut cube);
        animator.step(&mut cube);

        // lit by the first frame only, then dimmed once: 56 - 56 * 0.35 = 36.4
        assert_eq!(cube.get_voxel(IVec3::new(7, 3, 0)), Color::new(0, 0, 36));
    }

    #[test]
    fn test_rain_drops_stay_inside() {
        let mut cube = Cube::new(8, STREAM_MAX_BRIGHTNESS);
        let mut animator = Animator::new(Pattern::Rain, 7);
        for _ in 0..200 {
            animator.step(&mut cube);
            for drop in &animator.drops {
                assert!((0..8).contains(&drop.x));
                assert!((0..8).contains(&drop.y));
                assert!(drop.z >= 0.0 && drop.z < 8.0);
            }
        }
        assert!(lit(&cube) > 0);
        // each drop lives at most 8 / 0.3 frames with two spawn attempts per frame
        assert!(animator.drops.len() <= 2 * 27);
    }

    #[test]
    fn test_rain_is_deterministic_per_seed() {
        let mut a = Cube::new(4, STREAM_MAX_BRIGHTNESS);
        let mut b = Cube::new(4, STREAM_MAX_BRIGHTNESS);
        let mut first = Animator::new(Pattern::Rain, 42);
        let mut second = Animator::new(Pattern::Rain, 42);
        for _ in 0..30 {
            first.step(&mut a);
            second.step(&mut b);
        }
        assert_eq!(a.as_slice(), b.as_slice());
    }
}
