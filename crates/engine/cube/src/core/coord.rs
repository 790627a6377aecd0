// Coordinate mapping between cube space and the LED strip

use glam::{IVec3, Vec3};

/// Maps voxel coordinates onto the flat LED strip.
///
/// The strip is wired so that `index = z*size² + x*size + y`: z selects a
/// layer, x a column within the layer and y the LED within the column. Every
/// read and write of the framebuffer agrees on this layout, and streamed
/// frames are laid out the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeLayout {
    size: i32,
}

impl CubeLayout {
    /// Largest edge length whose strip indices still fit in an `i32`.
    pub const MAX_SIZE: u32 = 1290;

    /// Create a layout for a `size`×`size`×`size` cube.
    ///
    /// # Panics
    /// Panics if `size` exceeds [`CubeLayout::MAX_SIZE`].
    pub const fn new(size: u32) -> Self {
        assert!(size <= Self::MAX_SIZE, "cube size too large for i32 strip indices");
        Self { size: size as i32 }
    }

    /// Edge length in voxels.
    pub const fn size(&self) -> u32 {
        self.size as u32
    }

    /// Number of voxels (`size³`).
    pub const fn voxel_count(&self) -> usize {
        let s = self.size as usize;
        s * s * s
    }

    /// Raw strip index for `(x, y, z)`. No bounds check: coordinates outside
    /// the cube map to indices of other voxels or outside the strip.
    pub const fn index(&self, x: i32, y: i32, z: i32) -> i32 {
        z * self.size * self.size + x * self.size + y
    }

    pub const fn index_of(&self, pos: IVec3) -> i32 {
        self.index(pos.x, pos.y, pos.z)
    }

    /// Check whether every axis of `pos` lies in `[0, size)`.
    pub const fn contains(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < self.size
            && pos.y < self.size
            && pos.z < self.size
    }

    /// Coordinate of an in-range strip index.
    pub const fn coord_of(&self, index: usize) -> IVec3 {
        let s = self.size as usize;
        let layer = s * s;
        let rem = index % layer;
        IVec3::new((rem / s) as i32, (rem % s) as i32, (index / layer) as i32)
    }

    /// Geometric center, `(size-1)/2` on each axis using integer division.
    pub fn center(&self) -> Vec3 {
        let c = ((self.size - 1) / 2) as f32;
        Vec3::splat(c)
    }

    /// Iterate every in-cube coordinate in x, y, z loop order.
    pub fn coords(&self) -> impl Iterator<Item = IVec3> {
        let s = self.size;
        (0..s).flat_map(move |x| (0..s).flat_map(move |y| (0..s).map(move |z| IVec3::new(x, y, z))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_layout_indexes_in_range() {
        let layout = CubeLayout::new(CubeLayout::MAX_SIZE);
        let last = layout.index(1289, 1289, 1289);
        assert_eq!(last as usize, layout.voxel_count() - 1);
    }

    #[test]
    #[should_panic]
    fn test_oversized_layout_panics() {
        CubeLayout::new(CubeLayout::MAX_SIZE + 1);
    }

    #[test]
    fn test_index_layout() {
        let layout = CubeLayout::new(8);
        assert_eq!(layout.index(0, 0, 0), 0);
        assert_eq!(layout.index(0, 1, 0), 1);
        assert_eq!(layout.index(1, 0, 0), 8);
        assert_eq!(layout.index(0, 0, 1), 64);
        assert_eq!(layout.index(7, 7, 7), 511);
    }

    #[test]
    fn test_index_does_not_check_bounds() {
        let layout = CubeLayout::new(4);
        // y = 4 spills into the next column
        assert_eq!(layout.index(0, 4, 0), layout.index(1, 0, 0));
        assert_eq!(layout.index(-1, 0, 0), -4);
    }

    #[test]
    fn test_coord_of_inverts_index() {
        let layout = CubeLayout::new(5);
        for pos in layout.coords() {
            let index = layout.index_of(pos) as usize;
            assert_eq!(layout.coord_of(index), pos);
        }
    }

    #[test]
    fn test_contains() {
        let layout = CubeLayout::new(8);
        assert!(layout.contains(IVec3::new(0, 0, 0)));
        assert!(layout.contains(IVec3::new(7, 7, 7)));
        assert!(!layout.contains(IVec3::new(8, 0, 0)));
        assert!(!layout.contains(IVec3::new(0, -1, 0)));
        assert!(!layout.contains(IVec3::new(0, 0, 8)));
    }

    #[test]
    fn test_center_uses_integer_division() {
        assert_eq!(CubeLayout::new(8).center(), Vec3::splat(3.0));
        assert_eq!(CubeLayout::new(5).center(), Vec3::splat(2.0));
        assert_eq!(CubeLayout::new(1).center(), Vec3::ZERO);
    }

    #[test]
    fn test_coords_visits_every_voxel_once() {
        let layout = CubeLayout::new(3);
        let mut seen = vec![false; layout.voxel_count()];
        for pos in layout.coords() {
            let index = layout.index_of(pos) as usize;
            assert!(!seen[index]);
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
