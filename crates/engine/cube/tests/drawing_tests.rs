//! Drawing behaviour through the public API

use ledcube::glam::{IVec3, Vec3};
use ledcube::{palette, Color, Cube, MemoryStrip};

fn lit_voxels(cube: &Cube) -> Vec<IVec3> {
    cube.layout()
        .coords()
        .filter(|&p| !cube.get_voxel(p).is_black())
        .collect()
}

#[test]
fn test_roundtrip_every_voxel_on_stock_cube() {
    let mut cube = Cube::new(8, 50);
    for pos in cube.layout().coords() {
        let c = Color::new(pos.x as u8 * 30, pos.y as u8 * 30, pos.z as u8 * 30);
        cube.set_voxel(pos, c);
    }
    for pos in cube.layout().coords() {
        let c = Color::new(pos.x as u8 * 30, pos.y as u8 * 30, pos.z as u8 * 30);
        assert_eq!(cube.get_voxel(pos), c);
    }
}

#[test]
fn test_line_along_x_plots_only_that_row() {
    let mut cube = Cube::new(8, 50);
    cube.line(IVec3::new(0, 0, 0), IVec3::new(3, 0, 0), palette::RED);

    let lit = lit_voxels(&cube);
    assert_eq!(
        lit,
        vec![
            IVec3::new(0, 0, 0),
            IVec3::new(1, 0, 0),
            IVec3::new(2, 0, 0),
            IVec3::new(3, 0, 0),
        ]
    );
}

#[test]
fn test_line_points_truncates_endpoints() {
    let mut a = Cube::new(8, 50);
    let mut b = Cube::new(8, 50);
    a.line_points(Vec3::new(0.9, 0.2, 0.0), Vec3::new(6.99, 5.5, 2.1), palette::WHITE);
    b.line(IVec3::new(0, 0, 0), IVec3::new(6, 5, 2), palette::WHITE);
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn test_line_through_cube_diagonal() {
    let mut cube = Cube::new(8, 50);
    cube.line(IVec3::new(7, 0, 7), IVec3::new(0, 7, 0), palette::BLUE);
    let lit = lit_voxels(&cube);
    assert_eq!(lit.len(), 8);
    assert!(lit.contains(&IVec3::new(7, 0, 7)));
    assert!(lit.contains(&IVec3::new(0, 7, 0)));
}

#[test]
fn test_sphere_at_corner_is_clipped() {
    let mut cube = Cube::new(8, 50);
    cube.sphere(IVec3::ZERO, 1, palette::GREEN);
    // center plus the three in-cube face neighbours
    assert_eq!(lit_voxels(&cube).len(), 4);
}

#[test]
fn test_shell_around_center_is_symmetric() {
    let mut cube = Cube::new(8, 50);
    let center = cube.center();
    cube.shell(center, 3.0, palette::ORANGE);

    for pos in lit_voxels(&cube) {
        let mirrored = IVec3::splat(6) - pos;
        if cube.layout().contains(mirrored) {
            assert_eq!(cube.get_voxel(mirrored), palette::ORANGE);
        }
    }
    assert!(cube.get_voxel(IVec3::new(3, 3, 0)) == palette::ORANGE);
}

#[test]
fn test_color_map_through_cube_uses_cap() {
    let cube = Cube::new(8, 64);
    assert_eq!(cube.color_map(0.0, 0.0, 10.0), Color::new(0, 0, 64));
    assert_eq!(
        cube.lerp_color(Color::new(0, 0, 0), Color::new(10, 0, 0), 5, 0, 10),
        Color::new(5, 0, 0)
    );
}

#[test]
fn test_fade_trail_decays_and_flushes_each_pass() {
    let mut cube = Cube::with_strip(4, 50, MemoryStrip::new());
    cube.set_voxel(IVec3::new(1, 1, 1), Color::new(160, 80, 16));

    let mut last = cube.get_voxel(IVec3::new(1, 1, 1));
    for pass in 1..=10 {
        cube.fade(ledcube::DEFAULT_FADE);
        let now = cube.get_voxel(IVec3::new(1, 1, 1));
        assert!(now.red <= last.red && now.green <= last.green && now.blue <= last.blue);
        assert_eq!(cube.strip().show_count(), pass);
        last = now;
    }
    assert!(last.red < 160);
}

#[test]
fn test_clear_is_idempotent() {
    let mut cube = Cube::new(5, 50);
    cube.sphere(IVec3::splat(2), 2, palette::RED);
    cube.background(palette::BLACK);
    let once = cube.as_slice().to_vec();
    cube.clear();
    assert_eq!(cube.as_slice(), once.as_slice());
    assert!(lit_voxels(&cube).is_empty());
}
