use super::random_volume;
use na::{Rotation3, Translation3, Unit};
use volclip3d::clip::{clip_volume, ClipParameters};
use volclip3d::math::{affine_translation, Affine, Point, Vector};
use volclip3d::region::{BoxRegion, ClippingRegion};

// Maps the voxel (i, j, k) to (i - 5, j - 5, k - 5).
fn centered_grid() -> Affine {
    affine_translation(&Vector::repeat(-5.0))
}

#[test]
fn box_covering_the_volume_keeps_everything() {
    let volume = random_volume([11, 11, 11], centered_grid(), 1);
    let region: ClippingRegion = BoxRegion::new(Point::origin(), Vector::repeat(10.0)).into();

    let kept = clip_volume(&volume, &region, &ClipParameters::keep_inside(-1.0)).unwrap();
    assert_eq!(kept, volume);

    let removed = clip_volume(&volume, &region, &ClipParameters::keep_outside(-1.0)).unwrap();
    assert!(removed.image().unwrap().samples().iter().all(|s| *s == -1));
}

#[test]
fn shrunk_box_keeps_the_center() {
    let volume = random_volume([11, 11, 11], centered_grid(), 2);
    let region: ClippingRegion = BoxRegion::new(Point::origin(), Vector::repeat(1.0)).into();
    let clipped = clip_volume(&volume, &region, &ClipParameters::keep_inside(-1.0)).unwrap();

    let input = volume.image().unwrap();
    let output = clipped.image().unwrap();
    let near = |i: usize| (4..=6).contains(&i);

    for k in 0..11 {
        for j in 0..11 {
            for i in 0..11 {
                let expected = if near(i) && near(j) && near(k) {
                    input.get(i, j, k)
                } else {
                    Some(-1)
                };
                assert_eq!(output.get(i, j, k), expected);
            }
        }
    }
}

#[test]
fn rotated_box_matches_pointwise_classification() {
    let grid_to_world = Affine::from_matrix_unchecked(
        Translation3::new(-10.0, -8.0, -6.0).to_homogeneous()
            * na::Matrix4::new_nonuniform_scaling(&Vector::new(1.0, 0.8, 1.2)),
    );
    let volume = random_volume([20, 20, 12], grid_to_world, 3);
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(Vector::new(1.0, 2.0, 0.5)), 0.6);
    let placement = Affine::from_matrix_unchecked(
        Translation3::new(0.3, -0.7, 0.1).to_homogeneous() * rotation.to_homogeneous(),
    );
    let center = Point::new(0.2, 0.1, -0.3);
    let half_extents = Vector::new(4.3, 2.7, 3.1);
    let region: ClippingRegion = BoxRegion::new(center, half_extents)
        .with_transform(placement)
        .into();

    let clipped = clip_volume(&volume, &region, &ClipParameters::keep_inside(-1.0)).unwrap();
    let world_to_local = placement.try_inverse().unwrap();
    let output = clipped.image().unwrap();
    let mut num_inside = 0;

    for k in 0..12 {
        for j in 0..20 {
            for i in 0..20 {
                let local = world_to_local * volume.voxel_center(i, j, k);
                let delta = local - center;
                let inside = (0..3).all(|c| delta[c].abs() <= half_extents[c]);

                if inside {
                    num_inside += 1;
                    assert_eq!(output.get(i, j, k), volume.image().unwrap().get(i, j, k));
                } else {
                    assert_eq!(output.get(i, j, k), Some(-1), "voxel ({}, {}, {})", i, j, k);
                }
            }
        }
    }

    assert!(num_inside > 0);
}

#[test]
fn flat_box_selects_a_slice() {
    let volume = random_volume([6, 6, 6], Affine::identity(), 4);
    let region: ClippingRegion =
        BoxRegion::new(Point::new(2.5, 2.5, 3.0), Vector::new(10.0, 10.0, 0.0)).into();
    let clipped = clip_volume(&volume, &region, &ClipParameters::default()).unwrap();
    let output = clipped.image().unwrap();

    let kept = output
        .samples()
        .iter()
        .zip(volume.image().unwrap().samples())
        .filter(|(a, b)| a == b)
        .count();
    assert_eq!(kept, 36);
    for j in 0..6 {
        for i in 0..6 {
            assert_eq!(output.get(i, j, 3), volume.image().unwrap().get(i, j, 3));
            assert_eq!(output.get(i, j, 2), Some(0));
        }
    }
}
