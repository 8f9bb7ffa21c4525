use super::{box_mesh, random_volume};
use volclip3d::clip::{clip_volume, region_stencil, ClipParameters};
use volclip3d::math::{affine_from_parts, Affine, Matrix, Point, Vector};
use volclip3d::region::{BoxRegion, ClippingRegion, SurfaceRegion};

#[test]
fn enclosing_surface_is_a_pass_through() {
    let grid_to_world = affine_from_parts(
        &Matrix::from_diagonal(&Vector::new(0.5, 0.75, 1.5)),
        &Vector::new(-3.0, 2.0, 1.0),
    );
    let volume = random_volume([16, 12, 8], grid_to_world, 10);
    let mesh = box_mesh(Point::new(-10.0, -10.0, -10.0), Point::new(20.0, 20.0, 20.0));
    let region: ClippingRegion = SurfaceRegion::new(mesh).into();

    for fill in [0.0, -1.0, 12345.0] {
        let clipped = clip_volume(&volume, &region, &ClipParameters::keep_inside(fill)).unwrap();
        assert_eq!(clipped, volume);
    }
}

#[test]
fn keep_inside_and_keep_outside_partition_the_voxels() {
    let volume = random_volume([10, 10, 10], Affine::identity(), 11);
    let mesh = box_mesh(Point::new(2.1, 1.7, 3.2), Point::new(7.4, 8.9, 6.6));
    let region: ClippingRegion = SurfaceRegion::new(mesh).into();

    let kept = clip_volume(&volume, &region, &ClipParameters::keep_inside(-7.0)).unwrap();
    let removed = clip_volume(&volume, &region, &ClipParameters::keep_outside(-7.0)).unwrap();
    let samples = volume.image().unwrap().samples();
    let kept = kept.image().unwrap().samples();
    let removed = removed.image().unwrap().samples();
    let mut num_kept = 0;

    for ((original, a), b) in samples.iter().zip(kept).zip(removed) {
        if a == original {
            num_kept += 1;
            assert_eq!(*b, -7);
        } else {
            assert_eq!(*a, -7);
            assert_eq!(b, original);
        }
    }

    // x in [3, 7], y in [2, 8], z in [4, 6].
    assert_eq!(num_kept, 5 * 7 * 3);
}

#[test]
fn box_mesh_and_box_region_agree() {
    let grid_to_world = affine_from_parts(
        &Matrix::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 2.0),
        &Vector::new(4.0, -3.0, 0.5),
    );
    let mins = Point::new(-2.3, -1.1, 1.9);
    let maxs = Point::new(3.7, 2.6, 9.2);
    let mesh_region: ClippingRegion = SurfaceRegion::new(box_mesh(mins, maxs)).into();
    let box_region: ClippingRegion =
        BoxRegion::new(na::center(&mins, &maxs), (maxs - mins) / 2.0).into();

    let dims = [12, 12, 8];
    let from_mesh = region_stencil(&mesh_region, &grid_to_world, dims).unwrap();
    let from_box = region_stencil(&box_region, &grid_to_world, dims).unwrap();

    assert_eq!(from_mesh, from_box);
    assert!(from_box.num_inside() > 0);
}

#[test]
fn surface_outside_the_volume_fills_everything() {
    let volume = random_volume([5, 5, 5], Affine::identity(), 12);
    let mesh = box_mesh(Point::new(10.0, 10.0, 10.0), Point::new(12.0, 12.0, 12.0));
    let region: ClippingRegion = SurfaceRegion::new(mesh).into();

    let clipped = clip_volume(&volume, &region, &ClipParameters::default()).unwrap();
    assert!(clipped.image().unwrap().samples().iter().all(|s| *s == 0));

    let clipped = clip_volume(&volume, &region, &ClipParameters::keep_outside(0.0)).unwrap();
    assert_eq!(clipped, volume);
}
