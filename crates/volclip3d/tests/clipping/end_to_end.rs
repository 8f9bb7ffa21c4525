use volclip3d::clip::{clip_volume, ClipParameters};
use volclip3d::math::{Matrix, Point, Vector};
use volclip3d::region::{BoxRegion, ClippingRegion};
use volclip3d::surface::{ClippingSurface, PointSet};
use volclip3d::volume::{ImageData, Volume, VolumeGeometry};

#[test]
fn box_clip_of_a_constant_volume() {
    let volume = Volume::with_geometry(ImageData::filled([4, 4, 4], 100i16), &VolumeGeometry::default());
    let region: ClippingRegion = BoxRegion::new(Point::new(2.0, 2.0, 2.0), Vector::repeat(1.0)).into();
    let clipped = clip_volume(&volume, &region, &ClipParameters::default()).unwrap();
    let image = clipped.image().unwrap();

    for k in 0..4 {
        for j in 0..4 {
            for i in 0..4 {
                let within = [i, j, k].iter().all(|c| (1..=3).contains(c));
                let expected = if within { 100 } else { 0 };
                assert_eq!(image.get(i, j, k), Some(expected));
            }
        }
    }
}

// Clips a head-sized volume with a surface built from six fiducials, the
// way a user would from placed markups.
#[test]
fn clip_with_surface_from_fiducials() {
    let geometry = VolumeGeometry {
        origin: Point::new(64.0, 64.0, -64.0),
        spacing: Vector::new(2.0, 2.0, 2.0),
        // LPS-oriented volume displayed in RAS.
        directions: Matrix::from_diagonal(&Vector::new(-1.0, -1.0, 1.0)),
    };
    let image = ImageData::from_fn([64, 64, 64], |i, j, k| (i + j + k) as i16 + 1);
    let volume = Volume::with_geometry(image, &geometry);

    let points = PointSet::from_positions(&[
        Point::new(35.0, -10.0, -10.0),
        Point::new(-15.0, 20.0, -10.0),
        Point::new(-25.0, -25.0, -10.0),
        Point::new(-5.0, -60.0, -15.0),
        Point::new(-5.0, 5.0, 60.0),
        Point::new(-5.0, -35.0, -30.0),
    ]);
    let mut surface = ClippingSurface::new();
    assert_eq!(surface.update_from_points(&points), Ok(true));
    let region: ClippingRegion = surface.to_region().unwrap().into();

    let inside = clip_volume(&volume, &region, &ClipParameters::keep_inside(-5.0)).unwrap();
    let outside = clip_volume(&volume, &region, &ClipParameters::keep_outside(-5.0)).unwrap();
    let (inside, outside) = (inside.image().unwrap(), outside.image().unwrap());

    // World (-4, -18, -2) lies well inside the fiducials hull.
    assert_eq!(inside.get(34, 41, 31), volume.image().unwrap().get(34, 41, 31));
    assert_eq!(outside.get(34, 41, 31), Some(-5));
    // World (64, 64, -64) is far outside.
    assert_eq!(inside.get(0, 0, 0), Some(-5));
    assert_eq!(outside.get(0, 0, 0), Some(1));

    let num_kept = inside.samples().iter().filter(|s| **s != -5).count();
    let num_removed = outside.samples().iter().filter(|s| **s == -5).count();
    assert_eq!(num_kept, num_removed);
    assert!(num_kept > 1000 && num_kept < 64 * 64 * 64 / 2);
}
