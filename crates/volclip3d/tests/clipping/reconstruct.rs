use volclip3d::math::Point;
use volclip3d::surface::{reconstruct_surface, ClippingSurface, PointSet, SurfaceError};
use volclip3d::transformation::ConvexHullError;

#[test]
fn fewer_than_three_points_produce_no_surface() {
    let all = [
        Point::new(1.0, 2.0, 3.0),
        Point::new(-4.0, 0.0, 2.0),
        Point::new(0.0, 5.0, -1.0),
    ];

    for n in 0..3 {
        let points = PointSet::from_positions(&all[..n]);
        assert_eq!(
            reconstruct_surface(&points),
            Err(SurfaceError::InsufficientPoints { count: n })
        );

        let mut surface = ClippingSurface::new();
        assert_eq!(surface.update_from_points(&points), Ok(false));
        assert!(surface.mesh().is_none());
    }

    let mesh = reconstruct_surface(&PointSet::from_positions(&all)).unwrap();
    assert!(mesh.is_closed());
    assert!(mesh.boundary_edges().is_empty());
    // A fan of three triangles per side, split in four by each of the three
    // subdivision passes.
    assert_eq!(mesh.num_triangles(), 6 * 64);
    for pt in &all {
        assert!(mesh.vertices().contains(pt));
    }
}

#[test]
fn interior_points_are_ignored() {
    let corners = [
        Point::new(-10.0, -10.0, -10.0),
        Point::new(10.0, -10.0, -10.0),
        Point::new(0.0, 10.0, -10.0),
        Point::new(0.0, 0.0, 10.0),
    ];
    let mut with_interior = corners.to_vec();
    with_interior.push(Point::new(0.0, -1.0, -2.0));
    with_interior.push(Point::new(1.0, -3.0, 0.5));

    let a = reconstruct_surface(&PointSet::from_positions(&corners)).unwrap();
    let b = reconstruct_surface(&PointSet::from_positions(&with_interior)).unwrap();

    assert_eq!(a.num_triangles(), b.num_triangles());
    assert_eq!(a.vertices().len(), b.vertices().len());
}

#[test]
fn degenerate_point_sets() {
    let collinear = PointSet::from_positions(&[
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 2.0, 3.0),
        Point::new(2.0, 4.0, 6.0),
        Point::new(-1.0, -2.0, -3.0),
    ]);
    assert_eq!(
        reconstruct_surface(&collinear),
        Err(SurfaceError::Hull(ConvexHullError::Degenerate))
    );

    let mut surface = ClippingSurface::new();
    assert!(surface.update_from_points(&collinear).is_err());
    assert!(surface.mesh().is_none());
}

#[test]
fn reconstructed_surface_contains_the_points_centroid() {
    let points = PointSet::from_positions(&[
        Point::new(35.0, -10.0, -10.0),
        Point::new(-15.0, 20.0, -10.0),
        Point::new(-25.0, -25.0, -10.0),
        Point::new(-5.0, -60.0, -15.0),
        Point::new(-5.0, 5.0, 60.0),
        Point::new(-5.0, -35.0, -30.0),
    ]);
    let mesh = reconstruct_surface(&points).unwrap();

    // Eight hull triangles.
    assert_eq!(mesh.num_triangles(), 8 * 64);
    assert_eq!(mesh.vertices().len(), 8 * 64 / 2 + 2);
    assert!(mesh.is_closed());
    assert!(mesh.signed_volume() > 0.0);

    let aabb = mesh.local_aabb();
    assert!(aabb.mins.x <= -25.0 && aabb.maxs.x >= 35.0);
    assert!(aabb.mins.z <= -30.0 && aabb.maxs.z >= 60.0);
}
